use crate::e2e::helpers;

use helpers::fakes::FAKE_SCRIPT;
use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_enhance_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/enhance", &[("texto", "podcast sobre café")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(
        body.get("texto_original").and_then(|v| v.as_str()),
        Some("podcast sobre café")
    );
    assert_eq!(
        body.get("texto_aprimorado").and_then(|v| v.as_str()),
        Some(FAKE_SCRIPT)
    );

    let prompts = ctx.text_generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("## TEXTO ORIGINAL:\npodcast sobre café"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_enhance_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/enhance", &[("texto", "   ")])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Text cannot be empty");
    assert!(ctx.text_generator.prompts.lock().unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_script(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form(
            "/podcast/script",
            &[("tema", "Rust async"), ("duracao_minutos", "5"), ("num_hosts", "3")],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response
            .body
            .as_ref()
            .and_then(|b| b.get("script"))
            .and_then(|v| v.as_str()),
        Some(FAKE_SCRIPT)
    );

    let prompts = ctx.text_generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("aproximadamente 5 minutos"));
    assert!(prompts[0].contains("Speaker 3: [fala do host 3]"));
    assert!(prompts[0].contains("## TEMA DO PODCAST:\nRust async"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_default_duration_and_hosts(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/podcast/script", &[("tema", "Rust async")])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let prompts = ctx.text_generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("aproximadamente 3 minutos"));
    assert!(prompts[0].contains("entre 2 participante(s)"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_validate_script_parameters(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/podcast/script", &[("tema", "Rust"), ("duracao_minutos", "0")])
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("duracao_minutos must be between 1 and 60");

    let response = ctx
        .client
        .post_form("/podcast/script", &[("tema", "Rust"), ("num_hosts", "11")])
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("num_hosts must be between 1 and 10");

    let response = ctx
        .client
        .post_form("/podcast/script", &[("tema", "  ")])
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Theme cannot be empty");

    assert!(ctx.text_generator.prompts.lock().unwrap().is_empty());
}
