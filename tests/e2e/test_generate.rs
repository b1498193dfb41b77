use crate::e2e::helpers;

use helpers::api_client::FormPart;
use helpers::assertions::{assert_wav_body, assert_wav_headers};
use helpers::fakes::{FakeSynthesis, FAKE_SCRIPT};
use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_podcast_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/podcast/generate",
            &[
                FormPart::Text("tema", "História do café"),
                FormPart::Text("duracao_minutos", "2"),
                FormPart::Text("num_hosts", "2"),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_wav_headers(&response);
    response.assert_header("x-sample-rate", "24000");
    response.assert_header("x-chunk-count", "2");
    assert!(response.header("x-podcast-id").is_none());

    let pcm = assert_wav_body(&response, 24000);
    assert_eq!(pcm, FakeSynthesis::pcm().as_slice());

    // The generated script is what gets synthesized
    let requests = ctx.synthesis.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].0.ends_with(FAKE_SCRIPT));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_enrich_theme_with_documents(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/podcast/generate",
            &[
                FormPart::Text("tema", "Cafeicultura"),
                FormPart::File {
                    name: "documentos",
                    filename: "notas.txt",
                    content: "Arábica e robusta".as_bytes(),
                },
                FormPart::File {
                    name: "documentos",
                    filename: "pagina.html",
                    content: b"<html><body><p>Colheita em maio</p></body></html>",
                },
                FormPart::File {
                    name: "documentos",
                    filename: "planilha.xlsx",
                    content: b"PK\x03\x04",
                },
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let prompts = ctx.text_generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("Cafeicultura\n\n## Material de Referência:"));
    assert!(prompt.contains("--- Conteúdo do documento: notas.txt ---\nArábica e robusta"));
    assert!(prompt.contains("--- Conteúdo do documento: pagina.html ---"));
    assert!(prompt.contains("Colheita em maio"));
    assert!(!prompt.contains("planilha.xlsx"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_requested_host_voices(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/podcast/generate",
            &[
                FormPart::Text("tema", "Astronomia"),
                FormPart::Text(
                    "hosts_vozes",
                    r#"[{"hostNumber":1,"vozId":"Kore"},{"hostNumber":2,"vozId":"Charon"}]"#,
                ),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let requests = ctx.synthesis.requests.lock().unwrap();
    let speakers = &requests[0].1;
    assert_eq!(speakers.len(), 2);
    assert_eq!(speakers[0].speaker, "Speaker 1");
    assert_eq!(speakers[0].voice_name, "Kore");
    assert_eq!(speakers[1].speaker, "Speaker 2");
    assert_eq!(speakers[1].voice_name, "Charon");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_default_voices(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/podcast/generate",
            &[
                FormPart::Text("tema", "Astronomia"),
                FormPart::Text("hosts_vozes", "not json"),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let requests = ctx.synthesis.requests.lock().unwrap();
    let voices: Vec<&str> = requests[0].1.iter().map(|s| s.voice_name.as_str()).collect();
    assert_eq!(voices, vec!["Zephyr", "Puck"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_validate_generation_parameters(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/podcast/generate",
            &[
                FormPart::Text("tema", "Astronomia"),
                FormPart::Text("duracao_minutos", "61"),
            ],
        )
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("duracao_minutos must be between 1 and 60");

    let response = ctx
        .client
        .post_multipart(
            "/podcast/generate",
            &[FormPart::Text("tema", "Astronomia"), FormPart::Text("num_hosts", "0")],
        )
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("num_hosts must be between 1 and 10");

    let response = ctx
        .client
        .post_multipart("/podcast/generate", &[FormPart::Text("duracao_minutos", "5")])
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Theme cannot be empty");

    assert!(ctx.synthesis.requests.lock().unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_audio_even_when_saving_fails(ctx: &TestContext) {
    // The test database is unreachable, so the insert fails after the upload
    let response = ctx
        .client
        .post_multipart(
            "/podcast/generate",
            &[
                FormPart::Text("tema", "Astronomia"),
                FormPart::Text("user_id", "user-42"),
                FormPart::Text("titulo", "Episódio 1"),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_wav_headers(&response);
    assert!(response.header("x-podcast-id").is_none());

    // The orphaned upload is cleaned up
    assert!(ctx.storage.objects.lock().unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_audio_from_script(ctx: &TestContext) {
    let script = "Speaker 1: Olá!\nSpeaker 2: Tudo bem?\nSpeaker 3: Ótimo.";
    let response = ctx
        .client
        .post_form(
            "/podcast/generate-from-script",
            &[
                ("script", script),
                ("hosts_vozes", r#"[{"hostNumber":1,"vozId":"Leda"}]"#),
            ],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_wav_headers(&response);
    assert_eq!(
        assert_wav_body(&response, 24000),
        FakeSynthesis::pcm().as_slice()
    );

    // No text generation involved
    assert!(ctx.text_generator.prompts.lock().unwrap().is_empty());

    let requests = ctx.synthesis.requests.lock().unwrap();
    assert!(requests[0].0.ends_with(script));
    let voices: Vec<&str> = requests[0].1.iter().map(|s| s.voice_name.as_str()).collect();
    // Host 2 is padded with the fallback voice, host 3 is dropped
    assert_eq!(voices, vec!["Leda", "Zephyr"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_script(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form("/podcast/generate-from-script", &[("script", " \n ")])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Script cannot be empty");
    assert!(ctx.synthesis.requests.lock().unwrap().is_empty());
}
