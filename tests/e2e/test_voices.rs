use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_available_voices(ctx: &TestContext) {
    let response = ctx.client.get("/vozes").await.unwrap();

    response.assert_status(StatusCode::OK);

    let voices = response
        .body
        .as_ref()
        .and_then(|b| b.get("vozes"))
        .and_then(|v| v.as_array())
        .expect("Missing vozes array");

    assert_eq!(voices.len(), 30);
    for voice in voices {
        assert!(voice.get("id").and_then(|v| v.as_str()).is_some());
        assert!(voice.get("nome").and_then(|v| v.as_str()).is_some());
        let gender = voice.get("genero").and_then(|v| v.as_str()).unwrap();
        assert!(gender == "Feminino" || gender == "Masculino");
    }

    let zephyr = voices
        .iter()
        .find(|v| v.get("id").and_then(|id| id.as_str()) == Some("Zephyr"))
        .expect("Zephyr voice missing");
    assert_eq!(zephyr.get("genero").and_then(|v| v.as_str()), Some("Feminino"));
}
