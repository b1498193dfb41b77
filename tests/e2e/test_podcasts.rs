use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_user_id_to_list_podcasts(ctx: &TestContext) {
    let response = ctx.client.get("/api/podcasts").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("user_id is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_podcast_id(ctx: &TestContext) {
    let response = ctx.client.get("/api/podcasts/not-a-uuid").await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_owner_to_delete(ctx: &TestContext) {
    let response = ctx
        .client
        .delete("/api/podcasts/7f1c1f3e-52b4-4d3a-9a59-0c5d1c1e2b3a")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("user_id is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_surface_database_failures(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/podcasts?user_id=user-1&limit=5")
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.as_ref().and_then(|b| b.get("message")).is_some());
}
