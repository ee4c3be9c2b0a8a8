use crate::helpers::{PASSWORD, TestApp, get_random_email};

#[tokio::test]
async fn should_replace_the_pending_code() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_register(&email, PASSWORD).await;
    let first = app.last_code(&email).await;

    let response = app.post_resend_confirmation(&email).await;
    assert_eq!(response.status().as_u16(), 200);
    let second = app.last_code(&email).await;
    assert_eq!(app.email_client.sent().await.len(), 2);

    if first != second {
        let response = app.post_confirm_registration(&email, &first).await;
        assert_eq!(response.status().as_u16(), 401);
    }
    let response = app.post_confirm_registration(&email, &second).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_409_for_a_confirmed_account() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;

    let response = app.post_resend_confirmation(&email).await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn should_return_404_for_an_unknown_account() {
    let app = TestApp::new().await;

    let response = app.post_resend_confirmation(&get_random_email()).await;

    assert_eq!(response.status().as_u16(), 404);
    assert!(app.email_client.sent().await.is_empty());
}
