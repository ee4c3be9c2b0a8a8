use serde_json::Value;

use crate::helpers::{PASSWORD, TestApp, get_random_email, other_code};

const NEW_PASSWORD: &str = "N3wPassw0rd?";

#[tokio::test]
async fn should_reset_the_password_with_the_emailed_code() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;

    let response = app.post_forgot_password(&email).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["expiresAt"].is_string());
    let sent = app.email_client.sent().await;
    assert_eq!(sent.last().unwrap().subject, "Password Recovery Code");

    let code = app.last_code(&email).await;
    let response = app
        .post_recover_password(&email, &code, NEW_PASSWORD)
        .await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.post_login(&email, PASSWORD).await.status().as_u16(), 401);
    assert_eq!(
        app.post_login(&email, NEW_PASSWORD).await.status().as_u16(),
        200
    );
}

#[tokio::test]
async fn should_return_404_for_an_unknown_account() {
    let app = TestApp::new().await;

    let response = app.post_forgot_password(&get_random_email()).await;

    assert_eq!(response.status().as_u16(), 404);
    assert!(app.email_client.sent().await.is_empty());
}

#[tokio::test]
async fn should_not_accept_a_registration_code() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_register(&email, PASSWORD).await;
    let registration_code = app.last_code(&email).await;

    let response = app
        .post_recover_password(&email, &registration_code, NEW_PASSWORD)
        .await;

    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .post_confirm_registration(&email, &registration_code)
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_keep_the_old_password_after_a_wrong_code() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;
    app.post_forgot_password(&email).await;
    let code = app.last_code(&email).await;

    let response = app
        .post_recover_password(&email, &other_code(&code), NEW_PASSWORD)
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(app.post_login(&email, PASSWORD).await.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_400_for_a_weak_new_password() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;
    app.post_forgot_password(&email).await;
    let code = app.last_code(&email).await;

    let response = app.post_recover_password(&email, &code, "weak").await;

    assert_eq!(response.status().as_u16(), 400);
}
