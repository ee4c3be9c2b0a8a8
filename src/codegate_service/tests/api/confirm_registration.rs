use std::time::Duration;

use codegate_core::{AccountStore, Role};
use serde_json::Value;

use crate::helpers::{PASSWORD, TestApp, error_message, get_random_email, other_code};

#[tokio::test]
async fn should_return_200_with_tokens_for_the_emailed_code() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_register(&email, PASSWORD).await;
    let code = app.last_code(&email).await;

    let response = app.post_confirm_registration(&email, &code).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(!body["accessToken"].as_str().unwrap().is_empty());
    assert!(!body["refreshToken"].as_str().unwrap().is_empty());

    assert_eq!(app.post_login(&email, PASSWORD).await.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_404_when_the_code_is_reused() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_register(&email, PASSWORD).await;
    let code = app.last_code(&email).await;
    app.post_confirm_registration(&email, &code).await;

    let response = app.post_confirm_registration(&email, &code).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_401_for_a_wrong_code_and_keep_the_pending_code() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_register(&email, PASSWORD).await;
    let code = app.last_code(&email).await;

    let response = app
        .post_confirm_registration(&email, &other_code(&code))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_message(response).await, "Incorrect verification code");

    let response = app.post_confirm_registration(&email, &code).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_429_when_the_attempt_budget_is_spent() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_register(&email, PASSWORD).await;
    let code = app.last_code(&email).await;
    let wrong = other_code(&code);

    for _ in 0..4 {
        let response = app.post_confirm_registration(&email, &wrong).await;
        assert_eq!(response.status().as_u16(), 401);
    }
    let response = app.post_confirm_registration(&email, &wrong).await;
    assert_eq!(response.status().as_u16(), 429);

    let response = app.post_confirm_registration(&email, &code).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_404_after_the_code_expires() {
    let app = TestApp::with_ttl(Duration::from_millis(300)).await;
    let email = get_random_email();
    app.post_register(&email, PASSWORD).await;
    let code = app.last_code(&email).await;

    tokio::time::sleep(Duration::from_millis(500)).await;
    let response = app.post_confirm_registration(&email, &code).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_400_for_a_malformed_code() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_register(&email, PASSWORD).await;

    for code in ["", "12345", "1234567", "12a456"] {
        let response = app.post_confirm_registration(&email, code).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for code: {code:?}");
    }
}

#[tokio::test]
async fn should_return_403_for_a_banned_account() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_register(&email, PASSWORD).await;
    let code = app.last_code(&email).await;
    app.set_role(&email, Role::Banned).await;

    let response = app.post_confirm_registration(&email, &code).await;

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(error_message(response).await, "Account is banned");
    let account = app
        .account_store
        .get_account(&crate::helpers::parse_email(&email))
        .await
        .unwrap();
    assert!(!account.is_confirmed);
}
