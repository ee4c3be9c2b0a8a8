use codegate_core::Role;
use serde_json::Value;

use crate::helpers::{PASSWORD, TestApp, error_message, get_random_email};

#[tokio::test]
async fn should_ban_and_unban_a_user_by_email() {
    let app = TestApp::new().await;
    let (_, token) = app.admin().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;

    let response = app
        .put_authorized(&format!("/admin/ban/{email}?data=email"), &token)
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["role"], "banned");
    assert_eq!(body["email"], email.as_str());
    assert_eq!(app.post_login(&email, PASSWORD).await.status().as_u16(), 403);

    let response = app
        .put_authorized(&format!("/admin/unban/{email}?data=email"), &token)
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.role_of(&email).await, Role::User);
    assert_eq!(app.post_login(&email, PASSWORD).await.status().as_u16(), 200);
}

#[tokio::test]
async fn should_ban_a_user_by_id() {
    let app = TestApp::new().await;
    let (_, token) = app.admin().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;
    let profile: Value = app
        .get_authorized(&format!("/admin/accounts/{email}?data=email"), &token)
        .await
        .json()
        .await
        .unwrap();
    let id = profile["id"].as_str().unwrap();

    let response = app.put_authorized(&format!("/admin/ban/{id}"), &token).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.role_of(&email).await, Role::Banned);
}

#[tokio::test]
async fn should_return_409_when_the_role_does_not_allow_the_change() {
    let app = TestApp::new().await;
    let (admin_email, token) = app.admin().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;

    let ban_admin = app
        .put_authorized(&format!("/admin/ban/{admin_email}?data=email"), &token)
        .await;
    let unban_user = app
        .put_authorized(&format!("/admin/unban/{email}?data=email"), &token)
        .await;

    assert_eq!(ban_admin.status().as_u16(), 409);
    assert_eq!(unban_user.status().as_u16(), 409);
    assert_eq!(app.role_of(&admin_email).await, Role::Admin);
}

#[tokio::test]
async fn should_change_a_role() {
    let app = TestApp::new().await;
    let (_, token) = app.admin().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;

    let response = app
        .put_authorized(
            &format!("/admin/change-role/{email}?data=email&role=courier"),
            &token,
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.role_of(&email).await, Role::Courier);
}

#[tokio::test]
async fn should_return_400_for_malformed_targets_and_roles() {
    let app = TestApp::new().await;
    let (_, token) = app.admin().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;

    let test_cases = [
        format!("/admin/ban/{email}"),
        format!("/admin/ban/{email}?data=phone"),
        "/admin/ban/not-an-email?data=email".to_string(),
        format!("/admin/change-role/{email}?data=email&role=superuser"),
        format!("/admin/change-role/{email}?data=email"),
    ];

    for path in test_cases {
        let response = app.put_authorized(&path, &token).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for path: {path}");
    }
}

#[tokio::test]
async fn should_return_404_for_an_unknown_account() {
    let app = TestApp::new().await;
    let (_, token) = app.admin().await;

    let response = app
        .put_authorized(
            &format!("/admin/ban/{}", uuid::Uuid::new_v4()),
            &token,
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_403_for_non_admins() {
    let app = TestApp::new().await;
    let email = get_random_email();
    let token = app.register_confirmed(&email).await;
    let target = get_random_email();
    app.register_confirmed(&target).await;

    let response = app
        .put_authorized(&format!("/admin/ban/{target}?data=email"), &token)
        .await;

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(error_message(response).await, "Administrator role required");
    assert_eq!(app.role_of(&target).await, Role::User);
}

#[tokio::test]
async fn should_return_403_once_an_admin_is_demoted() {
    let app = TestApp::new().await;
    let (admin_email, token) = app.admin().await;
    let target = get_random_email();
    app.register_confirmed(&target).await;
    app.set_role(&admin_email, Role::Manager).await;

    let response = app
        .put_authorized(&format!("/admin/ban/{target}?data=email"), &token)
        .await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn should_return_401_without_a_valid_access_token() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.register_confirmed(&email).await;
    let login: Value = app.post_login(&email, PASSWORD).await.json().await.unwrap();
    let refresh_token = login["refreshToken"].as_str().unwrap();
    let path = format!("/admin/ban/{email}?data=email");

    let missing = app
        .http_client
        .put(format!("{}{}", app.address, path))
        .send()
        .await
        .unwrap();
    let forged = app.put_authorized(&path, "not-a-jwt").await;
    let refresh = app.put_authorized(&path, refresh_token).await;

    assert_eq!(missing.status().as_u16(), 401);
    assert_eq!(forged.status().as_u16(), 401);
    assert_eq!(refresh.status().as_u16(), 401);
}
