use std::time::Duration;

use codegate_adapters::{
    auth::{JwtConfig, JwtTokenIssuer},
    config::test,
    email::MockEmailClient,
    persistence::{HashMapAccountStore, HashMapVerificationCodeStore},
};
use codegate_application::VerificationSettings;
use codegate_core::{AccountStore, Email, Role};
use codegate_service::CodegateService;
use secrecy::Secret;
use serde_json::{Value, json};

pub const PASSWORD: &str = "Passw0rd!";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub email_client: MockEmailClient,
    pub account_store: HashMapAccountStore,
    pub code_store: HashMapVerificationCodeStore,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(VerificationSettings::default(), MockEmailClient::new()).await
    }

    pub async fn with_ttl(ttl: Duration) -> Self {
        let settings = VerificationSettings {
            ttl,
            ..VerificationSettings::default()
        };
        Self::build(settings, MockEmailClient::new()).await
    }

    pub async fn with_failing_email() -> Self {
        Self::build(VerificationSettings::default(), MockEmailClient::failing()).await
    }

    async fn build(verification: VerificationSettings, email_client: MockEmailClient) -> Self {
        let account_store = HashMapAccountStore::new();
        let code_store = HashMapVerificationCodeStore::new();
        let token_issuer = JwtTokenIssuer::new(JwtConfig {
            secret: Secret::new("test-secret".to_string()),
            access_ttl_seconds: 600,
            refresh_ttl_seconds: 3600,
        });

        let router = CodegateService::new(
            account_store.clone(),
            code_store.clone(),
            email_client.clone(),
            token_issuer,
            verification,
        )
        .as_nested_router(None);

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let _ = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
            email_client,
            account_store,
            code_store,
        }
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_authorized(&self, path: &str, token: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_authorized(&self, path: &str, token: &str) -> reqwest::Response {
        self.http_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/register", &json!({ "email": email, "password": password }))
            .await
    }

    pub async fn post_confirm_registration(&self, email: &str, code: &str) -> reqwest::Response {
        self.post(
            "/confirm-registration",
            &json!({ "email": email, "code": code }),
        )
        .await
    }

    pub async fn post_resend_confirmation(&self, email: &str) -> reqwest::Response {
        self.post("/resend-confirmation", &json!({ "email": email }))
            .await
    }

    pub async fn post_login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login", &json!({ "email": email, "password": password }))
            .await
    }

    pub async fn post_forgot_password(&self, email: &str) -> reqwest::Response {
        self.post("/forgot-password", &json!({ "email": email }))
            .await
    }

    pub async fn post_recover_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> reqwest::Response {
        self.post(
            "/recover-password",
            &json!({ "email": email, "code": code, "newPassword": new_password }),
        )
        .await
    }

    /// The code most recently emailed to `email`.
    pub async fn last_code(&self, email: &str) -> String {
        self.email_client
            .last_code_for(&parse_email(email))
            .await
            .expect("No code was emailed")
    }

    /// Registers `email`, confirms it with the emailed code and returns the
    /// access token.
    pub async fn register_confirmed(&self, email: &str) -> String {
        assert_eq!(self.post_register(email, PASSWORD).await.status().as_u16(), 201);
        let code = self.last_code(email).await;
        let response = self.post_confirm_registration(email, &code).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        body["accessToken"].as_str().unwrap().to_string()
    }

    /// A confirmed account promoted to administrator, and its access token.
    pub async fn admin(&self) -> (String, String) {
        let email = get_random_email();
        let token = self.register_confirmed(&email).await;
        self.set_role(&email, Role::Admin).await;
        (email, token)
    }

    pub async fn set_role(&self, email: &str, role: Role) {
        let account = self
            .account_store
            .get_account(&parse_email(email))
            .await
            .unwrap();
        self.account_store
            .set_role(account.id, role, None)
            .await
            .unwrap();
    }

    pub async fn role_of(&self, email: &str) -> Role {
        self.account_store
            .get_account(&parse_email(email))
            .await
            .unwrap()
            .role
    }
}

pub fn parse_email(raw: &str) -> Email {
    Email::try_from(Secret::new(raw.to_string())).unwrap()
}

pub fn get_random_email() -> String {
    format!("{}@example.com", uuid::Uuid::new_v4().simple())
}

/// A six digit code different from `code`.
pub fn other_code(code: &str) -> String {
    let value: u32 = code.parse().unwrap();
    format!("{:06}", (value + 1) % 1_000_000)
}

pub async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Expected a JSON error body");
    body["error"].as_str().unwrap_or_default().to_string()
}
