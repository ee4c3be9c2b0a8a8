use codegate_core::{CodePurpose, Email, EmailClient, VerificationEmail};
use reqwest::{Client, StatusCode, Url, header::ACCEPT};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(Debug, Error)]
pub enum PostmarkError {
    #[error("Invalid Postmark url: {0}")]
    InvalidUrl(String),
    #[error("Postmark request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Postmark rejected the message with {status} (error code {error_code}): {message}")]
    Rejected {
        status: StatusCode,
        error_code: i64,
        message: String,
    },
}

/// Sends verification codes through Postmark's single-message endpoint as
/// plain text, tagged per purpose.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    server_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        server_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            server_token,
        }
    }

    #[tracing::instrument(
        name = "Delivering verification email via Postmark",
        skip_all,
        fields(purpose = %message.purpose)
    )]
    pub async fn deliver(
        &self,
        recipient: &Email,
        message: &VerificationEmail,
    ) -> Result<(), PostmarkError> {
        let url = Url::parse(&self.base_url)
            .and_then(|base| base.join("/email"))
            .map_err(|e| PostmarkError::InvalidUrl(e.to_string()))?;

        let request_body = VerificationEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject: message.subject,
            text_body: &message.body,
            tag: tag_for(message.purpose),
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http_client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(POSTMARK_AUTH_HEADER, self.server_token.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Postmark answers failures with {"ErrorCode": n, "Message": "..."}.
        let (error_code, message) = match response.json::<PostmarkErrorBody>().await {
            Ok(body) => (body.error_code, body.message),
            Err(_) => (
                0,
                status.canonical_reason().unwrap_or("no reason").to_string(),
            ),
        };
        Err(PostmarkError::Rejected {
            status,
            error_code,
            message,
        })
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        message: &VerificationEmail,
    ) -> Result<(), String> {
        self.deliver(recipient, message)
            .await
            .map_err(|e| e.to_string())
    }
}

fn tag_for(purpose: CodePurpose) -> &'static str {
    match purpose {
        CodePurpose::Register => "registration-code",
        CodePurpose::Recover => "password-recovery-code",
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct VerificationEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    tag: &'a str,
    message_stream: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkErrorBody {
    error_code: i64,
    message: String,
}
