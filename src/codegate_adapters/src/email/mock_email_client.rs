use std::sync::Arc;

use codegate_core::{CodePurpose, Email, EmailClient, VerificationEmail};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: Email,
    pub purpose: CodePurpose,
    pub subject: String,
    pub content: String,
}

/// Email client that keeps every message in memory instead of delivering it.
///
/// Used by the local binary profile and the api tests, which read the
/// delivered code back out of the outbox.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    outbox: Arc<RwLock<Vec<SentEmail>>>,
    failing: bool,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.read().await.clone()
    }

    /// The six digit code from the most recent message sent to `recipient`.
    pub async fn last_code_for(&self, recipient: &Email) -> Option<String> {
        let outbox = self.outbox.read().await;
        outbox
            .iter()
            .rev()
            .find(|sent| &sent.recipient == recipient)
            .and_then(|sent| extract_code(&sent.content))
    }
}

fn extract_code(content: &str) -> Option<String> {
    let (_, rest) = content.split_once("code is: ")?;
    let code: String = rest.chars().take_while(char::is_ascii_digit).collect();
    (!code.is_empty()).then_some(code)
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        message: &VerificationEmail,
    ) -> Result<(), String> {
        if self.failing {
            return Err("mock email delivery failure".to_string());
        }

        tracing::debug!(purpose = %message.purpose, "Recording email instead of sending it");
        self.outbox.write().await.push(SentEmail {
            recipient: recipient.clone(),
            purpose: message.purpose,
            subject: message.subject.to_string(),
            content: message.body.clone(),
        });
        Ok(())
    }
}
