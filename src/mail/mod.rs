//! Mail-send capability: HTTP relay in production, log-only fallback.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::AppError;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

/// POSTs the message as a JSON payload to a configured relay endpoint.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "to": to,
                "subject": subject,
                "body": body,
            }))
            .send()
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Mail(format!(
                "relay returned {}",
                response.status()
            )));
        }
        tracing::info!(%to, "report handed to mail relay");
        Ok(())
    }
}

/// Logs the message instead of sending it. Selected when no relay endpoint
/// is configured.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        tracing::info!(%to, %subject, "mail relay not configured, logging report");
        tracing::info!("{body}");
        Ok(())
    }
}

pub fn from_config(config: &AppConfig) -> Arc<dyn Mailer> {
    match &config.mail_endpoint {
        Some(endpoint) => Arc::new(HttpMailer::new(endpoint.clone())),
        None => Arc::new(LogMailer),
    }
}
