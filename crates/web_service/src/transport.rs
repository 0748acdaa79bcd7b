//! Transport adapter - how replies leave the service
//!
//! The chat platform stays behind the `TransportAdapter` trait; the flows and
//! the dispatcher never see HTTP. `HttpTransport` is the production
//! implementation, posting replies to the platform's reply endpoint and
//! resolving display names through its profile endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outbound side of the chat platform.
#[async_trait]
pub trait TransportAdapter: Send + Sync {
    /// Deliver the reply messages, in order, to a conversation.
    async fn send_reply(
        &self,
        conversation_id: &str,
        messages: &[String],
    ) -> Result<(), TransportError>;

    /// The display name of a user, for attendance records.
    async fn resolve_display_name(&self, user_id: &str) -> Result<String, TransportError>;
}

#[derive(Serialize)]
struct ReplyPayload<'a> {
    conversation_id: &'a str,
    messages: &'a [String],
}

#[derive(Deserialize)]
struct ProfileResponse {
    display_name: String,
}

/// Production transport speaking JSON over HTTP with bearer auth.
pub struct HttpTransport {
    client: reqwest::Client,
    reply_url: String,
    profile_url: String,
    access_token: String,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            reply_url: config.reply_url.clone(),
            profile_url: config.profile_url.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

#[async_trait]
impl TransportAdapter for HttpTransport {
    async fn send_reply(
        &self,
        conversation_id: &str,
        messages: &[String],
    ) -> Result<(), TransportError> {
        let payload = ReplyPayload {
            conversation_id,
            messages,
        };
        self.client
            .post(&self.reply_url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!(conversation_id, count = messages.len(), "replies delivered");
        Ok(())
    }

    async fn resolve_display_name(&self, user_id: &str) -> Result<String, TransportError> {
        let url = format!("{}/{}", self.profile_url.trim_end_matches('/'), user_id);
        let profile: ProfileResponse = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(profile.display_name)
    }
}
