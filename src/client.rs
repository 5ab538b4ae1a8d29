//! Outbound LINE Messaging API client.

use crate::error::{BotError, Result};
use crate::types::{ReplyMessage, ReplyRequest};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use tracing::{error, info};

#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Reply tokens are single use; never retry with the same token.
    async fn reply_message(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<()>;
}

/// One per inbound request; `http` is a handle to the shared pool.
#[derive(Debug)]
pub struct LineClient {
    http: reqwest::Client,
    reply_endpoint: String,
    authorization: HeaderValue,
    request_id: String,
}

impl LineClient {
    pub fn new(
        http: reqwest::Client,
        api_base_url: &str,
        channel_access_token: &str,
        request_id: impl Into<String>,
    ) -> Result<Self> {
        let token = channel_access_token.trim();
        if token.is_empty() {
            return Err(BotError::Client("channel access token is empty".to_string()));
        }

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| BotError::Client(format!("invalid channel access token: {}", e)))?;
        authorization.set_sensitive(true);

        Ok(LineClient {
            http,
            reply_endpoint: format!("{}/v2/bot/message/reply", api_base_url.trim_end_matches('/')),
            authorization,
            request_id: request_id.into(),
        })
    }
}

#[async_trait]
impl MessagingClient for LineClient {
    async fn reply_message(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<()> {
        if reply_token.trim().is_empty() {
            return Err(BotError::MissingReplyToken);
        }

        let reply_request = ReplyRequest {
            reply_token,
            messages,
        };

        let response = self
            .http
            .post(&self.reply_endpoint)
            .header(AUTHORIZATION, self.authorization.clone())
            .json(&reply_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            error!(
                request_id = %self.request_id,
                status = status.as_u16(),
                "LINE API error: {}",
                body
            );

            if body.contains("Invalid reply token") {
                error!(
                    request_id = %self.request_id,
                    "Reply token is invalid, expired or already used"
                );
            }

            return Err(BotError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!(request_id = %self.request_id, "Reply sent successfully");
        Ok(())
    }
}
