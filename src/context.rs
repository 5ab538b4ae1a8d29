use crate::client::{LineClient, MessagingClient};
use crate::config::Config;
use crate::error::Result;
use axum::http::HeaderMap;
use std::sync::Arc;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct RequestContext {
    key: String,
    client: Arc<dyn MessagingClient>,
}

impl RequestContext {
    pub fn new(key: impl Into<String>, client: Arc<dyn MessagingClient>) -> Self {
        RequestContext {
            key: key.into(),
            client,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn client(&self) -> &dyn MessagingClient {
        self.client.as_ref()
    }

    pub fn client_handle(&self) -> &Arc<dyn MessagingClient> {
        &self.client
    }
}

pub trait ContextFactory: Send + Sync {
    fn new_context(&self, headers: &HeaderMap) -> Result<RequestContext>;
}

pub struct LineContextFactory {
    http: reqwest::Client,
    api_base_url: String,
    channel_access_token: String,
}

impl LineContextFactory {
    pub fn new(config: &Config) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: &Config) -> Self {
        LineContextFactory {
            http,
            api_base_url: config.api_base_url.clone(),
            channel_access_token: config.channel_access_token.clone(),
        }
    }
}

impl ContextFactory for LineContextFactory {
    fn new_context(&self, headers: &HeaderMap) -> Result<RequestContext> {
        let key = request_id(headers);
        let client = LineClient::new(
            self.http.clone(),
            &self.api_base_url,
            &self.channel_access_token,
            key.clone(),
        )?;
        Ok(RequestContext::new(key, Arc::new(client)))
    }
}

// `-` when the request skipped the request-id layer.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
