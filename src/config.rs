use crate::error::{BotError, Result};
use reqwest::header::HeaderValue;
use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me";

#[derive(Debug, Clone)]
pub struct Config {
    pub channel_secret: String,
    pub channel_access_token: String,
    pub port: u16,
    pub api_base_url: String,
    pub skip_signature_verification: bool,
    pub skip_redelivered: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| BotError::Config(format!("{} environment variable is required", key)))
        };

        let channel_secret = required("LINE_CHANNEL_SECRET")?;
        let channel_access_token = required("LINE_CHANNEL_ACCESS_TOKEN")?;
        if HeaderValue::from_str(&format!("Bearer {}", channel_access_token.trim())).is_err() {
            return Err(BotError::Config(
                "LINE_CHANNEL_ACCESS_TOKEN is not a valid bearer token".to_string(),
            ));
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| BotError::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let api_base_url = lookup("LINE_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let flag = |key: &str| lookup(key).map(|v| v.trim() == "true").unwrap_or(false);

        Ok(Config {
            channel_secret,
            channel_access_token,
            port,
            api_base_url,
            skip_signature_verification: flag("SKIP_SIGNATURE_VERIFICATION"),
            skip_redelivered: flag("SKIP_REDELIVERED"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
