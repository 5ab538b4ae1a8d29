//! Error types for the bot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    /// Missing or invalid process configuration. Fatal at boot.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to build messaging client: {0}")]
    Client(String),

    #[error("Event has no reply token")]
    MissingReplyToken,

    #[error("LINE API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
