pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod handlers;
pub mod router;
pub mod signature;
pub mod types;
pub mod webhook;

pub use client::{LineClient, MessagingClient};
pub use config::Config;
pub use context::{ContextFactory, LineContextFactory, RequestContext};
pub use error::{BotError, Result};
pub use event::{Event, EventKind, EventTag, MessageContent, MessageTag, WebhookRequest};
pub use handlers::{BeaconAck, EventHandler, TextEcho, BEACON_ACK};
pub use router::{DispatchSummary, EventRouter};
pub use types::ReplyMessage;
pub use webhook::{app, AppState};
