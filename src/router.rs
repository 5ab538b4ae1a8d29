use crate::context::RequestContext;
use crate::error::BotError;
use crate::event::{Event, EventTag, MessageTag};
use crate::handlers::{BeaconAck, EventHandler, TextEcho};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Called with every handler error. Must not panic.
pub type ErrorHook = Arc<dyn Fn(&RequestContext, &Event, &BotError) + Send + Sync>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub handled: usize,
    pub failed: usize,
    pub unhandled: usize,
    pub skipped: usize,
}

pub struct EventRouter {
    routes: HashMap<EventTag, Arc<dyn EventHandler>>,
    on_handler_error: ErrorHook,
    skip_redelivered: bool,
}

impl EventRouter {
    pub fn new() -> Self {
        EventRouter {
            routes: HashMap::new(),
            on_handler_error: Arc::new(log_handler_error),
            skip_redelivered: false,
        }
    }

    pub fn route<H>(mut self, tag: EventTag, handler: H) -> Self
    where
        H: EventHandler + 'static,
    {
        self.routes.insert(tag, Arc::new(handler));
        self
    }

    pub fn on_handler_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestContext, &Event, &BotError) + Send + Sync + 'static,
    {
        self.on_handler_error = Arc::new(hook);
        self
    }

    pub fn skip_redelivered(mut self, skip: bool) -> Self {
        self.skip_redelivered = skip;
        self
    }

    pub fn is_routed(&self, tag: EventTag) -> bool {
        self.routes.contains_key(&tag)
    }

    pub async fn dispatch(&self, ctx: &RequestContext, events: &[Event]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for event in events {
            let tag = event.tag();

            if self.skip_redelivered && event.is_redelivery() {
                info!(
                    request_id = %ctx.key(),
                    webhook_event_id = event.webhook_event_id.as_deref().unwrap_or("-"),
                    "Skipping redelivered event"
                );
                summary.skipped += 1;
                continue;
            }

            let Some(handler) = self.routes.get(&tag) else {
                debug!(request_id = %ctx.key(), %tag, "No handler registered");
                summary.unhandled += 1;
                continue;
            };

            match handler.handle(ctx, event).await {
                Ok(()) => summary.handled += 1,
                Err(e) => {
                    (self.on_handler_error)(ctx, event, &e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        EventRouter::new()
            .route(EventTag::Message(MessageTag::Text), TextEcho)
            .route(EventTag::Beacon, BeaconAck)
    }
}

pub fn log_handler_error(ctx: &RequestContext, event: &Event, err: &BotError) {
    error!(
        request_id = %ctx.key(),
        tag = %event.tag(),
        reply_token = event.reply_token().unwrap_or("-"),
        "Failed to handle event: {}",
        err
    );
}
