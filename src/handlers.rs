use crate::context::RequestContext;
use crate::error::{BotError, Result};
use crate::event::{Event, EventKind, MessageContent};
use crate::types::ReplyMessage;
use async_trait::async_trait;
use tracing::{info, warn};

pub const BEACON_ACK: &str = "Found a beacon!";

#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, ctx: &RequestContext, event: &Event) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TextEcho;

impl TextEcho {
    pub fn reply_body(text: &str) -> String {
        text.to_string()
    }
}

#[async_trait]
impl EventHandler for TextEcho {
    async fn handle(&self, ctx: &RequestContext, event: &Event) -> Result<()> {
        let text = match &event.kind {
            EventKind::Message {
                message: MessageContent::Text { text, .. },
            } => text,
            _ => {
                warn!(request_id = %ctx.key(), tag = %event.tag(), "TextEcho got a non-text event");
                return Ok(());
            }
        };

        send_text(ctx, event, Self::reply_body(text)).await
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BeaconAck;

#[async_trait]
impl EventHandler for BeaconAck {
    async fn handle(&self, ctx: &RequestContext, event: &Event) -> Result<()> {
        send_text(ctx, event, BEACON_ACK.to_string()).await
    }
}

async fn send_text(ctx: &RequestContext, event: &Event, body: String) -> Result<()> {
    let reply_token = event.reply_token().ok_or(BotError::MissingReplyToken)?;

    ctx.client()
        .reply_message(reply_token, &[ReplyMessage::text(body)])
        .await?;

    info!(request_id = %ctx.key(), tag = %event.tag(), "Reply sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MessagingClient;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(String, Vec<ReplyMessage>)>>,
    }

    #[async_trait]
    impl MessagingClient for Recorder {
        async fn reply_message(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((reply_token.to_string(), messages.to_vec()));
            Ok(())
        }
    }

    fn context() -> (RequestContext, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (RequestContext::new("req", recorder.clone()), recorder)
    }

    fn event(json: &str) -> Event {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_text_echo_replies_verbatim() {
        let text = "  Hello, 世界! @bot\n";
        let json = serde_json::json!({
            "type": "message",
            "replyToken": "T1",
            "message": {"type": "text", "text": text},
        })
        .to_string();

        let (ctx, recorder) = context();
        TextEcho.handle(&ctx, &event(&json)).await.unwrap();

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "T1");
        assert_eq!(sent[0].1, vec![ReplyMessage::text(text)]);
    }

    #[test]
    fn test_text_echo_twice_is_stable() {
        let first = TextEcho::reply_body("ping");
        let second = TextEcho::reply_body(&first);
        assert_eq!(first, "ping");
        assert_eq!(second, "ping");
    }

    #[tokio::test]
    async fn test_beacon_ack_ignores_payload() {
        let (ctx, recorder) = context();
        for json in [
            r#"{"type": "beacon", "replyToken": "B1"}"#,
            r#"{"type": "beacon", "replyToken": "B2",
                "beacon": {"hwid": "abc", "type": "leave", "dm": "ff"}}"#,
        ] {
            BeaconAck.handle(&ctx, &event(json)).await.unwrap();
        }

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent
            .iter()
            .all(|(_, messages)| messages == &vec![ReplyMessage::text(BEACON_ACK)]));
    }

    #[tokio::test]
    async fn test_missing_reply_token_is_an_error() {
        let (ctx, recorder) = context();
        let result = BeaconAck.handle(&ctx, &event(r#"{"type": "beacon"}"#)).await;

        assert!(matches!(result, Err(BotError::MissingReplyToken)));
        assert!(recorder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_text_echo_ignores_other_messages() {
        let (ctx, recorder) = context();
        let json = r#"{"type": "message", "replyToken": "T",
            "message": {"type": "image", "id": "1"}}"#;
        TextEcho.handle(&ctx, &event(json)).await.unwrap();
        assert!(recorder.sent.lock().unwrap().is_empty());
    }
}
