use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub destination: String,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub kind: EventKind,
    #[serde(rename = "replyToken", default)]
    pub reply_token: Option<String>,
    #[serde(rename = "webhookEventId", default)]
    pub webhook_event_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub source: Option<Source>,
    #[serde(rename = "deliveryContext", default)]
    pub delivery_context: DeliveryContext,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    Message {
        message: MessageContent,
    },
    Follow,
    Unfollow,
    Join,
    Leave,
    Postback {
        #[serde(default)]
        postback: Option<Postback>,
    },
    Beacon {
        #[serde(default)]
        beacon: Option<Beacon>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text {
        #[serde(default)]
        id: Option<String>,
        text: String,
    },
    Image {
        #[serde(default)]
        id: Option<String>,
    },
    Video {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        duration: Option<u64>,
    },
    Audio {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        duration: Option<u64>,
    },
    Location {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        address: Option<String>,
        #[serde(default)]
        latitude: f64,
        #[serde(default)]
        longitude: f64,
    },
    Sticker {
        #[serde(default)]
        id: Option<String>,
        #[serde(rename = "packageId", default)]
        package_id: String,
        #[serde(rename = "stickerId", default)]
        sticker_id: String,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postback {
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Beacon {
    #[serde(default)]
    pub hwid: String,
    #[serde(rename = "type", default)]
    pub beacon_type: String,
    #[serde(default)]
    pub dm: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    #[serde(rename = "type", default)]
    pub source_type: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "groupId")]
    pub group_id: Option<String>,
    #[serde(rename = "roomId")]
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryContext {
    #[serde(rename = "isRedelivery", default)]
    pub is_redelivery: bool,
}

/// Event type, then message type for messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTag {
    Message(MessageTag),
    Follow,
    Unfollow,
    Join,
    Leave,
    Postback,
    Beacon,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTag {
    Text,
    Image,
    Video,
    Audio,
    Location,
    Sticker,
    Unsupported,
}

impl Event {
    pub fn tag(&self) -> EventTag {
        match &self.kind {
            EventKind::Message { message } => EventTag::Message(message.tag()),
            EventKind::Follow => EventTag::Follow,
            EventKind::Unfollow => EventTag::Unfollow,
            EventKind::Join => EventTag::Join,
            EventKind::Leave => EventTag::Leave,
            EventKind::Postback { .. } => EventTag::Postback,
            EventKind::Beacon { .. } => EventTag::Beacon,
            EventKind::Unknown => EventTag::Unknown,
        }
    }

    pub fn reply_token(&self) -> Option<&str> {
        self.reply_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    pub fn is_redelivery(&self) -> bool {
        self.delivery_context.is_redelivery
    }
}

impl MessageContent {
    pub fn tag(&self) -> MessageTag {
        match self {
            MessageContent::Text { .. } => MessageTag::Text,
            MessageContent::Image { .. } => MessageTag::Image,
            MessageContent::Video { .. } => MessageTag::Video,
            MessageContent::Audio { .. } => MessageTag::Audio,
            MessageContent::Location { .. } => MessageTag::Location,
            MessageContent::Sticker { .. } => MessageTag::Sticker,
            MessageContent::Unsupported => MessageTag::Unsupported,
        }
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTag::Message(message) => write!(f, "message/{}", message),
            EventTag::Follow => f.write_str("follow"),
            EventTag::Unfollow => f.write_str("unfollow"),
            EventTag::Join => f.write_str("join"),
            EventTag::Leave => f.write_str("leave"),
            EventTag::Postback => f.write_str("postback"),
            EventTag::Beacon => f.write_str("beacon"),
            EventTag::Unknown => f.write_str("unknown"),
        }
    }
}

impl fmt::Display for MessageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageTag::Text => "text",
            MessageTag::Image => "image",
            MessageTag::Video => "video",
            MessageTag::Audio => "audio",
            MessageTag::Location => "location",
            MessageTag::Sticker => "sticker",
            MessageTag::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}
