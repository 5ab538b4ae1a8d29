use crate::config::Config;
use crate::context::{self, ContextFactory, LineContextFactory};
use crate::event::WebhookRequest;
use crate::router::EventRouter;
use crate::signature::{verify_signature, SIGNATURE_HEADER};
use axum::{
    body::Bytes,
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    channel_secret: Arc<str>,
    skip_signature_verification: bool,
    contexts: Arc<dyn ContextFactory>,
    router: Arc<EventRouter>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let router = EventRouter::default().skip_redelivered(config.skip_redelivered);
        Self::with_parts(
            &config.channel_secret,
            Arc::new(LineContextFactory::new(config)),
            router,
        )
        .skip_signature_verification(config.skip_signature_verification)
    }

    pub fn with_parts(
        channel_secret: &str,
        contexts: Arc<dyn ContextFactory>,
        router: EventRouter,
    ) -> Self {
        AppState {
            channel_secret: Arc::from(channel_secret),
            skip_signature_verification: false,
            contexts,
            router: Arc::new(router),
        }
    }

    pub fn skip_signature_verification(mut self, skip: bool) -> Self {
        self.skip_signature_verification = skip;
        self
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/webhook", get(health_check).post(webhook_handler))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    let health_response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(health_response))
}

// Past signature and decode checks, every outcome is logged and answered 200.
async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let request_id = context::request_id(&headers);

    if state.skip_signature_verification {
        warn!(request_id = %request_id, "Dev mode: skipping signature verification");
    } else {
        match headers.get(SIGNATURE_HEADER).and_then(|h| h.to_str().ok()) {
            Some(signature) if verify_signature(&body, signature, &state.channel_secret) => {}
            Some(_) => {
                error!(request_id = %request_id, "Invalid signature");
                return StatusCode::UNAUTHORIZED;
            }
            None => {
                error!(request_id = %request_id, "Missing signature header");
                return StatusCode::UNAUTHORIZED;
            }
        }
    }

    let webhook_request: WebhookRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            error!(request_id = %request_id, "Failed to parse webhook request: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    info!(
        request_id = %request_id,
        destination = %webhook_request.destination,
        events = webhook_request.events.len(),
        "Webhook received"
    );

    let ctx = match state.contexts.new_context(&headers) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(
                request_id = %request_id,
                "Failed to build request context, dropping batch: {}",
                e
            );
            return StatusCode::OK;
        }
    };

    let summary = state.router.dispatch(&ctx, &webhook_request.events).await;
    info!(
        request_id = %request_id,
        handled = summary.handled,
        failed = summary.failed,
        unhandled = summary.unhandled,
        skipped = summary.skipped,
        "Batch dispatched"
    );

    StatusCode::OK
}
