//! # HTTP Ingestion Surface
//!
//! Thin local boundary for the broker transport collaborator: whatever
//! process speaks MQTT to the fleet server delivers payloads here.
//!
//! ## Endpoints
//!
//! - `POST /print`: enqueue a wire-format job, returns the job ref
//! - `GET /status`: current health and counters
//!
//! ## Usage
//!
//! ```bash
//! recibo serve --listen 127.0.0.1:9100 --device /dev/usb/lp0
//! curl -d @job.json localhost:9100/print
//! ```

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bridge::Bridge;
use crate::error::BridgeError;

/// Start the server against a running bridge. Blocks until shutdown.
pub async fn serve(bridge: Bridge, listen_addr: &str) -> Result<(), BridgeError> {
    let app = router(bridge);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .map_err(|e| BridgeError::Transport(format!("failed to bind {listen_addr}: {e}")))?;

    info!(listen_addr, "ingestion server listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| BridgeError::Transport(format!("server error: {e}")))?;

    Ok(())
}

fn router(bridge: Bridge) -> Router {
    Router::new()
        .route("/print", post(print))
        .route("/status", get(status))
        .layer(TraceLayer::new_for_http())
        .with_state(bridge)
}

async fn print(State(bridge): State<Bridge>, body: axum::body::Bytes) -> Response {
    match bridge.submit(&body) {
        Ok(job_ref) => (StatusCode::ACCEPTED, Json(json!({ "job_ref": job_ref }))).into_response(),
        Err(e) => error_response(e),
    }
}

async fn status(State(bridge): State<Bridge>) -> Response {
    Json(bridge.status()).into_response()
}

fn error_response(error: BridgeError) -> Response {
    let code = match &error {
        BridgeError::MalformedElement(_)
        | BridgeError::InvalidPayload(_)
        | BridgeError::InvalidBitmapDimensions { .. }
        | BridgeError::BitmapDataLength { .. }
        | BridgeError::Json(_) => StatusCode::BAD_REQUEST,
        BridgeError::Transport(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (code, Json(json!({ "error": error.to_string() }))).into_response()
}
