use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::notifications::dispatcher::DispatchError;
use crate::notifications::types::NotificationRequest;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub channel: String,
    pub message_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "bluebot notification service",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn slack_health(State(state): State<AppState>) -> Response {
    if state.delivery.test_auth().await {
        (StatusCode::OK, Json(serde_json::json!({"slack": "ok"}))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({"slack": "unreachable"})),
        )
            .into_response()
    }
}

pub async fn notify(
    State(state): State<AppState>,
    Json(payload): Json<NotificationRequest>,
) -> Response {
    match state.dispatcher.dispatch(&payload).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(NotificationResponse {
                success: true,
                channel: receipt.channel,
                message_id: receipt.message_id,
            }),
        )
            .into_response(),
        // Validation detail is safe to echo; everything else surfaces a
        // generic message with the detail kept in logs.
        Err(DispatchError::Validation(detail)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: detail }),
        )
            .into_response(),
        Err(DispatchError::DestinationNotFound { .. } | DispatchError::Delivery(_)) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: "notification delivery failed".to_string(),
            }),
        )
            .into_response(),
        Err(DispatchError::Unexpected(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "internal server error".to_string(),
            }),
        )
            .into_response(),
    }
}
