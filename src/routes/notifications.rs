use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::dispatcher::{DispatchError, DispatchResult, Dispatcher};

#[derive(Serialize)]
pub struct NotificationResponse {
    success: bool,
    message: &'static str,
    stats: DispatchResult,
}

#[tracing::instrument(name = "Sending launch notifications", skip(dispatcher, body))]
pub async fn send_notification(
    State(dispatcher): State<Arc<Dispatcher>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<NotificationResponse>, DispatchError> {
    // An unreadable body carries no secret, so it ends up unauthorized.
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(%rejection, "Request body is not valid JSON");
            Value::Null
        }
    };

    let stats = dispatcher.dispatch(&request).await?;

    Ok(Json(NotificationResponse {
        success: true,
        message: "Notifications sent successfully",
        stats,
    }))
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        match &self {
            DispatchError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": self.to_string() })),
            ),
            DispatchError::MissingSubscribers => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            ),
            DispatchError::UnexpectedError(error) => {
                tracing::error!("{:?}", self);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to send notifications",
                        "details": format!("{:#}", error),
                    })),
                )
            }
        }
        .into_response()
    }
}
