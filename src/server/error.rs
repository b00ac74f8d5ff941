use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::pipeline::StageKind;

/// Failures a route can report. Anything the model provider throws becomes
/// a 502 naming the stage it broke.
#[derive(Debug)]
pub enum ApiError {
    Provider {
        stage: String,
        error: anyhow::Error,
    },
    BuildFailed {
        stage: StageKind,
        error: String,
        completed_stages: usize,
    },
    BuildInProgress,
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn provider(stage: impl Into<String>) -> impl FnOnce(anyhow::Error) -> Self {
        let stage = stage.into();
        move |error| ApiError::Provider { stage, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Provider { stage, error } => {
                tracing::error!(%stage, error = %format!("{error:#}"), "provider call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": format!("{error:#}"), "stage": stage }),
                )
            }
            ApiError::BuildFailed {
                stage,
                error,
                completed_stages,
            } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "status": "failed",
                    "error": error,
                    "stage": stage,
                    "completed_stages": completed_stages,
                }),
            ),
            ApiError::BuildInProgress => (
                StatusCode::CONFLICT,
                json!({ "error": "A build is already running" }),
            ),
            ApiError::Internal(error) => {
                tracing::error!(error = %format!("{error:#}"), "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("{error:#}") }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal(error)
    }
}
