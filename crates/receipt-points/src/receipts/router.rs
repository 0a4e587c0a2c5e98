//! HTTP endpoints for submitting receipts and reading their points.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{ReceiptId, ReceiptSubmission};
use super::service::{ReceiptPointsService, ReceiptServiceError};
use super::store::{ReceiptStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReceiptResponse {
    pub id: ReceiptId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// Router exposing receipt submission and points lookup.
pub fn receipt_router<S>(service: Arc<ReceiptPointsService<S>>) -> Router
where
    S: ReceiptStore + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<S>))
        .route("/receipts/:id/points", get(points_handler::<S>))
        .with_state(service)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn process_handler<S>(
    State(service): State<Arc<ReceiptPointsService<S>>>,
    payload: Result<Json<ReceiptSubmission>, JsonRejection>,
) -> Response
where
    S: ReceiptStore + 'static,
{
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!(
                    "failed to parse process receipt request, {}",
                    rejection.body_text()
                ),
            );
        }
    };

    match service.submit(submission) {
        Ok(id) => (StatusCode::OK, Json(ProcessReceiptResponse { id })).into_response(),
        Err(ReceiptServiceError::Invalid(err)) => error_response(
            StatusCode::BAD_REQUEST,
            format!("invalid process receipt request, {err}"),
        ),
        Err(other) => {
            error!(error = %other, "failed to store receipt");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

pub(crate) async fn points_handler<S>(
    State(service): State<Arc<ReceiptPointsService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: ReceiptStore + 'static,
{
    match service.points(&ReceiptId(id)) {
        Ok(points) => (StatusCode::OK, Json(PointsResponse { points })).into_response(),
        Err(ReceiptServiceError::Store(err @ StoreError::NotFound(_))) => {
            error_response(StatusCode::NOT_FOUND, err.to_string())
        }
        Err(other) => {
            error!(error = %other, "failed to look up receipt points");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
