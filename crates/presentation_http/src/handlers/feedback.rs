//! Feedback handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use super::common::{liked_flag, username_text};
use crate::{error::ApiError, middleware::ApiJson, state::AppState};

/// Feedback submission body
///
/// Both fields are loosely typed; see [`liked_flag`] for how `liked` is read.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[schema(example = json!({"username": "ana", "liked": 1}))]
pub struct FeedbackRequest {
    /// Stored as "anonymous" when missing or blank
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub username: Option<Value>,
    /// Boolean, number or numeric string; missing means disliked
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub liked: Option<Value>,
}

/// Acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"status": "ok"}))]
pub struct FeedbackAck {
    pub status: &'static str,
}

/// Like/dislike totals
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"liked": 3, "disliked": 2}))]
pub struct FeedbackStatsResponse {
    pub liked: u64,
    pub disliked: u64,
}

/// Record a like or dislike
///
/// POST /v1/feedback
#[utoipa::path(
    post,
    path = "/v1/feedback",
    tag = "feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Feedback recorded", body = FeedbackAck),
        (status = 400, description = "Malformed JSON body", body = crate::error::ErrorResponse),
        (status = 413, description = "Body exceeds the size limit", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<FeedbackRequest>,
) -> Result<Json<FeedbackAck>, ApiError> {
    let liked = liked_flag(request.liked.as_ref());
    let id = state
        .feedback
        .submit(username_text(request.username.as_ref()), liked)
        .await?;
    debug!(feedback_id = %id, liked, "Feedback submitted");

    Ok(Json(FeedbackAck { status: "ok" }))
}

/// Totals of all feedback so far
///
/// GET /v1/feedback/stats
#[utoipa::path(
    get,
    path = "/v1/feedback/stats",
    tag = "feedback",
    responses(
        (status = 200, description = "Feedback totals", body = FeedbackStatsResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn feedback_stats(
    State(state): State<AppState>,
) -> Result<Json<FeedbackStatsResponse>, ApiError> {
    let totals = state.query.feedback_totals().await?;
    Ok(Json(FeedbackStatsResponse {
        liked: totals.liked,
        disliked: totals.disliked,
    }))
}
