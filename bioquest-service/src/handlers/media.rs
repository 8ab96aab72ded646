use crate::models::{MediaUrl, TopicQuery};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use service_core::error::AppError;

/// `GET /image?topic=` → first image URL, or `""` when nothing matched.
pub async fn image(
    State(state): State<AppState>,
    Query(query): Query<TopicQuery>,
) -> Result<Json<MediaUrl>, AppError> {
    let url = state
        .image_provider
        .first_image_url(&query.topic)
        .await
        .map_err(|e| {
            tracing::warn!(topic = %query.topic, error = %e, "Image lookup failed");
            AppError::from(e)
        })?;

    Ok(Json(MediaUrl::from_option(url)))
}

/// `GET /video?topic=` → watch URL of the first video, or `""`.
pub async fn video(
    State(state): State<AppState>,
    Query(query): Query<TopicQuery>,
) -> Result<Json<MediaUrl>, AppError> {
    let url = state
        .video_provider
        .first_video_url(&query.topic)
        .await
        .map_err(|e| {
            tracing::warn!(topic = %query.topic, error = %e, "Video lookup failed");
            AppError::from(e)
        })?;

    Ok(Json(MediaUrl::from_option(url)))
}
