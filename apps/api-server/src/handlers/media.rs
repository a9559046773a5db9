//! Media retrieval handler.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/media/{media_id}
pub async fn media_get(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let media_id = path.into_inner();
    let object = state
        .media
        .get(media_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("media {media_id} not found")))?;

    Ok(HttpResponse::Ok()
        .content_type(object.content_type)
        .body(object.bytes))
}
