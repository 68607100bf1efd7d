use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::notice::NOTICE_LIST_LIMIT;
use crate::models::{NewNotice, Notice};
use crate::routes::MessageResponse;
use crate::state::AppState;

/// POST /api/admin/notices
pub async fn handle_create_notice(
    State(state): State<AppState>,
    payload: Result<Json<NewNotice>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(notice) = payload?;
    state.records.insert_notice(&notice).await?;
    info!(
        "Notice created: {}",
        notice.title.as_deref().unwrap_or_default()
    );
    Ok(Json(MessageResponse::new("등록 완료")))
}

/// GET /api/admin/notices
pub async fn handle_list_notices(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notice>>, AppError> {
    Ok(Json(state.records.list_notices(NOTICE_LIST_LIMIT).await?))
}

/// DELETE /api/admin/notices/:id
///
/// Idempotent: an id that matches nothing, or is not a number at all, still
/// reports success.
pub async fn handle_delete_notice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    match id.trim().parse::<i32>() {
        Ok(id) => {
            state.records.delete_notice(id).await?;
            info!("Notice {id} deleted");
        }
        Err(_) => debug!("Delete for non-numeric notice id '{id}' matches nothing"),
    }
    Ok(Json(MessageResponse::new("삭제 완료")))
}
