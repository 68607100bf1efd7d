use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::Inquiry;
use crate::state::AppState;

/// GET /api/admin/inquiries
pub async fn handle_list_inquiries(
    State(state): State<AppState>,
) -> Result<Json<Vec<Inquiry>>, AppError> {
    Ok(Json(state.records.list_inquiries().await?))
}

/// GET /api/admin/inquiries/:id
pub async fn handle_get_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Inquiry>, AppError> {
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::NotFound("없음".to_string()))?;
    Ok(Json(state.records.get_inquiry(id).await?))
}
