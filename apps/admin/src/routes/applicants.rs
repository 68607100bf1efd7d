use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::Applicant;
use crate::state::AppState;

/// GET /api/applicants
pub async fn handle_list_applicants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Applicant>>, AppError> {
    Ok(Json(state.records.list_applicants().await?))
}
