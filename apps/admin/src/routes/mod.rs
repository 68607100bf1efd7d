pub mod applicants;
pub mod health;
pub mod inquiries;
pub mod notices;
pub mod resumes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// `{"message": ...}` acknowledgement returned by admin writes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

const INDEX_PAGE: &str = "index.html";

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let index_page = ServeFile::new(state.config.static_dir.join(INDEX_PAGE));
    let upload_limit = state.config.upload_limit_bytes;

    Router::new()
        .route_service("/", index_page)
        .route("/health", get(health::health_handler))
        // Applicant-facing
        .route("/submit", post(resumes::handle_submit))
        .route("/download/:id", get(resumes::handle_download))
        // Admin API
        .route(
            "/api/admin/notices",
            get(notices::handle_list_notices).post(notices::handle_create_notice),
        )
        .route(
            "/api/admin/notices/:id",
            delete(notices::handle_delete_notice),
        )
        .route("/api/applicants", get(applicants::handle_list_applicants))
        .route(
            "/api/admin/inquiries",
            get(inquiries::handle_list_inquiries),
        )
        .route(
            "/api/admin/inquiries/:id",
            get(inquiries::handle_get_inquiry),
        )
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
