use std::sync::Arc;

use crate::config::Config;
use crate::store::{DocumentStore, RecordStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Notices, applicants and inquiries. Default: `PgRecordStore` over the supervised pool.
    pub records: Arc<dyn RecordStore>,
    /// Uploaded resumes. Default: `PgDocumentStore`.
    pub documents: Arc<dyn DocumentStore>,
    pub config: Config,
}
