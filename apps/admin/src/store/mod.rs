//! Storage seams for the admin service.
//!
//! Handlers only see the [`RecordStore`] and [`DocumentStore`] traits, carried in
//! `AppState` as `Arc<dyn ...>`. The PostgreSQL implementations live in
//! [`postgres`] and [`documents`]; the relational connection itself is owned by
//! the [`supervisor`].

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Applicant, Inquiry, NewApplicant, NewNotice, NewResumeImage, Notice, ResumeImage,
};

pub mod documents;
#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod supervisor;

pub use supervisor::LinkState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("record not found")]
    NotFound,

    #[error("driver error: {0}")]
    Driver(String),
}

/// Relational records: notices, applicants and inquiries.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_notice(&self, notice: &NewNotice) -> Result<(), StoreError>;

    /// Newest first, at most `limit` rows.
    async fn list_notices(&self, limit: i64) -> Result<Vec<Notice>, StoreError>;

    /// Succeeds whether or not a row matched.
    async fn delete_notice(&self, id: i32) -> Result<(), StoreError>;

    async fn list_applicants(&self) -> Result<Vec<Applicant>, StoreError>;

    async fn insert_applicant(&self, applicant: &NewApplicant) -> Result<(), StoreError>;

    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, StoreError>;

    async fn get_inquiry(&self, id: i64) -> Result<Inquiry, StoreError>;

    fn link_state(&self) -> LinkState;
}

/// Write-once storage for uploaded resumes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores the file and returns its generated id.
    async fn create(&self, image: &NewResumeImage) -> Result<String, StoreError>;

    async fn fetch(&self, id: &str) -> Result<ResumeImage, StoreError>;
}

/// How a PostgreSQL SQLSTATE should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connectivity,
    Constraint,
    MissingTable,
    Other,
}

pub fn classify_sqlstate(code: &str) -> FailureKind {
    match code {
        // admin_shutdown, crash_shutdown, cannot_connect_now
        "57P01" | "57P02" | "57P03" => FailureKind::Connectivity,
        "42P01" => FailureKind::MissingTable,
        _ if code.starts_with("08") || code.starts_with("53") => FailureKind::Connectivity,
        _ if code.starts_with("22") || code.starts_with("23") => FailureKind::Constraint,
        _ => FailureKind::Other,
    }
}

/// SQLSTATE of a database error, if the driver reported one.
pub fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// Whether a failed query means the connection itself is gone.
///
/// A saturated pool (`PoolTimedOut`) or one being shut down (`PoolClosed`) is
/// unavailable for this request only; the pool's connections are still alive and
/// the liveness probe decides whether to reconnect.
pub fn indicates_lost_connection(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(_) => {
            sqlstate(err).as_deref().map(classify_sqlstate) == Some(FailureKind::Connectivity)
        }
        _ => false,
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            sqlx::Error::Database(_) => match sqlstate(&err).as_deref().map(classify_sqlstate) {
                Some(FailureKind::Connectivity) => StoreError::Unavailable(err.to_string()),
                Some(FailureKind::Constraint) => StoreError::Constraint(err.to_string()),
                _ => StoreError::Driver(err.to_string()),
            },
            _ => StoreError::Driver(err.to_string()),
        }
    }
}
