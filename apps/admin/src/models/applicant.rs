use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Resume reference stored for applicants who submitted no file.
pub const NO_RESUME: &str = "no_file";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Applicant {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub phone: String,
    pub address: String,
    /// Document id of the stored resume, or [`NO_RESUME`].
    pub resume_id: String,
    pub created_at: DateTime<Utc>,
}

/// Applicant fields as submitted by the public form.
///
/// `age` stays textual: the `applicants.age` column cast is what rejects
/// non-numeric input.
#[derive(Debug, Clone)]
pub struct NewApplicant {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub resume_id: String,
}
