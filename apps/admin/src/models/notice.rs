use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Number of notices returned by the admin listing.
pub const NOTICE_LIST_LIMIT: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notice {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/admin/notices`.
///
/// Missing fields stay `None` and are bound as NULL, so the table's `NOT NULL`
/// constraint is what rejects them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewNotice {
    pub title: Option<String>,
    pub content: Option<String>,
}
