use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded resume as persisted in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeImage {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub image_base64: String,
    pub upload_date: DateTime<Utc>,
}

impl ResumeImage {
    /// Decodes the stored payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.image_base64.as_bytes())
    }
}

/// A resume file buffered from a multipart upload.
#[derive(Debug, Clone)]
pub struct NewResumeImage {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl NewResumeImage {
    pub fn encode(&self) -> String {
        STANDARD.encode(&self.data)
    }
}
