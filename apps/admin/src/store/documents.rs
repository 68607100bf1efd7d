use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::{NewResumeImage, ResumeImage};
use crate::store::{DocumentStore, StoreError};

const SUPPORTED_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

/// Whether `url` names a database this store can open.
pub fn is_supported_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    SUPPORTED_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// Resume store backed by its own database, separate from the relational records.
///
/// If the store could not be reached at startup it stays disconnected for the
/// life of the process and every call fails with `Unavailable`.
pub struct PgDocumentStore {
    pool: Option<PgPool>,
}

impl PgDocumentStore {
    pub async fn connect(url: Option<&str>) -> Self {
        let Some(url) = url else {
            warn!("DOCUMENT_STORE_URL is not set; resume uploads and downloads are disabled");
            return Self::disconnected();
        };
        if !is_supported_url(url) {
            let scheme = url.split("://").next().unwrap_or_default();
            error!(
                "DOCUMENT_STORE_URL must be a postgres:// URL, got a '{scheme}' URL; \
                 resume uploads and downloads are disabled"
            );
            return Self::disconnected();
        }

        match PgPoolOptions::new().max_connections(5).connect(url).await {
            Ok(pool) => {
                info!("Document store connected");
                Self { pool: Some(pool) }
            }
            Err(e) => {
                error!("Document store connection failed: {e}");
                Self::disconnected()
            }
        }
    }

    pub fn disconnected() -> Self {
        Self { pool: None }
    }

    fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("document store is not connected".to_string()))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, image: &NewResumeImage) -> Result<String, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO resume_images (id, filename, content_type, image_base64)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(&image.filename)
        .bind(&image.content_type)
        .bind(image.encode())
        .execute(self.pool()?)
        .await?;

        info!(
            "Stored resume {id} ({}, {} bytes)",
            image.filename,
            image.data.len()
        );
        Ok(id.to_string())
    }

    async fn fetch(&self, id: &str) -> Result<ResumeImage, StoreError> {
        // Applicant rows carry ids as text; anything unparseable cannot exist.
        let Ok(id) = Uuid::parse_str(id) else {
            return Err(StoreError::NotFound);
        };

        sqlx::query_as::<_, ResumeImage>(
            r#"
            SELECT id, filename, content_type, image_base64, upload_date
            FROM resume_images
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool()?)
        .await?
        .ok_or(StoreError::NotFound)
    }
}
