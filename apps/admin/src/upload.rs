//! Applicant form uploads.
//!
//! The resume is buffered whole in memory; the router's `DefaultBodyLimit` is the
//! only bound on its size.

use axum::extract::multipart::{Multipart, MultipartError};
use tracing::{debug, info};

use crate::models::{NewApplicant, NewResumeImage, NO_RESUME};
use crate::store::{DocumentStore, StoreError};

pub const RESUME_FIELD: &str = "resume";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Default)]
pub struct ApplicantSubmission {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub resume: Option<NewResumeImage>,
}

impl ApplicantSubmission {
    /// Combines the form fields with the stored resume reference.
    pub fn into_applicant(self, resume_id: String) -> NewApplicant {
        NewApplicant {
            name: self.name,
            age: self.age,
            gender: self.gender,
            phone: self.phone,
            address: self.address,
            resume_id,
        }
    }
}

/// Drains the multipart stream into an [`ApplicantSubmission`].
///
/// A file part with no filename and no bytes is what browsers send when no file
/// was chosen, so it counts as "no resume".
pub async fn read_submission(
    mut multipart: Multipart,
) -> Result<ApplicantSubmission, MultipartError> {
    let mut submission = ApplicantSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            RESUME_FIELD => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await?;

                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                submission.resume = Some(NewResumeImage {
                    filename,
                    content_type,
                    data,
                });
            }
            "name" => submission.name = field.text().await?,
            "age" => submission.age = field.text().await?,
            "gender" => submission.gender = field.text().await?,
            "phone" => submission.phone = field.text().await?,
            "address" => submission.address = field.text().await?,
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(submission)
}

/// Stores the resume, if any, and returns the reference to put on the applicant row.
pub async fn store_resume(
    documents: &dyn DocumentStore,
    resume: Option<&NewResumeImage>,
) -> Result<String, StoreError> {
    match resume {
        Some(file) => {
            let id = documents.create(file).await?;
            info!("Resume '{}' stored as {id}", file.filename);
            Ok(id)
        }
        None => Ok(NO_RESUME.to_string()),
    }
}
