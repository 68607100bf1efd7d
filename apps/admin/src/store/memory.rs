//! In-memory stores for exercising the router without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{
    Applicant, Inquiry, NewApplicant, NewNotice, NewResumeImage, Notice, ResumeImage,
};
use crate::store::{DocumentStore, LinkState, RecordStore, StoreError};

#[derive(Default)]
pub struct MemoryRecordStore {
    notices: Mutex<Vec<Notice>>,
    applicants: Mutex<Vec<Applicant>>,
    inquiries: Mutex<Vec<Inquiry>>,
    offline: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inquiries(titles: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut inquiries = store.inquiries.lock().unwrap();
            for (i, title) in titles.iter().enumerate() {
                inquiries.push(Inquiry(json!({
                    "id": i as i64 + 1,
                    "name": "문의자",
                    "title": title,
                    "message": format!("{title} 본문"),
                })));
            }
        }
        store
    }

    /// Simulates a dropped connection: every call fails with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn applicants(&self) -> Vec<Applicant> {
        self.applicants.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert_notice(&self, notice: &NewNotice) -> Result<(), StoreError> {
        self.check()?;
        let (Some(title), Some(content)) = (&notice.title, &notice.content) else {
            return Err(StoreError::Constraint(
                "null value in column violates not-null constraint".to_string(),
            ));
        };
        let mut notices = self.notices.lock().unwrap();
        let id = notices.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        notices.push(Notice {
            id,
            title: title.clone(),
            content: content.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_notices(&self, limit: i64) -> Result<Vec<Notice>, StoreError> {
        self.check()?;
        let mut notices = self.notices.lock().unwrap().clone();
        notices.sort_by(|a, b| b.id.cmp(&a.id));
        notices.truncate(limit.max(0) as usize);
        Ok(notices)
    }

    async fn delete_notice(&self, id: i32) -> Result<(), StoreError> {
        self.check()?;
        self.notices.lock().unwrap().retain(|n| n.id != id);
        Ok(())
    }

    async fn list_applicants(&self) -> Result<Vec<Applicant>, StoreError> {
        self.check()?;
        let mut applicants = self.applicants();
        applicants.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(applicants)
    }

    async fn insert_applicant(&self, applicant: &NewApplicant) -> Result<(), StoreError> {
        self.check()?;
        let age = applicant.age.trim().parse::<i32>().map_err(|_| {
            StoreError::Constraint(format!("invalid input syntax for integer: {:?}", applicant.age))
        })?;
        let mut applicants = self.applicants.lock().unwrap();
        let id = applicants.len() as i32 + 1;
        applicants.push(Applicant {
            id,
            name: applicant.name.clone(),
            age,
            gender: applicant.gender.clone(),
            phone: applicant.phone.clone(),
            address: applicant.address.clone(),
            resume_id: applicant.resume_id.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, StoreError> {
        self.check()?;
        let mut inquiries = self.inquiries.lock().unwrap().clone();
        inquiries.sort_by_key(|i| std::cmp::Reverse(inquiry_id(i)));
        Ok(inquiries)
    }

    async fn get_inquiry(&self, id: i64) -> Result<Inquiry, StoreError> {
        self.check()?;
        self.inquiries
            .lock()
            .unwrap()
            .iter()
            .find(|i| inquiry_id(i) == Some(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn link_state(&self) -> LinkState {
        if self.offline.load(Ordering::SeqCst) {
            LinkState::Disconnected
        } else {
            LinkState::Connected
        }
    }
}

fn inquiry_id(inquiry: &Inquiry) -> Option<i64> {
    inquiry.0.get("id").and_then(Value::as_i64)
}

#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<String, ResumeImage>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, image: &NewResumeImage) -> Result<String, StoreError> {
        let id = Uuid::new_v4();
        self.documents.lock().unwrap().insert(
            id.to_string(),
            ResumeImage {
                id,
                filename: image.filename.clone(),
                content_type: image.content_type.clone(),
                image_base64: image.encode(),
                upload_date: Utc::now(),
            },
        );
        Ok(id.to_string())
    }

    async fn fetch(&self, id: &str) -> Result<ResumeImage, StoreError> {
        self.documents
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}
