use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A rendered, job-tailored resume kept for later retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub company: Option<String>,
    pub content: String,
    pub s3_key: String,
    pub created_at: DateTime<Utc>,
}
