use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub consultant_id: Uuid,
    pub user_id: Option<Uuid>,
    pub consultation_id: Option<Uuid>,
    pub review_type: String,
    pub score: i32,
    pub comment: String,
    pub meta: Option<Value>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Pending review joined with the reviewed consultant's name (admin queue).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PendingReviewRow {
    pub id: Uuid,
    pub consultant_id: Uuid,
    pub consultant_name: String,
    pub review_type: String,
    pub score: i32,
    pub comment: String,
    pub meta: Option<Value>,
    pub created_at: DateTime<Utc>,
}
