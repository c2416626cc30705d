use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsultationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub consultant_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
    pub theme: Option<String>,
    pub meeting_method: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Consultation joined with the requesting user's name (dashboard view).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DashboardConsultationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
    pub theme: Option<String>,
    pub meeting_method: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
