//! Invitation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the family_invitations table
#[derive(Debug, Clone, FromRow)]
pub struct InvitationModel {
    pub id: i64,
    pub family_id: i64,
    pub token: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub message: Option<String>,
    pub accepted_by: Option<i64>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

