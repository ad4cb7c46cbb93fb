//! Family and roster database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the families table
#[derive(Debug, Clone, FromRow)]
pub struct FamilyModel {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub invite_code: String,
    pub description: Option<String>,
    pub privacy: String,
    pub allow_member_invite: bool,
    pub auto_approve_members: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the family_memberships table
#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub family_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}
