//! Relationship database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for the family_relationships table
#[derive(Debug, Clone, FromRow)]
pub struct RelationshipModel {
    pub id: i64,
    pub family_id: i64,
    pub from_member_id: i64,
    pub to_member_id: i64,
    pub relation_type: String,
    pub meta: Option<serde_json::Value>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}
