//! Family member database model

use chrono::{DateTime, NaiveDate, Utc};
use sanskaar_core::MarriageDetails;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the family_members table
#[derive(Debug, Clone, FromRow)]
pub struct FamilyMemberModel {
    pub id: i64,
    pub family_id: i64,
    pub user_id: Option<i64>,
    pub display_name: String,
    pub relation: String,
    pub birthdate: Option<NaiveDate>,
    pub deathdate: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub gender: String,
    pub photo_url: Option<String>,
    pub occupation: Option<String>,
    pub notes: Option<String>,
    pub is_alive: bool,
    pub marriage_details: Option<Json<MarriageDetails>>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
