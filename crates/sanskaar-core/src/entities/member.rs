//! Family member entity - a person record inside a family
//!
//! A member may be linked to a platform account (`user_id`), or be a purely
//! genealogical record with no login.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum length of a member display name
pub const MAX_DISPLAY_NAME_LEN: usize = 100;

/// Relation of a member to the family's reference person
///
/// Unknown labels deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRelation {
    /// The reference person ("self")
    #[serde(rename = "self")]
    Ego,
    Parent,
    Child,
    Spouse,
    Sibling,
    Grandparent,
    Grandchild,
    #[default]
    #[serde(other)]
    Other,
}

impl MemberRelation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ego => "self",
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
            Self::Grandparent => "grandparent",
            Self::Grandchild => "grandchild",
            Self::Other => "other",
        }
    }

    /// Parse a stored label; anything unrecognised is `Other`
    pub fn from_label(value: &str) -> Self {
        match value {
            "self" => Self::Ego,
            "parent" => Self::Parent,
            "child" => Self::Child,
            "spouse" => Self::Spouse,
            "sibling" => Self::Sibling,
            "grandparent" => Self::Grandparent,
            "grandchild" => Self::Grandchild,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unspecified,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::Unspecified => "unspecified",
        }
    }

    pub fn from_label(value: &str) -> Self {
        match value {
            "male" => Self::Male,
            "female" => Self::Female,
            "other" => Self::Other,
            _ => Self::Unspecified,
        }
    }
}

/// Marriage record attached to a member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarriageDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<Snowflake>,
}

/// Family member entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMember {
    pub id: Snowflake,
    pub family_id: Snowflake,
    pub user_id: Option<Snowflake>,
    pub display_name: String,
    pub relation: MemberRelation,
    pub birthdate: Option<NaiveDate>,
    pub deathdate: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub gender: Gender,
    pub photo_url: Option<String>,
    pub occupation: Option<String>,
    pub notes: Option<String>,
    pub is_alive: bool,
    pub marriage_details: Option<MarriageDetails>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FamilyMember {
    /// Create a new member with default relation, gender, and liveness
    pub fn new(
        id: Snowflake,
        family_id: Snowflake,
        display_name: String,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            family_id,
            user_id: None,
            display_name,
            relation: MemberRelation::default(),
            birthdate: None,
            deathdate: None,
            birth_place: None,
            gender: Gender::default(),
            photo_url: None,
            occupation: None,
            notes: None,
            is_alive: true,
            marriage_details: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_relation(mut self, relation: MemberRelation) -> Self {
        self.relation = relation;
        self
    }

    /// Trim and check a display name
    pub fn validate_display_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError(
                "Display name must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(DomainError::ValidationError(format!(
                "Display name must be at most {MAX_DISPLAY_NAME_LEN} characters"
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Check that birth and death dates are ordered
    pub fn validate_dates(&self) -> Result<(), DomainError> {
        match (self.birthdate, self.deathdate) {
            (Some(born), Some(died)) if died < born => Err(DomainError::InvalidDateRange),
            _ => Ok(()),
        }
    }

    /// Whether this record is also a login-capable platform user
    #[inline]
    pub fn has_account(&self) -> bool {
        self.user_id.is_some()
    }

    /// Record a death date; a deceased member is never alive
    pub fn mark_deceased(&mut self, deathdate: Option<NaiveDate>) {
        self.is_alive = false;
        self.deathdate = deathdate;
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
