//! Path parameter extractors
//!
//! Ids arrive as decimal strings and are parsed into Snowflakes here so a
//! malformed id is a 400 rather than a 404.

use sanskaar_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with family_id
#[derive(Debug, Deserialize)]
pub struct FamilyIdPath {
    pub family_id: String,
}

impl FamilyIdPath {
    pub fn family_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.family_id, "family_id")
    }
}

/// Path parameters with family_id and a roster user_id
#[derive(Debug, Deserialize)]
pub struct FamilyUserPath {
    pub family_id: String,
    pub user_id: String,
}

impl FamilyUserPath {
    pub fn family_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.family_id, "family_id")
    }

    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// Path parameters with family_id and member_id
#[derive(Debug, Deserialize)]
pub struct FamilyMemberPath {
    pub family_id: String,
    pub member_id: String,
}

impl FamilyMemberPath {
    pub fn family_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.family_id, "family_id")
    }

    pub fn member_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.member_id, "member_id")
    }
}

/// Path parameters with family_id and relationship_id
#[derive(Debug, Deserialize)]
pub struct RelationshipPath {
    pub family_id: String,
    pub relationship_id: String,
}

impl RelationshipPath {
    pub fn family_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.family_id, "family_id")
    }

    pub fn relationship_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.relationship_id, "relationship_id")
    }
}

/// Path parameters with family_id and invitation_id
#[derive(Debug, Deserialize)]
pub struct InvitationIdPath {
    pub family_id: String,
    pub invitation_id: String,
}

impl InvitationIdPath {
    pub fn family_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.family_id, "family_id")
    }

    pub fn invitation_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.invitation_id, "invitation_id")
    }
}

/// Path parameters for an invitation token
#[derive(Debug, Deserialize)]
pub struct InvitationTokenPath {
    pub token: String,
}

impl InvitationTokenPath {
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Path parameters with tree_id
#[derive(Debug, Deserialize)]
pub struct LegacyTreePath {
    pub tree_id: String,
}

impl LegacyTreePath {
    pub fn tree_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.tree_id, "tree_id")
    }
}
