//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names are camelCase on the wire.

use chrono::NaiveDate;
use sanskaar_core::entities::{
    FamilyPrivacy, FamilyRole, Gender, LegacyNodeLink, MarriageDetails, MemberRelation,
    RelationType,
};
use sanskaar_core::Snowflake;
use serde::{Deserialize, Deserializer};
use validator::Validate;

// ============================================================================
// Family Requests
// ============================================================================

/// Create family request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyRequest {
    #[validate(length(min = 1, max = 100, message = "Family name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Join a family by its invite code
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinFamilyRequest {
    #[validate(length(min = 1, max = 32, message = "Invite code must be 1-32 characters"))]
    pub invite_code: String,
}

/// Partial settings update; absent switches keep their value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySettingsPatch {
    pub allow_member_invite: Option<bool>,
    pub auto_approve_members: Option<bool>,
}

/// Update family request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFamilyRequest {
    #[validate(length(min = 1, max = 100, message = "Family name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub privacy: Option<FamilyPrivacy>,

    pub settings: Option<FamilySettingsPatch>,
}

/// Change a roster entry's role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRosterRoleRequest {
    pub role: FamilyRole,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Add a person to the family tree
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,

    /// Platform account of the person, if they have one
    pub user_id: Option<Snowflake>,

    pub relation: Option<MemberRelation>,

    pub birthdate: Option<NaiveDate>,

    pub deathdate: Option<NaiveDate>,

    #[validate(length(max = 200, message = "Birth place must be at most 200 characters"))]
    pub birth_place: Option<String>,

    pub gender: Option<Gender>,

    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: Option<String>,

    #[validate(length(max = 200, message = "Occupation must be at most 200 characters"))]
    pub occupation: Option<String>,

    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<String>,

    pub is_alive: Option<bool>,

    pub marriage_details: Option<MarriageDetails>,
}

/// Partial member update
///
/// Absent fields are left alone. The nullable fields also accept an explicit
/// `null`, which clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub user_id: Option<Option<Snowflake>>,

    pub relation: Option<MemberRelation>,

    #[serde(default, deserialize_with = "nullable")]
    pub birthdate: Option<Option<NaiveDate>>,

    pub deathdate: Option<NaiveDate>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 200, message = "Birth place must be at most 200 characters"))]
    pub birth_place: Option<Option<String>>,

    pub gender: Option<Gender>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 200, message = "Occupation must be at most 200 characters"))]
    pub occupation: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<Option<String>>,

    pub is_alive: Option<bool>,

    #[serde(default, deserialize_with = "nullable")]
    pub marriage_details: Option<Option<MarriageDetails>>,
}

/// A present field, `null` included, becomes `Some`; an absent one falls back
/// to `#[serde(default)]`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Relationship Requests
// ============================================================================

/// Add a directed edge between two members
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationshipRequest {
    pub from_member_id: Snowflake,

    pub to_member_id: Snowflake,

    pub relation_type: RelationType,

    /// Free-form payload stored untouched
    pub meta: Option<serde_json::Value>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

// ============================================================================
// Invitation Requests
// ============================================================================

/// Issue a single-use invitation token
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 20, message = "Phone must be 5-20 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,

    #[validate(range(min = 1, max = 720, message = "ttlHours must be 1-720"))]
    pub ttl_hours: Option<i64>,
}

// ============================================================================
// Legacy Tree Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLegacyTreeRequest {
    #[validate(length(min = 1, max = 100, message = "Tree name must be 1-100 characters"))]
    pub name: String,
}

/// Append one inline node to a legacy tree
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppendLegacyNodeRequest {
    #[validate(length(min = 1, max = 64, message = "Node id must be 1-64 characters"))]
    pub id: String,

    #[validate(length(min = 1, max = 100, message = "Node name must be 1-100 characters"))]
    pub name: String,

    pub photo: Option<String>,

    pub voice_clip: Option<String>,

    #[validate(length(max = 5000, message = "Bio must be at most 5000 characters"))]
    pub bio: Option<String>,

    #[serde(default)]
    pub relationships: Vec<LegacyNodeLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_family_validation() {
        let ok = CreateFamilyRequest {
            name: "Deshpande".to_string(),
            description: None,
        };
        assert!(ok.validate().is_ok());

        let empty = CreateFamilyRequest {
            name: String::new(),
            description: None,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_member_request_defaults_and_unknown_relation() {
        let request: CreateMemberRequest = serde_json::from_str(
            r#"{"displayName": "Aaji", "relation": "great-aunt", "birthdate": "1941-03-09"}"#,
        )
        .unwrap();
        assert_eq!(request.relation, Some(MemberRelation::Other));
        assert_eq!(request.birthdate, NaiveDate::from_ymd_opt(1941, 3, 9));
        assert!(request.gender.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_member_request_rejects_bad_photo_url() {
        let request: CreateMemberRequest =
            serde_json::from_str(r#"{"displayName": "Aaji", "photoUrl": "not a url"}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_member_update_tells_null_from_absent() {
        let request: UpdateMemberRequest = serde_json::from_str(
            r#"{"occupation": null, "notes": "Moved to Nagpur", "photoUrl": null}"#,
        )
        .unwrap();
        assert_eq!(request.occupation, Some(None));
        assert_eq!(request.notes, Some(Some("Moved to Nagpur".to_string())));
        assert_eq!(request.photo_url, Some(None));
        assert_eq!(request.birth_place, None);
        assert_eq!(request.user_id, None);
        assert!(request.validate().is_ok());

        let bad: UpdateMemberRequest =
            serde_json::from_str(r#"{"photoUrl": "not a url"}"#).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_relationship_request_parses_ids_and_type() {
        let request: CreateRelationshipRequest = serde_json::from_str(
            r#"{"fromMemberId": "11", "toMemberId": "12", "relationType": "adopted_parent",
                "meta": {"court": "Pune"}}"#,
        )
        .unwrap();
        assert_eq!(request.from_member_id, Snowflake::new(11));
        assert_eq!(request.relation_type, RelationType::AdoptedParent);
        assert!(request.meta.is_some());
    }

    #[test]
    fn test_invitation_ttl_bounds() {
        let too_long = CreateInvitationRequest {
            ttl_hours: Some(721),
            ..Default::default()
        };
        assert!(too_long.validate().is_err());

        let zero = CreateInvitationRequest {
            ttl_hours: Some(0),
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let week = CreateInvitationRequest {
            ttl_hours: Some(168),
            email: Some("cousin@example.com".to_string()),
            ..Default::default()
        };
        assert!(week.validate().is_ok());
    }

    #[test]
    fn test_legacy_node_request_links() {
        let request: AppendLegacyNodeRequest = serde_json::from_str(
            r#"{"id": "n2", "name": "Baba", "voiceClip": "clip.mp3",
                "relationships": [{"relation": "son", "toNodeId": "n1"}]}"#,
        )
        .unwrap();
        assert_eq!(request.relationships.len(), 1);
        assert_eq!(request.relationships[0].to_node_id, "n1");
        assert_eq!(request.voice_clip.as_deref(), Some("clip.mp3"));
    }
}
