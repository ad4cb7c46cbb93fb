//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use sanskaar_core::entities::{
    Family, FamilyInvitation, FamilyMember, FamilyRole, LegacyFamilyTree, Membership, Relationship,
};
use sanskaar_core::{GenerationView, TreeNode};

use super::responses::{
    FamilyMemberResponse, FamilyResponse, FamilySummaryResponse, GenerationTierResponse,
    InvitationPreviewResponse, InvitationResponse, LegacyTreeResponse, RelationshipResponse,
    RosterEntryResponse, TreeNodeResponse,
};

// ============================================================================
// Family Mappers
// ============================================================================

impl From<&Membership> for RosterEntryResponse {
    fn from(membership: &Membership) -> Self {
        Self {
            user_id: membership.user_id.to_string(),
            role: membership.role,
            joined_at: membership.joined_at,
        }
    }
}

impl From<&Family> for FamilyResponse {
    fn from(family: &Family) -> Self {
        Self {
            id: family.id.to_string(),
            name: family.name.clone(),
            owner_id: family.owner_id.to_string(),
            invite_code: family.invite_code.clone(),
            description: family.description.clone(),
            privacy: family.privacy,
            members: family.members.iter().map(RosterEntryResponse::from).collect(),
            settings: family.settings,
            created_at: family.created_at,
            updated_at: family.updated_at,
        }
    }
}

impl From<Family> for FamilyResponse {
    fn from(family: Family) -> Self {
        Self::from(&family)
    }
}

/// Family paired with the viewer's role
pub struct FamilyWithRole {
    pub family: Family,
    pub role: FamilyRole,
}

impl From<FamilyWithRole> for FamilySummaryResponse {
    fn from(data: FamilyWithRole) -> Self {
        Self {
            member_count: data.family.member_count(),
            role: data.role,
            family: FamilyResponse::from(&data.family),
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&FamilyMember> for FamilyMemberResponse {
    fn from(member: &FamilyMember) -> Self {
        Self {
            id: member.id.to_string(),
            family_id: member.family_id.to_string(),
            user_id: member.user_id.map(|id| id.to_string()),
            display_name: member.display_name.clone(),
            relation: member.relation,
            birthdate: member.birthdate,
            deathdate: member.deathdate,
            birth_place: member.birth_place.clone(),
            gender: member.gender,
            photo_url: member.photo_url.clone(),
            occupation: member.occupation.clone(),
            notes: member.notes.clone(),
            is_alive: member.is_alive,
            marriage_details: member.marriage_details.clone(),
            created_by: member.created_by.to_string(),
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

impl From<FamilyMember> for FamilyMemberResponse {
    fn from(member: FamilyMember) -> Self {
        Self::from(&member)
    }
}

// ============================================================================
// Relationship Mappers
// ============================================================================

impl From<&Relationship> for RelationshipResponse {
    fn from(edge: &Relationship) -> Self {
        Self {
            id: edge.id.to_string(),
            family_id: edge.family_id.to_string(),
            from_member_id: edge.from_member_id.to_string(),
            to_member_id: edge.to_member_id.to_string(),
            relation_type: edge.relation_type,
            meta: edge.meta.clone(),
            start_date: edge.start_date,
            end_date: edge.end_date,
            notes: edge.notes.clone(),
            created_by: edge.created_by.to_string(),
            created_at: edge.created_at,
        }
    }
}

impl From<Relationship> for RelationshipResponse {
    fn from(edge: Relationship) -> Self {
        Self::from(&edge)
    }
}

// ============================================================================
// Tree Mappers
// ============================================================================

impl From<&TreeNode<'_>> for TreeNodeResponse {
    fn from(node: &TreeNode<'_>) -> Self {
        Self {
            member: FamilyMemberResponse::from(node.member),
            spouse: node.spouse.map(FamilyMemberResponse::from),
            children: node.children.iter().map(TreeNodeResponse::from).collect(),
        }
    }
}

/// Flatten a generation view into its non-empty tiers
pub fn generation_tiers(view: &GenerationView<'_>) -> Vec<GenerationTierResponse> {
    view.tiers()
        .into_iter()
        .map(|(generation, members)| GenerationTierResponse {
            key: generation,
            label: generation.label(),
            members: members.iter().map(|m| FamilyMemberResponse::from(*m)).collect(),
        })
        .collect()
}

// ============================================================================
// Invitation Mappers
// ============================================================================

impl From<&FamilyInvitation> for InvitationResponse {
    fn from(invitation: &FamilyInvitation) -> Self {
        Self {
            id: invitation.id.to_string(),
            family_id: invitation.family_id.to_string(),
            token: invitation.token.clone(),
            email: invitation.email.clone(),
            phone: invitation.phone.clone(),
            status: invitation.status,
            expires_at: invitation.expires_at,
            message: invitation.message.clone(),
            accepted_by: invitation.accepted_by.map(|id| id.to_string()),
            accepted_at: invitation.accepted_at,
            created_by: invitation.created_by.to_string(),
            created_at: invitation.created_at,
        }
    }
}

impl From<FamilyInvitation> for InvitationResponse {
    fn from(invitation: FamilyInvitation) -> Self {
        Self::from(&invitation)
    }
}

/// Invitation with the family it leads to
pub struct InvitationWithFamily<'a> {
    pub invitation: &'a FamilyInvitation,
    pub family: &'a Family,
}

impl From<InvitationWithFamily<'_>> for InvitationPreviewResponse {
    fn from(data: InvitationWithFamily<'_>) -> Self {
        Self {
            family_id: data.family.id.to_string(),
            family_name: data.family.name.clone(),
            status: data.invitation.status,
            expires_at: data.invitation.expires_at,
            message: data.invitation.message.clone(),
        }
    }
}

// ============================================================================
// Legacy Tree Mappers
// ============================================================================

impl From<LegacyFamilyTree> for LegacyTreeResponse {
    fn from(tree: LegacyFamilyTree) -> Self {
        Self {
            id: tree.id.to_string(),
            owner_id: tree.owner_id.to_string(),
            name: tree.name,
            nodes: tree.nodes,
            created_at: tree.created_at,
            updated_at: tree.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanskaar_core::entities::MemberRelation;
    use sanskaar_core::{group_by_generation, Snowflake};

    fn member(id: i64, name: &str, relation: MemberRelation) -> FamilyMember {
        FamilyMember::new(
            Snowflake::new(id),
            Snowflake::new(1),
            name.to_string(),
            Snowflake::new(2),
        )
        .with_relation(relation)
    }

    #[test]
    fn test_family_response_uses_string_ids_and_camel_case() {
        let family = Family::new(
            Snowflake::new(42),
            "Kulkarni".to_string(),
            Snowflake::new(7),
            "Ab12Cd34".to_string(),
        );
        let json = serde_json::to_value(FamilyResponse::from(&family)).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["ownerId"], "7");
        assert_eq!(json["inviteCode"], "Ab12Cd34");
        assert_eq!(json["privacy"], "private");
        assert_eq!(json["members"][0]["role"], "admin");
        assert_eq!(json["settings"]["allowMemberInvite"], false);
        assert_eq!(json["settings"]["autoApproveMembers"], true);
    }

    #[test]
    fn test_member_response_relation_label() {
        let me = member(10, "Me", MemberRelation::Ego);
        let json = serde_json::to_value(FamilyMemberResponse::from(&me)).unwrap();
        assert_eq!(json["relation"], "self");
        assert_eq!(json["gender"], "unspecified");
        assert_eq!(json["isAlive"], true);
        assert!(json.get("userId").is_none());
    }

    #[test]
    fn test_generation_tiers_skip_empty() {
        let members = vec![
            member(1, "Dad", MemberRelation::Parent),
            member(2, "Me", MemberRelation::Ego),
            member(3, "Sis", MemberRelation::Sibling),
        ];
        let view = group_by_generation(&members);
        let tiers = generation_tiers(&view);

        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].label, "Parents");
        assert_eq!(tiers[1].label, "Self & Siblings");
        assert_eq!(tiers[1].members.len(), 2);

        let json = serde_json::to_value(&tiers[1]).unwrap();
        assert_eq!(json["key"], "self");
    }
}
