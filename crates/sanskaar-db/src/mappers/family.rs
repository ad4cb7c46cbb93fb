//! Family entity <-> model mapper

use sanskaar_core::entities::{Family, FamilyPrivacy, FamilyRole, FamilySettings, Membership};
use sanskaar_core::value_objects::Snowflake;

use crate::models::{FamilyModel, MembershipModel};

impl From<MembershipModel> for Membership {
    fn from(model: MembershipModel) -> Self {
        Membership {
            user_id: Snowflake::new(model.user_id),
            role: FamilyRole::parse(&model.role).unwrap_or_default(),
            joined_at: model.joined_at,
        }
    }
}

/// Assemble a family from its row and its roster rows
pub fn family_with_roster(model: FamilyModel, roster: Vec<MembershipModel>) -> Family {
    Family {
        id: Snowflake::new(model.id),
        name: model.name,
        owner_id: Snowflake::new(model.owner_id),
        invite_code: model.invite_code,
        description: model.description,
        privacy: FamilyPrivacy::parse(&model.privacy).unwrap_or_default(),
        settings: FamilySettings {
            allow_member_invite: model.allow_member_invite,
            auto_approve_members: model.auto_approve_members,
        },
        members: roster.into_iter().map(Membership::from).collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_unknown_labels_fall_back() {
        let now = Utc::now();
        let family = family_with_roster(
            FamilyModel {
                id: 1,
                name: "Sharma Family".into(),
                owner_id: 10,
                invite_code: "ABC12345".into(),
                description: None,
                privacy: "secret".into(),
                allow_member_invite: true,
                auto_approve_members: true,
                created_at: now,
                updated_at: now,
            },
            vec![
                MembershipModel { family_id: 1, user_id: 10, role: "admin".into(), joined_at: now },
                MembershipModel { family_id: 1, user_id: 11, role: "owner".into(), joined_at: now },
            ],
        );
        assert_eq!(family.privacy, FamilyPrivacy::Private);
        assert_eq!(family.members[0].role, FamilyRole::Admin);
        assert_eq!(family.members[1].role, FamilyRole::Member);
        assert!(family.settings.allow_member_invite);
    }
}
