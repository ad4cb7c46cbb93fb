//! FamilyMember entity <-> model mapper

use sanskaar_core::entities::{FamilyMember, Gender, MemberRelation};
use sanskaar_core::value_objects::Snowflake;

use crate::models::FamilyMemberModel;

impl From<FamilyMemberModel> for FamilyMember {
    fn from(model: FamilyMemberModel) -> Self {
        FamilyMember {
            id: Snowflake::new(model.id),
            family_id: Snowflake::new(model.family_id),
            user_id: model.user_id.map(Snowflake::new),
            display_name: model.display_name,
            relation: MemberRelation::from_label(&model.relation),
            birthdate: model.birthdate,
            deathdate: model.deathdate,
            birth_place: model.birth_place,
            gender: Gender::from_label(&model.gender),
            photo_url: model.photo_url,
            occupation: model.occupation,
            notes: model.notes,
            is_alive: model.is_alive,
            marriage_details: model.marriage_details.map(|json| json.0),
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
