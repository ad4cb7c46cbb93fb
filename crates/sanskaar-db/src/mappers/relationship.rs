//! Relationship entity <-> model mapper

use sanskaar_core::entities::{RelationType, Relationship};
use sanskaar_core::value_objects::Snowflake;

use crate::models::RelationshipModel;

impl From<RelationshipModel> for Relationship {
    fn from(model: RelationshipModel) -> Self {
        Relationship {
            id: Snowflake::new(model.id),
            family_id: Snowflake::new(model.family_id),
            from_member_id: Snowflake::new(model.from_member_id),
            to_member_id: Snowflake::new(model.to_member_id),
            // unreachable under the column CHECK
            relation_type: RelationType::parse(&model.relation_type)
                .unwrap_or(RelationType::Sibling),
            meta: model.meta,
            start_date: model.start_date,
            end_date: model.end_date,
            notes: model.notes,
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
        }
    }
}
