//! LegacyFamilyTree entity <-> model mapper

use sanskaar_core::entities::LegacyFamilyTree;
use sanskaar_core::value_objects::Snowflake;

use crate::models::LegacyTreeModel;

impl From<LegacyTreeModel> for LegacyFamilyTree {
    fn from(model: LegacyTreeModel) -> Self {
        LegacyFamilyTree {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            name: model.name,
            nodes: model.nodes.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
