//! Legacy family tree database model

use chrono::{DateTime, Utc};
use sanskaar_core::LegacyTreeNode;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the legacy_family_trees table
#[derive(Debug, Clone, FromRow)]
pub struct LegacyTreeModel {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub nodes: Json<Vec<LegacyTreeNode>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
