//! Legacy family tree - a single-owner tree with nodes stored inline
//!
//! Predates the Family aggregate. Kept for existing clients; supports only
//! create, read, append node and delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Edge from one inline node to another, labelled freely
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyNodeLink {
    pub relation: String,
    pub to_node_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTreeNode {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_clip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub relationships: Vec<LegacyNodeLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFamilyTree {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub name: String,
    pub nodes: Vec<LegacyTreeNode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LegacyFamilyTree {
    pub fn new(id: Snowflake, owner_id: Snowflake, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            name,
            nodes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&LegacyTreeNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Append a node; its id must be fresh and its links must point at
    /// existing nodes (or at itself)
    pub fn append_node(&mut self, node: LegacyTreeNode) -> Result<(), DomainError> {
        if node.id.trim().is_empty() || node.name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Node id and name must not be empty".to_string(),
            ));
        }
        if self.node(&node.id).is_some() {
            return Err(DomainError::ValidationError(format!(
                "Node {} already exists",
                node.id
            )));
        }
        if let Some(link) = node
            .relationships
            .iter()
            .find(|l| l.to_node_id != node.id && self.node(&l.to_node_id).is_none())
        {
            return Err(DomainError::ValidationError(format!(
                "Unknown target node {}",
                link.to_node_id
            )));
        }
        self.nodes.push(node);
        self.updated_at = Utc::now();
        Ok(())
    }
}
