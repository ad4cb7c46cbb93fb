//! Legacy tree service
//!
//! Owner-scoped trees with nodes stored inline. Other users cannot tell a
//! tree they don't own from one that doesn't exist.

use sanskaar_core::entities::{LegacyFamilyTree, LegacyTreeNode};
use sanskaar_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{AppendLegacyNodeRequest, CreateLegacyTreeRequest, LegacyTreeResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Legacy tree service
pub struct LegacyTreeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LegacyTreeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request))]
    pub async fn create_tree(
        &self,
        owner_id: Snowflake,
        request: CreateLegacyTreeRequest,
    ) -> ServiceResult<LegacyTreeResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError("Tree name must not be empty".to_string()).into());
        }

        let tree = LegacyFamilyTree::new(self.ctx.generate_id(), owner_id, name.to_string());
        self.ctx.legacy_tree_repo().create(&tree).await?;

        info!(tree_id = %tree.id, owner_id = %owner_id, "Legacy tree created");

        Ok(LegacyTreeResponse::from(tree))
    }

    #[instrument(skip(self))]
    pub async fn list_trees(&self, owner_id: Snowflake) -> ServiceResult<Vec<LegacyTreeResponse>> {
        let trees = self.ctx.legacy_tree_repo().find_by_owner(owner_id).await?;
        Ok(trees.into_iter().map(LegacyTreeResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_tree(
        &self,
        tree_id: Snowflake,
        owner_id: Snowflake,
    ) -> ServiceResult<LegacyTreeResponse> {
        let tree = self.load_owned(tree_id, owner_id).await?;
        Ok(LegacyTreeResponse::from(tree))
    }

    /// Append a node whose links point at nodes already in the tree
    #[instrument(skip(self, request))]
    pub async fn append_node(
        &self,
        tree_id: Snowflake,
        owner_id: Snowflake,
        request: AppendLegacyNodeRequest,
    ) -> ServiceResult<LegacyTreeResponse> {
        let mut tree = self.load_owned(tree_id, owner_id).await?;

        let node_id = request.id.clone();
        tree.append_node(LegacyTreeNode {
            id: request.id,
            name: request.name,
            photo: request.photo,
            voice_clip: request.voice_clip,
            bio: request.bio,
            relationships: request.relationships,
        })?;
        self.ctx.legacy_tree_repo().update_nodes(&tree).await?;

        info!(tree_id = %tree_id, node_id = %node_id, nodes = tree.nodes.len(), "Legacy node appended");

        Ok(LegacyTreeResponse::from(tree))
    }

    #[instrument(skip(self))]
    pub async fn delete_tree(&self, tree_id: Snowflake, owner_id: Snowflake) -> ServiceResult<()> {
        self.load_owned(tree_id, owner_id).await?;

        if !self.ctx.legacy_tree_repo().delete(tree_id).await? {
            return Err(DomainError::LegacyTreeNotFound(tree_id).into());
        }

        info!(tree_id = %tree_id, "Legacy tree deleted");

        Ok(())
    }

    async fn load_owned(
        &self,
        tree_id: Snowflake,
        owner_id: Snowflake,
    ) -> ServiceResult<LegacyFamilyTree> {
        self.ctx
            .legacy_tree_repo()
            .find_by_id(tree_id)
            .await?
            .filter(|t| t.owner_id == owner_id)
            .ok_or_else(|| DomainError::LegacyTreeNotFound(tree_id).into())
    }
}
