//! PostgreSQL implementation of LegacyTreeRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use sanskaar_core::entities::LegacyFamilyTree;
use sanskaar_core::error::DomainError;
use sanskaar_core::traits::{LegacyTreeRepository, RepoResult};
use sanskaar_core::value_objects::Snowflake;

use crate::models::LegacyTreeModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgLegacyTreeRepository {
    pool: PgPool,
}

impl PgLegacyTreeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LegacyTreeRepository for PgLegacyTreeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LegacyFamilyTree>> {
        let result = sqlx::query_as::<_, LegacyTreeModel>(
            r"
            SELECT id, owner_id, name, nodes, created_at, updated_at
            FROM legacy_family_trees
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(LegacyFamilyTree::from))
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<LegacyFamilyTree>> {
        let results = sqlx::query_as::<_, LegacyTreeModel>(
            r"
            SELECT id, owner_id, name, nodes, created_at, updated_at
            FROM legacy_family_trees
            WHERE owner_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(owner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LegacyFamilyTree::from).collect())
    }

    #[instrument(skip(self, tree), fields(tree_id = %tree.id))]
    async fn create(&self, tree: &LegacyFamilyTree) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO legacy_family_trees (id, owner_id, name, nodes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(tree.id.into_inner())
        .bind(tree.owner_id.into_inner())
        .bind(&tree.name)
        .bind(Json(&tree.nodes))
        .bind(tree.created_at)
        .bind(tree.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, tree), fields(tree_id = %tree.id, nodes = tree.nodes.len()))]
    async fn update_nodes(&self, tree: &LegacyFamilyTree) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE legacy_family_trees
            SET nodes = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(tree.id.into_inner())
        .bind(Json(&tree.nodes))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LegacyTreeNotFound(tree.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM legacy_family_trees WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
