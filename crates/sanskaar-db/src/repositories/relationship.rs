//! PostgreSQL implementation of RelationshipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use sanskaar_core::entities::Relationship;
use sanskaar_core::error::DomainError;
use sanskaar_core::traits::{RelationshipRepository, RepoResult};
use sanskaar_core::value_objects::Snowflake;

use crate::models::RelationshipModel;

use super::error::{map_db_error, map_unique_index};

/// PostgreSQL implementation of RelationshipRepository
#[derive(Clone)]
pub struct PgRelationshipRepository {
    pool: PgPool,
}

impl PgRelationshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationshipRepository for PgRelationshipRepository {
    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        family_id: Snowflake,
        id: Snowflake,
    ) -> RepoResult<Option<Relationship>> {
        let result = sqlx::query_as::<_, RelationshipModel>(
            r"
            SELECT id, family_id, from_member_id, to_member_id, relation_type, meta,
                   start_date, end_date, notes, created_by, created_at
            FROM family_relationships
            WHERE family_id = $1 AND id = $2
            ",
        )
        .bind(family_id.into_inner())
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Relationship::from))
    }

    #[instrument(skip(self))]
    async fn find_by_family(&self, family_id: Snowflake) -> RepoResult<Vec<Relationship>> {
        let results = sqlx::query_as::<_, RelationshipModel>(
            r"
            SELECT id, family_id, from_member_id, to_member_id, relation_type, meta,
                   start_date, end_date, notes, created_by, created_at
            FROM family_relationships
            WHERE family_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(family_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Relationship::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_member(
        &self,
        family_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<Vec<Relationship>> {
        let results = sqlx::query_as::<_, RelationshipModel>(
            r"
            SELECT id, family_id, from_member_id, to_member_id, relation_type, meta,
                   start_date, end_date, notes, created_by, created_at
            FROM family_relationships
            WHERE family_id = $1 AND (from_member_id = $2 OR to_member_id = $2)
            ORDER BY id ASC
            ",
        )
        .bind(family_id.into_inner())
        .bind(member_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Relationship::from).collect())
    }

    #[instrument(skip(self, relationship), fields(relationship_id = %relationship.id))]
    async fn create(&self, relationship: &Relationship) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO family_relationships (id, family_id, from_member_id, to_member_id,
                                              relation_type, meta, start_date, end_date, notes,
                                              created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(relationship.id.into_inner())
        .bind(relationship.family_id.into_inner())
        .bind(relationship.from_member_id.into_inner())
        .bind(relationship.to_member_id.into_inner())
        .bind(relationship.relation_type.as_str())
        .bind(&relationship.meta)
        .bind(relationship.start_date)
        .bind(relationship.end_date)
        .bind(&relationship.notes)
        .bind(relationship.created_by.into_inner())
        .bind(relationship.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_index(e, "family_relationships_edge_key", || {
                DomainError::RelationshipExists
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, family_id: Snowflake, id: Snowflake) -> RepoResult<bool> {
        let result =
            sqlx::query("DELETE FROM family_relationships WHERE family_id = $1 AND id = $2")
                .bind(family_id.into_inner())
                .bind(id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
