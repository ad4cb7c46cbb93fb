//! PostgreSQL implementation of FamilyMemberRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use sanskaar_core::entities::FamilyMember;
use sanskaar_core::error::DomainError;
use sanskaar_core::traits::{FamilyMemberRepository, MemberQuery, RepoResult};
use sanskaar_core::value_objects::Snowflake;

use crate::models::FamilyMemberModel;

use super::error::map_db_error;

/// PostgreSQL implementation of FamilyMemberRepository
#[derive(Clone)]
pub struct PgFamilyMemberRepository {
    pool: PgPool,
}

impl PgFamilyMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FamilyMemberRepository for PgFamilyMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        family_id: Snowflake,
        id: Snowflake,
    ) -> RepoResult<Option<FamilyMember>> {
        let result = sqlx::query_as::<_, FamilyMemberModel>(
            r"
            SELECT id, family_id, user_id, display_name, relation, birthdate, deathdate,
                   birth_place, gender, photo_url, occupation, notes, is_alive,
                   marriage_details, created_by, created_at, updated_at
            FROM family_members
            WHERE family_id = $1 AND id = $2
            ",
        )
        .bind(family_id.into_inner())
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FamilyMember::from))
    }

    #[instrument(skip(self))]
    async fn find_by_family(
        &self,
        family_id: Snowflake,
        query: MemberQuery,
    ) -> RepoResult<Vec<FamilyMember>> {
        let limit = query.limit.clamp(1, 1000);

        let results = sqlx::query_as::<_, FamilyMemberModel>(
            r"
            SELECT id, family_id, user_id, display_name, relation, birthdate, deathdate,
                   birth_place, gender, photo_url, occupation, notes, is_alive,
                   marriage_details, created_by, created_at, updated_at
            FROM family_members
            WHERE family_id = $1 AND ($2::BIGINT IS NULL OR id > $2)
            ORDER BY id ASC
            LIMIT $3
            ",
        )
        .bind(family_id.into_inner())
        .bind(query.after.map(Snowflake::into_inner))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(FamilyMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all_by_family(&self, family_id: Snowflake) -> RepoResult<Vec<FamilyMember>> {
        let results = sqlx::query_as::<_, FamilyMemberModel>(
            r"
            SELECT id, family_id, user_id, display_name, relation, birthdate, deathdate,
                   birth_place, gender, photo_url, occupation, notes, is_alive,
                   marriage_details, created_by, created_at, updated_at
            FROM family_members
            WHERE family_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(family_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(FamilyMember::from).collect())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &FamilyMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO family_members (id, family_id, user_id, display_name, relation, birthdate,
                                        deathdate, birth_place, gender, photo_url, occupation,
                                        notes, is_alive, marriage_details, created_by,
                                        created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(member.id.into_inner())
        .bind(member.family_id.into_inner())
        .bind(member.user_id.map(Snowflake::into_inner))
        .bind(&member.display_name)
        .bind(member.relation.as_str())
        .bind(member.birthdate)
        .bind(member.deathdate)
        .bind(&member.birth_place)
        .bind(member.gender.as_str())
        .bind(&member.photo_url)
        .bind(&member.occupation)
        .bind(&member.notes)
        .bind(member.is_alive)
        .bind(member.marriage_details.as_ref().map(Json))
        .bind(member.created_by.into_inner())
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &FamilyMember) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE family_members
            SET user_id = $3, display_name = $4, relation = $5, birthdate = $6, deathdate = $7,
                birth_place = $8, gender = $9, photo_url = $10, occupation = $11, notes = $12,
                is_alive = $13, marriage_details = $14, updated_at = NOW()
            WHERE family_id = $1 AND id = $2
            ",
        )
        .bind(member.family_id.into_inner())
        .bind(member.id.into_inner())
        .bind(member.user_id.map(Snowflake::into_inner))
        .bind(&member.display_name)
        .bind(member.relation.as_str())
        .bind(member.birthdate)
        .bind(member.deathdate)
        .bind(&member.birth_place)
        .bind(member.gender.as_str())
        .bind(&member.photo_url)
        .bind(&member.occupation)
        .bind(&member.notes)
        .bind(member.is_alive)
        .bind(member.marriage_details.as_ref().map(Json))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(member.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, family_id: Snowflake, id: Snowflake) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // edges first, so the member never exists without them or vice versa
        sqlx::query(
            r"
            DELETE FROM family_relationships
            WHERE family_id = $1 AND (from_member_id = $2 OR to_member_id = $2)
            ",
        )
        .bind(family_id.into_inner())
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM family_members WHERE family_id = $1 AND id = $2")
            .bind(family_id.into_inner())
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgFamilyMemberRepository>();
    }
}
