//! PostgreSQL implementation of FamilyRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use sanskaar_core::entities::{Family, FamilyRole, Membership};
use sanskaar_core::error::DomainError;
use sanskaar_core::traits::{FamilyRepository, RepoResult};
use sanskaar_core::value_objects::Snowflake;

use crate::mappers::family_with_roster;
use crate::models::{FamilyModel, MembershipModel};

use super::error::{map_db_error, map_unique_index, map_unique_violation};

const FAMILY_COLUMNS: &str = "id, name, owner_id, invite_code, description, privacy, \
     allow_member_invite, auto_approve_members, created_at, updated_at";

/// PostgreSQL implementation of FamilyRepository
#[derive(Clone)]
pub struct PgFamilyRepository {
    pool: PgPool,
}

impl PgFamilyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the rosters of several families in one round trip
    async fn load_rosters(
        &self,
        family_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<MembershipModel>>, DomainError> {
        let rows = sqlx::query_as::<_, MembershipModel>(
            r"
            SELECT family_id, user_id, role, joined_at
            FROM family_memberships
            WHERE family_id = ANY($1)
            ORDER BY joined_at ASC, user_id ASC
            ",
        )
        .bind(family_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut rosters: HashMap<i64, Vec<MembershipModel>> = HashMap::new();
        for row in rows {
            rosters.entry(row.family_id).or_default().push(row);
        }
        Ok(rosters)
    }

    async fn with_rosters(&self, models: Vec<FamilyModel>) -> RepoResult<Vec<Family>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut rosters = self.load_rosters(&ids).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let roster = rosters.remove(&m.id).unwrap_or_default();
                family_with_roster(m, roster)
            })
            .collect())
    }

    async fn find_one(&self, sql: &str, bind: FindKey<'_>) -> RepoResult<Option<Family>> {
        let query = sqlx::query_as::<_, FamilyModel>(sql);
        let query = match bind {
            FindKey::Id(id) => query.bind(id),
            FindKey::Code(code) => query.bind(code),
        };
        let model = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match model {
            Some(model) => Ok(self.with_rosters(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }
}

enum FindKey<'a> {
    Id(i64),
    Code(&'a str),
}

#[async_trait]
impl FamilyRepository for PgFamilyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Family>> {
        let sql = format!("SELECT {FAMILY_COLUMNS} FROM families WHERE id = $1");
        self.find_one(&sql, FindKey::Id(id.into_inner())).await
    }

    #[instrument(skip(self))]
    async fn find_by_invite_code(&self, code: &str) -> RepoResult<Option<Family>> {
        let sql = format!("SELECT {FAMILY_COLUMNS} FROM families WHERE invite_code = $1");
        self.find_one(&sql, FindKey::Code(code)).await
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Family>> {
        let models = sqlx::query_as::<_, FamilyModel>(
            r"
            SELECT f.id, f.name, f.owner_id, f.invite_code, f.description, f.privacy,
                   f.allow_member_invite, f.auto_approve_members, f.created_at, f.updated_at
            FROM families f
            JOIN family_memberships fm ON fm.family_id = f.id
            WHERE fm.user_id = $1
            ORDER BY fm.joined_at ASC, f.id ASC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.with_rosters(models).await
    }

    #[instrument(skip(self, family), fields(family_id = %family.id))]
    async fn create(&self, family: &Family) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO families (id, name, owner_id, invite_code, description, privacy,
                                  allow_member_invite, auto_approve_members, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(family.id.into_inner())
        .bind(&family.name)
        .bind(family.owner_id.into_inner())
        .bind(&family.invite_code)
        .bind(&family.description)
        .bind(family.privacy.as_str())
        .bind(family.settings.allow_member_invite)
        .bind(family.settings.auto_approve_members)
        .bind(family.created_at)
        .bind(family.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_index(e, "families_invite_code_key", || DomainError::InviteCodeExists)
        })?;

        for membership in &family.members {
            sqlx::query(
                r"
                INSERT INTO family_memberships (family_id, user_id, role, joined_at)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(family.id.into_inner())
            .bind(membership.user_id.into_inner())
            .bind(membership.role.as_str())
            .bind(membership.joined_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, family), fields(family_id = %family.id))]
    async fn update(&self, family: &Family) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE families
            SET name = $2, description = $3, privacy = $4,
                allow_member_invite = $5, auto_approve_members = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(family.id.into_inner())
        .bind(&family.name)
        .bind(&family.description)
        .bind(family.privacy.as_str())
        .bind(family.settings.allow_member_invite)
        .bind(family.settings.auto_approve_members)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FamilyNotFound(family.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // roster, members, edges and invitations go with ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM families WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FamilyNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_membership(&self, family_id: Snowflake, membership: &Membership) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO family_memberships (family_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(family_id.into_inner())
        .bind(membership.user_id.into_inner())
        .bind(membership.role.as_str())
        .bind(membership.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_membership(&self, family_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            "DELETE FROM family_memberships WHERE family_id = $1 AND user_id = $2",
        )
        .bind(family_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn set_role(
        &self,
        family_id: Snowflake,
        user_id: Snowflake,
        role: FamilyRole,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE family_memberships SET role = $3 WHERE family_id = $1 AND user_id = $2",
        )
        .bind(family_id.into_inner())
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotOnRoster(user_id));
        }

        Ok(())
    }
}
