//! PostgreSQL implementation of InvitationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use sanskaar_core::entities::{FamilyInvitation, FamilyRole, InvitationStatus};
use sanskaar_core::error::DomainError;
use sanskaar_core::traits::{InvitationRepository, RepoResult};
use sanskaar_core::value_objects::Snowflake;

use crate::models::InvitationModel;

use super::error::{map_db_error, map_unique_index, map_unique_violation};

/// PostgreSQL implementation of InvitationRepository
#[derive(Clone)]
pub struct PgInvitationRepository {
    pool: PgPool,
}

impl PgInvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Move a pending invitation to `status`; true if a row changed
    async fn transition_from_pending(
        &self,
        id: Snowflake,
        status: InvitationStatus,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE family_invitations
            SET status = $2
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl InvitationRepository for PgInvitationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<FamilyInvitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, family_id, token, email, phone, status, expires_at, message,
                   accepted_by, accepted_at, created_by, created_at
            FROM family_invitations
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FamilyInvitation::from))
    }

    #[instrument(skip(self, token))]
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<FamilyInvitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, family_id, token, email, phone, status, expires_at, message,
                   accepted_by, accepted_at, created_by, created_at
            FROM family_invitations
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FamilyInvitation::from))
    }

    #[instrument(skip(self))]
    async fn find_by_family(
        &self,
        family_id: Snowflake,
        status: Option<InvitationStatus>,
    ) -> RepoResult<Vec<FamilyInvitation>> {
        let results = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, family_id, token, email, phone, status, expires_at, message,
                   accepted_by, accepted_at, created_by, created_at
            FROM family_invitations
            WHERE family_id = $1 AND ($2::VARCHAR IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(family_id.into_inner())
        .bind(status.map(InvitationStatus::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(FamilyInvitation::from).collect())
    }

    #[instrument(skip(self, invitation), fields(invitation_id = %invitation.id))]
    async fn create(&self, invitation: &FamilyInvitation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO family_invitations (id, family_id, token, email, phone, status,
                                            expires_at, message, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(invitation.id.into_inner())
        .bind(invitation.family_id.into_inner())
        .bind(&invitation.token)
        .bind(&invitation.email)
        .bind(&invitation.phone)
        .bind(invitation.status.as_str())
        .bind(invitation.expires_at)
        .bind(&invitation.message)
        .bind(invitation.created_by.into_inner())
        .bind(invitation.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_index(e, "family_invitations_token_key", || {
                DomainError::InvitationTokenExists
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_expired(&self, id: Snowflake) -> RepoResult<bool> {
        self.transition_from_pending(id, InvitationStatus::Expired).await
    }

    #[instrument(skip(self))]
    async fn mark_cancelled(&self, id: Snowflake) -> RepoResult<bool> {
        self.transition_from_pending(id, InvitationStatus::Cancelled)
            .await
    }

    #[instrument(skip(self))]
    async fn accept(
        &self,
        id: Snowflake,
        family_id: Snowflake,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // the row lock taken here serialises concurrent accepts
        let claimed = sqlx::query(
            r"
            UPDATE family_invitations
            SET status = 'accepted', accepted_by = $2, accepted_at = $3
            WHERE id = $1 AND status = 'pending' AND expires_at >= $3
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if claimed.rows_affected() == 0 {
            debug!(invitation_id = %id, "Invitation no longer pending");
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(false);
        }

        sqlx::query(
            r"
            INSERT INTO family_memberships (family_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(family_id.into_inner())
        .bind(user_id.into_inner())
        .bind(FamilyRole::Member.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgInvitationRepository>();
    }
}
