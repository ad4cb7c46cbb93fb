//! Family access checks
//!
//! Every family-scoped operation resolves the family first and then checks
//! the caller's roster entry, so an unknown family is always a 404 and a
//! stranger is always a 403.

use sanskaar_core::entities::{Family, FamilyRole};
use sanskaar_core::{DomainError, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Roster-based access control for family resources
pub struct FamilyAccess<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FamilyAccess<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a family or fail with `FamilyNotFound`
    #[instrument(skip(self))]
    pub async fn load(&self, family_id: Snowflake) -> ServiceResult<Family> {
        self.ctx
            .family_repo()
            .find_by_id(family_id)
            .await?
            .ok_or_else(|| DomainError::FamilyNotFound(family_id).into())
    }

    /// Require the user to be on the roster; returns the family and their role
    #[instrument(skip(self))]
    pub async fn assert_member(
        &self,
        family_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<(Family, FamilyRole)> {
        let family = self.load(family_id).await?;
        match family.require_member(user_id) {
            Ok(role) => Ok((family, role)),
            Err(e) => {
                debug!(family_id = %family_id, user_id = %user_id, "Rejected non-member");
                Err(e.into())
            }
        }
    }

    /// Require the user to be an admin of the family
    #[instrument(skip(self))]
    pub async fn assert_admin(
        &self,
        family_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Family> {
        let family = self.load(family_id).await?;
        if let Err(e) = family.require_admin(user_id) {
            debug!(family_id = %family_id, user_id = %user_id, "Rejected non-admin");
            return Err(e.into());
        }
        Ok(family)
    }
}
