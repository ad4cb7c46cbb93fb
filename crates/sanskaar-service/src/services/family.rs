//! Family service
//!
//! Handles family creation, the join-by-code flow, and roster management.

use sanskaar_core::entities::{generate_invite_code, Family, FamilyRole};
use sanskaar_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    CreateFamilyRequest, FamilyResponse, FamilySummaryResponse, FamilyWithRole,
    JoinFamilyRequest, UpdateFamilyRequest,
};

use super::access::FamilyAccess;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attempts at drawing an unused invite code before giving up
const INVITE_CODE_ATTEMPTS: usize = 5;

/// Family service
pub struct FamilyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FamilyService<'a> {
    /// Create a new FamilyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a family with the caller as owner and admin
    #[instrument(skip(self, request))]
    pub async fn create_family(
        &self,
        owner_id: Snowflake,
        request: CreateFamilyRequest,
    ) -> ServiceResult<FamilyResponse> {
        let name = Family::validate_name(&request.name)?;
        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        for attempt in 1..=INVITE_CODE_ATTEMPTS {
            let mut family = Family::new(
                self.ctx.generate_id(),
                name.clone(),
                owner_id,
                generate_invite_code(),
            );
            family.set_description(description.clone());

            match self.ctx.family_repo().create(&family).await {
                Ok(()) => {
                    info!(family_id = %family.id, owner_id = %owner_id, "Family created");
                    return Ok(FamilyResponse::from(family));
                }
                Err(DomainError::InviteCodeExists) => {
                    warn!(attempt, "Invite code collision, drawing a new one");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::internal("could not allocate a unique invite code"))
    }

    /// Join a family through its invite code
    #[instrument(skip(self, request))]
    pub async fn join_family(
        &self,
        user_id: Snowflake,
        request: JoinFamilyRequest,
    ) -> ServiceResult<FamilyResponse> {
        let code = request.invite_code.trim();
        let mut family = self
            .ctx
            .family_repo()
            .find_by_invite_code(code)
            .await?
            .ok_or(DomainError::UnknownInviteCode)?;

        if !family.settings.auto_approve_members {
            // No approval queue exists; joins are admitted either way
            info!(family_id = %family.id, "autoApproveMembers is off, admitting join directly");
        }

        let membership = family.add_member(user_id, FamilyRole::Member)?.clone();
        self.ctx
            .family_repo()
            .add_membership(family.id, &membership)
            .await?;

        info!(family_id = %family.id, user_id = %user_id, "User joined family by invite code");

        Ok(FamilyResponse::from(family))
    }

    /// Families the user belongs to, with their role and the roster size
    #[instrument(skip(self))]
    pub async fn list_my_families(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<FamilySummaryResponse>> {
        let families = self.ctx.family_repo().find_by_user(user_id).await?;

        Ok(families
            .into_iter()
            .filter_map(|family| {
                let role = family.role_of(user_id)?;
                Some(FamilySummaryResponse::from(FamilyWithRole { family, role }))
            })
            .collect())
    }

    /// Get a family; members only
    #[instrument(skip(self))]
    pub async fn get_family(
        &self,
        family_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<FamilyResponse> {
        let (family, _) = FamilyAccess::new(self.ctx)
            .assert_member(family_id, user_id)
            .await?;
        Ok(FamilyResponse::from(family))
    }

    /// Update name, description, privacy or settings; admin only
    #[instrument(skip(self, request))]
    pub async fn update_family(
        &self,
        family_id: Snowflake,
        user_id: Snowflake,
        request: UpdateFamilyRequest,
    ) -> ServiceResult<FamilyResponse> {
        let mut family = FamilyAccess::new(self.ctx)
            .assert_admin(family_id, user_id)
            .await?;

        if let Some(name) = request.name {
            family.set_name(Family::validate_name(&name)?);
        }
        if let Some(description) = request.description {
            let description = description.trim();
            family.set_description((!description.is_empty()).then(|| description.to_string()));
        }
        if let Some(privacy) = request.privacy {
            family.set_privacy(privacy);
        }
        if let Some(patch) = request.settings {
            let mut settings = family.settings;
            if let Some(allow) = patch.allow_member_invite {
                settings.allow_member_invite = allow;
            }
            if let Some(auto_approve) = patch.auto_approve_members {
                settings.auto_approve_members = auto_approve;
            }
            family.set_settings(settings);
        }

        self.ctx.family_repo().update(&family).await?;

        info!(family_id = %family_id, "Family updated");

        Ok(FamilyResponse::from(family))
    }

    /// Delete a family and everything in it; admin only
    #[instrument(skip(self))]
    pub async fn delete_family(&self, family_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        FamilyAccess::new(self.ctx)
            .assert_admin(family_id, user_id)
            .await?;

        self.ctx.family_repo().delete(family_id).await?;

        info!(family_id = %family_id, user_id = %user_id, "Family deleted");

        Ok(())
    }

    /// Leave a family; the owner cannot
    #[instrument(skip(self))]
    pub async fn leave_family(&self, family_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let (family, _) = FamilyAccess::new(self.ctx)
            .assert_member(family_id, user_id)
            .await?;

        if family.is_owner(user_id) {
            return Err(DomainError::CannotLeaveOwnedFamily.into());
        }

        self.ctx
            .family_repo()
            .remove_membership(family_id, user_id)
            .await?;

        info!(family_id = %family_id, user_id = %user_id, "User left family");

        Ok(())
    }

    /// Remove someone from the roster; admin only, never the owner
    #[instrument(skip(self))]
    pub async fn remove_roster_member(
        &self,
        family_id: Snowflake,
        target_user_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        let mut family = FamilyAccess::new(self.ctx)
            .assert_admin(family_id, actor_id)
            .await?;

        family.remove_member(target_user_id)?;

        if !self
            .ctx
            .family_repo()
            .remove_membership(family_id, target_user_id)
            .await?
        {
            return Err(DomainError::NotOnRoster(target_user_id).into());
        }

        info!(
            family_id = %family_id,
            user_id = %target_user_id,
            actor_id = %actor_id,
            "Removed user from roster"
        );

        Ok(())
    }

    /// Change someone's roster role; admin only, the owner stays admin
    #[instrument(skip(self))]
    pub async fn set_roster_role(
        &self,
        family_id: Snowflake,
        target_user_id: Snowflake,
        role: FamilyRole,
        actor_id: Snowflake,
    ) -> ServiceResult<FamilyResponse> {
        let mut family = FamilyAccess::new(self.ctx)
            .assert_admin(family_id, actor_id)
            .await?;

        family.set_role(target_user_id, role)?;
        self.ctx
            .family_repo()
            .set_role(family_id, target_user_id, role)
            .await?;

        info!(
            family_id = %family_id,
            user_id = %target_user_id,
            role = role.as_str(),
            "Roster role changed"
        );

        Ok(FamilyResponse::from(family))
    }
}
