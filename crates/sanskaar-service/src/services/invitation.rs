//! Invitation service
//!
//! Single-use invitation tokens. Expiry is lazy: a pending invitation past
//! its deadline is flipped to `expired` the next time anyone looks at it.

use chrono::{Duration, Utc};
use sanskaar_common::MAX_INVITATION_TTL_HOURS;
use sanskaar_core::entities::{
    generate_invitation_token, FamilyInvitation, InvitationStatus,
};
use sanskaar_core::{DomainError, Snowflake};
use tracing::{debug, info, instrument, warn};

use crate::dto::{
    CreateInvitationRequest, FamilyResponse, InvitationPreviewResponse, InvitationResponse,
    InvitationWithFamily,
};

use super::access::FamilyAccess;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Invitation service
pub struct InvitationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvitationService<'a> {
    /// Create a new InvitationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue an invitation; admins always, members when the family allows it
    #[instrument(skip(self, request))]
    pub async fn create_invitation(
        &self,
        family_id: Snowflake,
        actor_id: Snowflake,
        request: CreateInvitationRequest,
    ) -> ServiceResult<InvitationResponse> {
        let (family, _) = FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        if !family.can_invite(actor_id) {
            debug!(family_id = %family_id, user_id = %actor_id, "Member invites are disabled");
            return Err(DomainError::MemberInvitesDisabled.into());
        }

        let ttl = match request.ttl_hours {
            Some(hours) if (1..=MAX_INVITATION_TTL_HOURS).contains(&hours) => Duration::hours(hours),
            Some(_) => {
                return Err(ServiceError::validation(format!(
                    "ttlHours must be between 1 and {MAX_INVITATION_TTL_HOURS}"
                )))
            }
            None => self.ctx.invitation_ttl(),
        };

        let invitation = FamilyInvitation::new(
            self.ctx.generate_id(),
            family_id,
            generate_invitation_token(),
            actor_id,
            ttl,
        )
        .with_email(request.email)
        .with_phone(request.phone)
        .with_message(request.message);

        self.ctx.invitation_repo().create(&invitation).await?;

        info!(
            family_id = %family_id,
            invitation_id = %invitation.id,
            created_by = %actor_id,
            expires_at = %invitation.expires_at,
            "Invitation created"
        );

        Ok(InvitationResponse::from(invitation))
    }

    /// Redeem a token and join its family as a member
    #[instrument(skip(self, token))]
    pub async fn accept_invitation(
        &self,
        token: &str,
        user_id: Snowflake,
    ) -> ServiceResult<FamilyResponse> {
        let now = Utc::now();
        let invitation = self.find_by_token(token).await?;

        if invitation.needs_expiry(now) {
            self.expire(&invitation).await?;
        }
        invitation.check_acceptable(now)?;

        let family = FamilyAccess::new(self.ctx).load(invitation.family_id).await?;
        if family.is_member(user_id) {
            return Err(DomainError::AlreadyMember.into());
        }

        let claimed = self
            .ctx
            .invitation_repo()
            .accept(invitation.id, invitation.family_id, user_id, now)
            .await?;

        if !claimed {
            // another caller got there between our read and the update
            let status = self
                .ctx
                .invitation_repo()
                .find_by_id(invitation.id)
                .await?
                .map_or(InvitationStatus::Accepted, |i| i.status);
            warn!(invitation_id = %invitation.id, status = status.as_str(), "Lost invitation race");
            return Err(DomainError::InvitationNotPending(status.as_str().to_string()).into());
        }

        info!(
            family_id = %invitation.family_id,
            invitation_id = %invitation.id,
            user_id = %user_id,
            "Invitation accepted"
        );

        let family = FamilyAccess::new(self.ctx).load(invitation.family_id).await?;
        Ok(FamilyResponse::from(family))
    }

    /// Invitations of a family, newest first; admin only
    #[instrument(skip(self))]
    pub async fn list_invitations(
        &self,
        family_id: Snowflake,
        actor_id: Snowflake,
        status: Option<InvitationStatus>,
    ) -> ServiceResult<Vec<InvitationResponse>> {
        FamilyAccess::new(self.ctx)
            .assert_admin(family_id, actor_id)
            .await?;

        let now = Utc::now();
        let mut invitations = self
            .ctx
            .invitation_repo()
            .find_by_family(family_id, None)
            .await?;

        for invitation in &mut invitations {
            if invitation.needs_expiry(now) {
                self.expire(invitation).await?;
                invitation.expire();
            }
        }

        Ok(invitations
            .into_iter()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .map(InvitationResponse::from)
            .collect())
    }

    /// Cancel a pending invitation; admin only
    #[instrument(skip(self))]
    pub async fn cancel_invitation(
        &self,
        family_id: Snowflake,
        invitation_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<InvitationResponse> {
        FamilyAccess::new(self.ctx)
            .assert_admin(family_id, actor_id)
            .await?;

        let mut invitation = self
            .ctx
            .invitation_repo()
            .find_by_id(invitation_id)
            .await?
            .filter(|i| i.family_id == family_id)
            .ok_or(DomainError::InvitationNotFound)?;

        if invitation.needs_expiry(Utc::now()) {
            self.expire(&invitation).await?;
            invitation.expire();
        }
        invitation.cancel()?;

        if !self.ctx.invitation_repo().mark_cancelled(invitation_id).await? {
            return Err(ServiceError::conflict("Invitation is no longer pending"));
        }

        info!(family_id = %family_id, invitation_id = %invitation_id, "Invitation cancelled");

        Ok(InvitationResponse::from(invitation))
    }

    /// Public preview of a token: family name, status and deadline
    #[instrument(skip(self, token))]
    pub async fn preview_invitation(&self, token: &str) -> ServiceResult<InvitationPreviewResponse> {
        let mut invitation = self.find_by_token(token).await?;

        if invitation.needs_expiry(Utc::now()) {
            self.expire(&invitation).await?;
            invitation.expire();
        }

        let family = self
            .ctx
            .family_repo()
            .find_by_id(invitation.family_id)
            .await?
            .ok_or(DomainError::InvitationNotFound)?;

        Ok(InvitationPreviewResponse::from(InvitationWithFamily {
            invitation: &invitation,
            family: &family,
        }))
    }

    async fn find_by_token(&self, token: &str) -> ServiceResult<FamilyInvitation> {
        self.ctx
            .invitation_repo()
            .find_by_token(token)
            .await?
            .ok_or_else(|| DomainError::InvitationNotFound.into())
    }

    async fn expire(&self, invitation: &FamilyInvitation) -> ServiceResult<()> {
        if self.ctx.invitation_repo().mark_expired(invitation.id).await? {
            info!(
                family_id = %invitation.family_id,
                invitation_id = %invitation.id,
                "Invitation expired"
            );
        }
        Ok(())
    }
}
