//! Family member service
//!
//! Handles the people recorded in a family tree. These are records, not
//! platform accounts; any roster member may edit them.

use sanskaar_core::entities::FamilyMember;
use sanskaar_core::traits::MemberQuery;
use sanskaar_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CreateMemberRequest, FamilyMemberResponse, PaginatedResponse, UpdateMemberRequest,
};

use super::access::FamilyAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Page size when the caller gives none
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
/// Largest page a caller may ask for
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Family member service
pub struct FamilyMemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FamilyMemberService<'a> {
    /// Create a new FamilyMemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a new person in the family
    #[instrument(skip(self, request))]
    pub async fn add_member(
        &self,
        family_id: Snowflake,
        actor_id: Snowflake,
        request: CreateMemberRequest,
    ) -> ServiceResult<FamilyMemberResponse> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        let display_name = FamilyMember::validate_display_name(&request.display_name)?;
        let mut member =
            FamilyMember::new(self.ctx.generate_id(), family_id, display_name, actor_id)
                .with_relation(request.relation.unwrap_or_default());

        member.user_id = request.user_id;
        member.birthdate = request.birthdate;
        member.deathdate = request.deathdate;
        member.birth_place = request.birth_place;
        member.gender = request.gender.unwrap_or_default();
        member.photo_url = request.photo_url;
        member.occupation = request.occupation;
        member.notes = request.notes;
        member.is_alive = request.is_alive.unwrap_or(request.deathdate.is_none());
        member.marriage_details = request.marriage_details;
        member.validate_dates()?;

        self.ctx.member_repo().create(&member).await?;

        info!(
            family_id = %family_id,
            member_id = %member.id,
            actor_id = %actor_id,
            "Family member added"
        );

        Ok(FamilyMemberResponse::from(member))
    }

    /// One page of members in insertion order
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        family_id: Snowflake,
        actor_id: Snowflake,
        after: Option<Snowflake>,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<FamilyMemberResponse>> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
        // one extra row tells whether another page exists
        let mut members = self
            .ctx
            .member_repo()
            .find_by_family(
                family_id,
                MemberQuery {
                    after,
                    limit: limit + 1,
                },
            )
            .await?;

        let has_more = i64::try_from(members.len()).unwrap_or(i64::MAX) > limit;
        members.truncate(usize::try_from(limit).unwrap_or(0));
        let next = if has_more {
            members.last().map(|m| m.id.to_string())
        } else {
            None
        };

        Ok(PaginatedResponse::new(
            members.into_iter().map(FamilyMemberResponse::from).collect(),
            next,
            has_more,
            limit,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_member(
        &self,
        family_id: Snowflake,
        member_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<FamilyMemberResponse> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        let member = self.load(family_id, member_id).await?;
        Ok(FamilyMemberResponse::from(member))
    }

    /// Partial update; absent fields are left alone
    #[instrument(skip(self, request))]
    pub async fn update_member(
        &self,
        family_id: Snowflake,
        member_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateMemberRequest,
    ) -> ServiceResult<FamilyMemberResponse> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        let mut member = self.load(family_id, member_id).await?;

        if let Some(name) = request.display_name {
            member.display_name = FamilyMember::validate_display_name(&name)?;
        }
        if let Some(user_id) = request.user_id {
            member.user_id = user_id;
        }
        if let Some(relation) = request.relation {
            member.relation = relation;
        }
        if let Some(birthdate) = request.birthdate {
            member.birthdate = birthdate;
        }
        if let Some(place) = request.birth_place {
            member.birth_place = place;
        }
        if let Some(gender) = request.gender {
            member.gender = gender;
        }
        if let Some(url) = request.photo_url {
            member.photo_url = url;
        }
        if let Some(occupation) = request.occupation {
            member.occupation = occupation;
        }
        if let Some(notes) = request.notes {
            member.notes = notes;
        }
        if let Some(details) = request.marriage_details {
            member.marriage_details = details;
        }
        if request.deathdate.is_some() {
            member.mark_deceased(request.deathdate);
        }
        if let Some(alive) = request.is_alive {
            member.is_alive = alive;
        }
        member.validate_dates()?;
        member.touch();

        self.ctx.member_repo().update(&member).await?;

        info!(family_id = %family_id, member_id = %member_id, "Family member updated");

        Ok(FamilyMemberResponse::from(member))
    }

    /// Hard delete; edges touching the member go with it
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        family_id: Snowflake,
        member_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        if !self.ctx.member_repo().delete(family_id, member_id).await? {
            return Err(DomainError::MemberNotFound(member_id).into());
        }

        info!(family_id = %family_id, member_id = %member_id, "Family member removed");

        Ok(())
    }

    async fn load(&self, family_id: Snowflake, member_id: Snowflake) -> ServiceResult<FamilyMember> {
        self.ctx
            .member_repo()
            .find_by_id(family_id, member_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(member_id).into())
    }
}
