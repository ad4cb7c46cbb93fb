//! Relationship service
//!
//! Edges are directed and stored exactly as given; no inverse is ever
//! inserted on the caller's behalf.

use sanskaar_core::entities::Relationship;
use sanskaar_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateRelationshipRequest, RelationshipResponse};

use super::access::FamilyAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Relationship service
pub struct RelationshipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RelationshipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a directed edge between two members of the same family
    #[instrument(skip(self, request))]
    pub async fn add_relationship(
        &self,
        family_id: Snowflake,
        actor_id: Snowflake,
        request: CreateRelationshipRequest,
    ) -> ServiceResult<RelationshipResponse> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        let mut relationship = Relationship::new(
            self.ctx.generate_id(),
            family_id,
            request.from_member_id,
            request.to_member_id,
            request.relation_type,
            actor_id,
        );
        relationship.meta = request.meta;
        relationship.start_date = request.start_date;
        relationship.end_date = request.end_date;
        relationship.notes = request.notes;
        relationship.validate()?;

        for member_id in [relationship.from_member_id, relationship.to_member_id] {
            if self
                .ctx
                .member_repo()
                .find_by_id(family_id, member_id)
                .await?
                .is_none()
            {
                return Err(DomainError::MemberNotFound(member_id).into());
            }
        }

        self.ctx.relationship_repo().create(&relationship).await?;

        info!(
            family_id = %family_id,
            relationship_id = %relationship.id,
            relation_type = relationship.relation_type.as_str(),
            "Relationship added"
        );

        Ok(RelationshipResponse::from(relationship))
    }

    /// All edges of the family, or only those touching `member_id`
    #[instrument(skip(self))]
    pub async fn list_relationships(
        &self,
        family_id: Snowflake,
        actor_id: Snowflake,
        member_id: Option<Snowflake>,
    ) -> ServiceResult<Vec<RelationshipResponse>> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        let edges = match member_id {
            Some(member_id) => {
                self.ctx
                    .relationship_repo()
                    .find_by_member(family_id, member_id)
                    .await?
            }
            None => self.ctx.relationship_repo().find_by_family(family_id).await?,
        };

        Ok(edges.into_iter().map(RelationshipResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn remove_relationship(
        &self,
        family_id: Snowflake,
        relationship_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        if !self
            .ctx
            .relationship_repo()
            .delete(family_id, relationship_id)
            .await?
        {
            return Err(DomainError::RelationshipNotFound(relationship_id).into());
        }

        info!(family_id = %family_id, relationship_id = %relationship_id, "Relationship removed");

        Ok(())
    }
}
