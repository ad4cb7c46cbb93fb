//! Family tree views
//!
//! Loads a family's members and edges and hands them to the pure layout
//! builders in `sanskaar_core::tree`.

use sanskaar_core::{group_by_generation, resolve_tree, Snowflake};
use tracing::{debug, instrument};

use crate::dto::{generation_tiers, FamilyTreeResponse, GenerationsResponse, TreeNodeResponse};

use super::access::FamilyAccess;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Family tree service
pub struct FamilyTreeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FamilyTreeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Hierarchy when the family has any parental or spouse edge, otherwise
    /// the generation grouping
    #[instrument(skip(self))]
    pub async fn get_tree(
        &self,
        family_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<FamilyTreeResponse> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        let members = self.ctx.member_repo().find_all_by_family(family_id).await?;
        let relationships = self.ctx.relationship_repo().find_by_family(family_id).await?;

        let structural = relationships
            .iter()
            .any(|r| r.parent_child().is_some() || r.is_spouse());

        if !structural {
            debug!(family_id = %family_id, "No structural edges, grouping by generation");
            let view = group_by_generation(&members);
            return Ok(FamilyTreeResponse::Generations {
                generations: generation_tiers(&view),
            });
        }

        let roots = resolve_tree(&members, &relationships);
        debug!(family_id = %family_id, roots = roots.len(), "Resolved family hierarchy");

        Ok(FamilyTreeResponse::Hierarchy {
            roots: roots.iter().map(TreeNodeResponse::from).collect(),
        })
    }

    /// Members bucketed by their relation label
    #[instrument(skip(self))]
    pub async fn get_generations(
        &self,
        family_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<GenerationsResponse> {
        FamilyAccess::new(self.ctx)
            .assert_member(family_id, actor_id)
            .await?;

        let members = self.ctx.member_repo().find_all_by_family(family_id).await?;
        let view = group_by_generation(&members);

        Ok(GenerationsResponse {
            generations: generation_tiers(&view),
        })
    }
}
