//! Relationship handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use sanskaar_core::Snowflake;
use sanskaar_service::{CreateRelationshipRequest, RelationshipResponse, RelationshipService};
use serde::Deserialize;

use crate::extractors::{AuthUser, FamilyIdPath, RelationshipPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Optional filter for the relationship list
#[derive(Debug, Default, Deserialize)]
pub struct RelationshipQuery {
    pub member_id: Option<String>,
}

impl RelationshipQuery {
    fn member_id(&self) -> Result<Option<Snowflake>, ApiError> {
        self.member_id
            .as_deref()
            .map(|raw| {
                raw.parse()
                    .map_err(|_| ApiError::invalid_query("Invalid member_id format"))
            })
            .transpose()
    }
}

/// GET /families/{family_id}/relationships
pub async fn list_relationships(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
    Query(query): Query<RelationshipQuery>,
) -> ApiResult<Json<Vec<RelationshipResponse>>> {
    let family_id = path.family_id()?;
    let member_id = query.member_id()?;

    let service = RelationshipService::new(state.service_context());
    let edges = service
        .list_relationships(family_id, auth.user_id, member_id)
        .await?;
    Ok(Json(edges))
}

/// Add a directed edge; the inverse is never implied
///
/// POST /families/{family_id}/relationships
pub async fn add_relationship(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
    ValidatedJson(request): ValidatedJson<CreateRelationshipRequest>,
) -> ApiResult<Created<Json<RelationshipResponse>>> {
    let family_id = path.family_id()?;

    let service = RelationshipService::new(state.service_context());
    let response = service
        .add_relationship(family_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// DELETE /families/{family_id}/relationships/{relationship_id}
pub async fn remove_relationship(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<RelationshipPath>,
) -> ApiResult<NoContent> {
    let family_id = path.family_id()?;
    let relationship_id = path.relationship_id()?;

    let service = RelationshipService::new(state.service_context());
    service
        .remove_relationship(family_id, relationship_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
