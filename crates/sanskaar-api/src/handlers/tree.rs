//! Tree view handlers

use axum::{extract::{Path, State}, Json};
use sanskaar_service::{FamilyTreeResponse, FamilyTreeService, GenerationsResponse};

use crate::extractors::{AuthUser, FamilyIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Hierarchy, or the generation grouping when no structural edges exist
///
/// GET /families/{family_id}/tree
pub async fn get_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
) -> ApiResult<Json<FamilyTreeResponse>> {
    let family_id = path.family_id()?;

    let service = FamilyTreeService::new(state.service_context());
    let tree = service.get_tree(family_id, auth.user_id).await?;
    Ok(Json(tree))
}

/// GET /families/{family_id}/generations
pub async fn get_generations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
) -> ApiResult<Json<GenerationsResponse>> {
    let family_id = path.family_id()?;

    let service = FamilyTreeService::new(state.service_context());
    let view = service.get_generations(family_id, auth.user_id).await?;
    Ok(Json(view))
}
