//! Legacy tree handlers
//!
//! Owner-only trees with inline nodes, kept for old clients.

use axum::{extract::{Path, State}, Json};
use sanskaar_service::{
    AppendLegacyNodeRequest, CreateLegacyTreeRequest, LegacyTreeResponse, LegacyTreeService,
};

use crate::extractors::{AuthUser, LegacyTreePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /legacy-trees
pub async fn create_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateLegacyTreeRequest>,
) -> ApiResult<Created<Json<LegacyTreeResponse>>> {
    let service = LegacyTreeService::new(state.service_context());
    let tree = service.create_tree(auth.user_id, request).await?;
    Ok(Created(Json(tree)))
}

/// GET /legacy-trees
pub async fn list_trees(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<LegacyTreeResponse>>> {
    let service = LegacyTreeService::new(state.service_context());
    let trees = service.list_trees(auth.user_id).await?;
    Ok(Json(trees))
}

/// GET /legacy-trees/{tree_id}
pub async fn get_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<LegacyTreePath>,
) -> ApiResult<Json<LegacyTreeResponse>> {
    let tree_id = path.tree_id()?;

    let service = LegacyTreeService::new(state.service_context());
    let tree = service.get_tree(tree_id, auth.user_id).await?;
    Ok(Json(tree))
}

/// Append a node to the tree
///
/// POST /legacy-trees/{tree_id}/nodes
pub async fn append_node(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<LegacyTreePath>,
    ValidatedJson(request): ValidatedJson<AppendLegacyNodeRequest>,
) -> ApiResult<Json<LegacyTreeResponse>> {
    let tree_id = path.tree_id()?;

    let service = LegacyTreeService::new(state.service_context());
    let tree = service.append_node(tree_id, auth.user_id, request).await?;
    Ok(Json(tree))
}

/// DELETE /legacy-trees/{tree_id}
pub async fn delete_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<LegacyTreePath>,
) -> ApiResult<NoContent> {
    let tree_id = path.tree_id()?;

    let service = LegacyTreeService::new(state.service_context());
    service.delete_tree(tree_id, auth.user_id).await?;
    Ok(NoContent)
}
