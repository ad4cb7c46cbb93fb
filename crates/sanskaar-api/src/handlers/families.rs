//! Family handlers
//!
//! Endpoints for creating, joining and administering families.

use axum::{extract::{Path, State}, Json};
use sanskaar_service::{
    CreateFamilyRequest, FamilyResponse, FamilyService, FamilySummaryResponse,
    JoinFamilyRequest, UpdateFamilyRequest,
};

use crate::extractors::{AuthUser, FamilyIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a new family
///
/// POST /families
pub async fn create_family(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateFamilyRequest>,
) -> ApiResult<Created<Json<FamilyResponse>>> {
    let service = FamilyService::new(state.service_context());
    let response = service.create_family(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Families the caller belongs to, with their role
///
/// GET /families/@me
pub async fn list_my_families(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<FamilySummaryResponse>>> {
    let service = FamilyService::new(state.service_context());
    let families = service.list_my_families(auth.user_id).await?;
    Ok(Json(families))
}

/// Join by the family's public invite code
///
/// POST /families/join
pub async fn join_family(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<JoinFamilyRequest>,
) -> ApiResult<Json<FamilyResponse>> {
    let service = FamilyService::new(state.service_context());
    let response = service.join_family(auth.user_id, request).await?;
    Ok(Json(response))
}

/// GET /families/{family_id}
pub async fn get_family(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
) -> ApiResult<Json<FamilyResponse>> {
    let family_id = path.family_id()?;

    let service = FamilyService::new(state.service_context());
    let response = service.get_family(family_id, auth.user_id).await?;
    Ok(Json(response))
}

/// PATCH /families/{family_id}
pub async fn update_family(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateFamilyRequest>,
) -> ApiResult<Json<FamilyResponse>> {
    let family_id = path.family_id()?;

    let service = FamilyService::new(state.service_context());
    let response = service
        .update_family(family_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete the family with its members, edges and invitations
///
/// DELETE /families/{family_id}
pub async fn delete_family(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
) -> ApiResult<NoContent> {
    let family_id = path.family_id()?;

    let service = FamilyService::new(state.service_context());
    service.delete_family(family_id, auth.user_id).await?;
    Ok(NoContent)
}
