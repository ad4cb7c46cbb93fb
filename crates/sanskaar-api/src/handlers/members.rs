//! Family member handlers
//!
//! People recorded in a family tree.

use axum::{extract::{Path, State}, Json};
use sanskaar_service::{
    CreateMemberRequest, FamilyMemberResponse, FamilyMemberService, PaginatedResponse,
    UpdateMemberRequest,
};

use crate::extractors::{AuthUser, FamilyIdPath, FamilyMemberPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /families/{family_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<FamilyMemberResponse>>> {
    let family_id = path.family_id()?;

    let service = FamilyMemberService::new(state.service_context());
    let page = service
        .list_members(
            family_id,
            auth.user_id,
            pagination.after,
            Some(pagination.limit),
        )
        .await?;
    Ok(Json(page))
}

/// POST /families/{family_id}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Created<Json<FamilyMemberResponse>>> {
    let family_id = path.family_id()?;

    let service = FamilyMemberService::new(state.service_context());
    let response = service.add_member(family_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// GET /families/{family_id}/members/{member_id}
pub async fn get_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyMemberPath>,
) -> ApiResult<Json<FamilyMemberResponse>> {
    let family_id = path.family_id()?;
    let member_id = path.member_id()?;

    let service = FamilyMemberService::new(state.service_context());
    let response = service
        .get_member(family_id, member_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Partial update; absent fields are left alone
///
/// PATCH /families/{family_id}/members/{member_id}
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyMemberPath>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<FamilyMemberResponse>> {
    let family_id = path.family_id()?;
    let member_id = path.member_id()?;

    let service = FamilyMemberService::new(state.service_context());
    let response = service
        .update_member(family_id, member_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Remove a member and every edge touching them
///
/// DELETE /families/{family_id}/members/{member_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyMemberPath>,
) -> ApiResult<NoContent> {
    let family_id = path.family_id()?;
    let member_id = path.member_id()?;

    let service = FamilyMemberService::new(state.service_context());
    service
        .remove_member(family_id, member_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
