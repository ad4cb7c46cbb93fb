//! Roster handlers
//!
//! The roster is the list of user accounts with access to a family, as
//! opposed to the people recorded in its tree.

use axum::{extract::{Path, State}, Json};
use sanskaar_service::{FamilyResponse, FamilyService, UpdateRosterRoleRequest};

use crate::extractors::{AuthUser, FamilyIdPath, FamilyUserPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Leave a family; the owner cannot
///
/// DELETE /families/{family_id}/roster/@me
pub async fn leave_family(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
) -> ApiResult<NoContent> {
    let family_id = path.family_id()?;

    let service = FamilyService::new(state.service_context());
    service.leave_family(family_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Change a roster entry's role
///
/// PATCH /families/{family_id}/roster/{user_id}
pub async fn update_roster_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyUserPath>,
    ValidatedJson(request): ValidatedJson<UpdateRosterRoleRequest>,
) -> ApiResult<Json<FamilyResponse>> {
    let family_id = path.family_id()?;
    let user_id = path.user_id()?;

    let service = FamilyService::new(state.service_context());
    let response = service
        .set_roster_role(family_id, user_id, request.role, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Remove someone else from the roster
///
/// DELETE /families/{family_id}/roster/{user_id}
pub async fn remove_roster_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyUserPath>,
) -> ApiResult<NoContent> {
    let family_id = path.family_id()?;
    let user_id = path.user_id()?;

    let service = FamilyService::new(state.service_context());
    service
        .remove_roster_member(family_id, user_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
