//! Invitation handlers
//!
//! Family-scoped routes for admins, plus token routes for whoever holds
//! the link.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use sanskaar_core::entities::InvitationStatus;
use sanskaar_service::{
    CreateInvitationRequest, FamilyResponse, InvitationPreviewResponse, InvitationResponse,
    InvitationService,
};
use serde::Deserialize;

use crate::extractors::{
    AuthUser, FamilyIdPath, InvitationIdPath, InvitationTokenPath, OptionalValidatedJson,
};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Optional status filter for the invitation list
#[derive(Debug, Default, Deserialize)]
pub struct InvitationListQuery {
    pub status: Option<String>,
}

impl InvitationListQuery {
    fn status(&self) -> Result<Option<InvitationStatus>, ApiError> {
        self.status
            .as_deref()
            .map(|raw| {
                InvitationStatus::parse(raw).ok_or_else(|| {
                    ApiError::invalid_query(format!("Unknown invitation status '{raw}'"))
                })
            })
            .transpose()
    }
}

/// Issue an invitation; the body may be omitted entirely
///
/// POST /families/{family_id}/invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
    OptionalValidatedJson(request): OptionalValidatedJson<CreateInvitationRequest>,
) -> ApiResult<Created<Json<InvitationResponse>>> {
    let family_id = path.family_id()?;

    let service = InvitationService::new(state.service_context());
    let response = service
        .create_invitation(family_id, auth.user_id, request.unwrap_or_default())
        .await?;
    Ok(Created(Json(response)))
}

/// GET /families/{family_id}/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<FamilyIdPath>,
    Query(query): Query<InvitationListQuery>,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let family_id = path.family_id()?;
    let status = query.status()?;

    let service = InvitationService::new(state.service_context());
    let invitations = service
        .list_invitations(family_id, auth.user_id, status)
        .await?;
    Ok(Json(invitations))
}

/// Cancel a pending invitation
///
/// DELETE /families/{family_id}/invitations/{invitation_id}
pub async fn cancel_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<InvitationIdPath>,
) -> ApiResult<Json<InvitationResponse>> {
    let family_id = path.family_id()?;
    let invitation_id = path.invitation_id()?;

    let service = InvitationService::new(state.service_context());
    let response = service
        .cancel_invitation(family_id, invitation_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Public preview of the family behind a token
///
/// GET /invitations/{token}
pub async fn preview_invitation(
    State(state): State<AppState>,
    Path(path): Path<InvitationTokenPath>,
) -> ApiResult<Json<InvitationPreviewResponse>> {
    let service = InvitationService::new(state.service_context());
    let preview = service.preview_invitation(path.token()).await?;
    Ok(Json(preview))
}

/// Redeem a token and join its family
///
/// POST /invitations/{token}/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<InvitationTokenPath>,
) -> ApiResult<Json<FamilyResponse>> {
    let service = InvitationService::new(state.service_context());
    let family = service
        .accept_invitation(path.token(), auth.user_id)
        .await?;
    Ok(Json(family))
}
