//! FamilyInvitation entity <-> model mapper

use sanskaar_core::entities::{FamilyInvitation, InvitationStatus};
use sanskaar_core::value_objects::Snowflake;

use crate::models::InvitationModel;

impl From<InvitationModel> for FamilyInvitation {
    fn from(model: InvitationModel) -> Self {
        FamilyInvitation {
            id: Snowflake::new(model.id),
            family_id: Snowflake::new(model.family_id),
            token: model.token,
            email: model.email,
            phone: model.phone,
            status: InvitationStatus::parse(&model.status).unwrap_or_default(),
            expires_at: model.expires_at,
            message: model.message,
            accepted_by: model.accepted_by.map(Snowflake::new),
            accepted_at: model.accepted_at,
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
        }
    }
}
