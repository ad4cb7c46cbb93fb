//! # sanskaar-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use dto::*;
pub use services::{
    FamilyAccess, FamilyMemberService, FamilyService, FamilyTreeService, InvitationService,
    LegacyTreeService, RelationshipService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
