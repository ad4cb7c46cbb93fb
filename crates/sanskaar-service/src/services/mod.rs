//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod access;
pub mod context;
pub mod error;
pub mod family;
pub mod invitation;
pub mod legacy;
pub mod member;
pub mod relationship;
pub mod tree;

// Re-export all services for convenience
pub use access::FamilyAccess;
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_INVITATION_TTL_HOURS};
pub use error::{ServiceError, ServiceResult};
pub use family::FamilyService;
pub use invitation::InvitationService;
pub use legacy::LegacyTreeService;
pub use member::{FamilyMemberService, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use relationship::RelationshipService;
pub use tree::FamilyTreeService;
