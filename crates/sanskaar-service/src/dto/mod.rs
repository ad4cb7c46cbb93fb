//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AppendLegacyNodeRequest, CreateFamilyRequest, CreateInvitationRequest,
    CreateLegacyTreeRequest, CreateMemberRequest, CreateRelationshipRequest, FamilySettingsPatch,
    JoinFamilyRequest, UpdateFamilyRequest, UpdateMemberRequest, UpdateRosterRoleRequest,
};

// Re-export commonly used response types
pub use responses::{
    FamilyMemberResponse, FamilyResponse, FamilySummaryResponse, FamilyTreeResponse,
    GenerationTierResponse, GenerationsResponse, HealthChecks, HealthResponse,
    InvitationPreviewResponse, InvitationResponse, LegacyTreeResponse, PaginatedResponse,
    PaginationMeta, ReadinessResponse, RelationshipResponse, RosterEntryResponse,
    TreeNodeResponse,
};

// Re-export mappers and helper structs
pub use mappers::{generation_tiers, FamilyWithRole, InvitationWithFamily};
