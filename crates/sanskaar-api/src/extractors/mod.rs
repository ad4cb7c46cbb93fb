//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use pagination::Pagination;
pub use path::{
    FamilyIdPath, FamilyMemberPath, FamilyUserPath, InvitationIdPath, InvitationTokenPath,
    LegacyTreePath, RelationshipPath,
};
pub use validated::{OptionalValidatedJson, ValidatedJson};
