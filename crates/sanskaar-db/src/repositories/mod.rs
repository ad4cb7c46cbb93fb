//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in sanskaar-core.

mod error;
mod family;
mod invitation;
mod legacy_tree;
mod member;
mod relationship;

pub use family::PgFamilyRepository;
pub use invitation::PgInvitationRepository;
pub use legacy_tree::PgLegacyTreeRepository;
pub use member::PgFamilyMemberRepository;
pub use relationship::PgRelationshipRepository;
