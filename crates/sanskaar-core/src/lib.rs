//! # sanskaar-core
//!
//! Domain layer for the family-tree service: entities, value objects,
//! repository traits, and the pure tree view builders.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod tree;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    generate_invitation_token, generate_invite_code, Family, FamilyInvitation, FamilyMember,
    FamilyPrivacy, FamilyRole, FamilySettings, Gender, InvitationStatus, LegacyFamilyTree,
    LegacyNodeLink, LegacyTreeNode, MarriageDetails, MemberRelation, Membership, RelationType,
    Relationship, RelationshipKey,
};
pub use error::{DomainError, ErrorKind};
pub use traits::{
    FamilyMemberRepository, FamilyRepository, InvitationRepository, LegacyTreeRepository,
    MemberQuery, RelationshipRepository, RepoResult,
};
pub use tree::{
    group_by_generation, resolve_tree, Generation, GenerationView, TreeNode, MAX_TREE_DEPTH,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
