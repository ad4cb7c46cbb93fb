//! Database models - SQLx-compatible structs for PostgreSQL tables

mod family;
mod invitation;
mod legacy_tree;
mod member;
mod relationship;

pub use family::{FamilyModel, MembershipModel};
pub use invitation::InvitationModel;
pub use legacy_tree::LegacyTreeModel;
pub use member::FamilyMemberModel;
pub use relationship::RelationshipModel;
