//! Domain entities - core business objects

mod family;
mod invitation;
mod legacy_tree;
mod member;
mod relationship;

pub use family::{generate_invite_code, Family, FamilyPrivacy, FamilyRole, FamilySettings, Membership};
pub use invitation::{generate_invitation_token, FamilyInvitation, InvitationStatus};
pub use legacy_tree::{LegacyFamilyTree, LegacyNodeLink, LegacyTreeNode};
pub use member::{FamilyMember, Gender, MarriageDetails, MemberRelation};
pub use relationship::{RelationType, Relationship, RelationshipKey};
