//! Repository traits

mod repositories;

pub use repositories::{
    FamilyMemberRepository, FamilyRepository, InvitationRepository, LegacyTreeRepository,
    MemberQuery, RelationshipRepository, RepoResult,
};
