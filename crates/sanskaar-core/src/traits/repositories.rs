//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations that must be atomic (family
//! creation with its owner, invitation acceptance with the roster insert,
//! member removal with its edges) are single trait methods so the
//! implementation can run them in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Family, FamilyInvitation, FamilyMember, FamilyRole, InvitationStatus, LegacyFamilyTree,
    Membership, Relationship,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Family Repository
// ============================================================================

#[async_trait]
pub trait FamilyRepository: Send + Sync {
    /// Find family by ID, roster included
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Family>>;

    /// Find family by its join code
    async fn find_by_invite_code(&self, code: &str) -> RepoResult<Option<Family>>;

    /// Families the user is on the roster of, oldest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Family>>;

    /// Insert the family and its roster atomically.
    /// Fails with `InviteCodeExists` when the code collides.
    async fn create(&self, family: &Family) -> RepoResult<()>;

    /// Update name, description, privacy and settings
    async fn update(&self, family: &Family) -> RepoResult<()>;

    /// Delete the family and everything scoped to it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Add a roster entry. Fails with `AlreadyMember` on duplicates.
    async fn add_membership(&self, family_id: Snowflake, membership: &Membership) -> RepoResult<()>;

    /// Remove a roster entry; returns whether a row was removed
    async fn remove_membership(&self, family_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    async fn set_role(
        &self,
        family_id: Snowflake,
        user_id: Snowflake,
        role: FamilyRole,
    ) -> RepoResult<()>;
}

// ============================================================================
// Family Member Repository
// ============================================================================

/// Cursor pagination for member listings
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberQuery {
    pub after: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait FamilyMemberRepository: Send + Sync {
    async fn find_by_id(&self, family_id: Snowflake, id: Snowflake)
        -> RepoResult<Option<FamilyMember>>;

    /// Members of a family in insertion order
    async fn find_by_family(
        &self,
        family_id: Snowflake,
        query: MemberQuery,
    ) -> RepoResult<Vec<FamilyMember>>;

    /// Every member of a family in insertion order
    async fn find_all_by_family(&self, family_id: Snowflake) -> RepoResult<Vec<FamilyMember>>;

    async fn create(&self, member: &FamilyMember) -> RepoResult<()>;

    async fn update(&self, member: &FamilyMember) -> RepoResult<()>;

    /// Delete a member and every edge touching it; returns whether it existed
    async fn delete(&self, family_id: Snowflake, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Relationship Repository
// ============================================================================

#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    async fn find_by_id(&self, family_id: Snowflake, id: Snowflake)
        -> RepoResult<Option<Relationship>>;

    /// All edges of a family in insertion order
    async fn find_by_family(&self, family_id: Snowflake) -> RepoResult<Vec<Relationship>>;

    /// Edges with the member at either end
    async fn find_by_member(
        &self,
        family_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<Vec<Relationship>>;

    /// Fails with `RelationshipExists` on a duplicate `(family, from, to, type)`
    async fn create(&self, relationship: &Relationship) -> RepoResult<()>;

    async fn delete(&self, family_id: Snowflake, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Invitation Repository
// ============================================================================

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<FamilyInvitation>>;

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<FamilyInvitation>>;

    /// Invitations of a family, newest first, optionally filtered by status
    async fn find_by_family(
        &self,
        family_id: Snowflake,
        status: Option<InvitationStatus>,
    ) -> RepoResult<Vec<FamilyInvitation>>;

    async fn create(&self, invitation: &FamilyInvitation) -> RepoResult<()>;

    /// Flip `pending -> expired`; returns whether a row changed
    async fn mark_expired(&self, id: Snowflake) -> RepoResult<bool>;

    /// Flip `pending -> cancelled`; returns whether a row changed
    async fn mark_cancelled(&self, id: Snowflake) -> RepoResult<bool>;

    /// In one transaction, flip `pending -> accepted` provided the invitation
    /// has not expired at `now`, and add `user_id` to the roster as a member.
    ///
    /// Returns `false` (and changes nothing) when another caller already
    /// moved the invitation out of `pending`.
    async fn accept(
        &self,
        id: Snowflake,
        family_id: Snowflake,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Legacy Tree Repository
// ============================================================================

#[async_trait]
pub trait LegacyTreeRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LegacyFamilyTree>>;

    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<LegacyFamilyTree>>;

    async fn create(&self, tree: &LegacyFamilyTree) -> RepoResult<()>;

    /// Replace the inline node list
    async fn update_nodes(&self, tree: &LegacyFamilyTree) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}
