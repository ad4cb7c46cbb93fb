//! In-memory repositories for service tests
//!
//! One shared store implements every repository trait so that cascades
//! (member removal, family deletion) behave like the PostgreSQL schema.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sanskaar_common::JwtService;
use sanskaar_core::entities::{
    Family, FamilyInvitation, FamilyMember, FamilyRole, InvitationStatus, LegacyFamilyTree,
    Membership, Relationship,
};
use sanskaar_core::traits::{
    FamilyMemberRepository, FamilyRepository, InvitationRepository, LegacyTreeRepository,
    MemberQuery, RelationshipRepository, RepoResult,
};
use sanskaar_core::{DomainError, Snowflake, SnowflakeGenerator};

use crate::services::ServiceContext;

#[derive(Default)]
struct State {
    families: BTreeMap<Snowflake, Family>,
    members: BTreeMap<Snowflake, FamilyMember>,
    edges: BTreeMap<Snowflake, Relationship>,
    invitations: BTreeMap<Snowflake, FamilyInvitation>,
    trees: BTreeMap<Snowflake, LegacyFamilyTree>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    /// Yield to the scheduler after a token lookup, so concurrent callers
    /// all read an invitation before any of them claims it
    yield_after_token_lookup: AtomicBool,
    accept_calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn invitation(&self, id: Snowflake) -> Option<FamilyInvitation> {
        self.state.lock().invitations.get(&id).cloned()
    }

    pub fn yield_after_token_lookup(&self) {
        self.yield_after_token_lookup.store(true, Ordering::SeqCst);
    }

    /// How many conditional claims reached the store
    pub fn accept_calls(&self) -> usize {
        self.accept_calls.load(Ordering::SeqCst)
    }

    pub fn edge_count(&self) -> usize {
        self.state.lock().edges.len()
    }

    /// Move an invitation's deadline, e.g. into the past
    pub fn set_expiry(&self, id: Snowflake, expires_at: DateTime<Utc>) {
        if let Some(invitation) = self.state.lock().invitations.get_mut(&id) {
            invitation.expires_at = expires_at;
        }
    }
}

/// Context over a fresh in-memory store
pub fn test_context() -> (ServiceContext, Arc<InMemoryStore>) {
    let store = InMemoryStore::new();
    let ctx = ServiceContext::builder()
        .family_repo(store.clone())
        .member_repo(store.clone())
        .relationship_repo(store.clone())
        .invitation_repo(store.clone())
        .legacy_tree_repo(store.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret")))
        .snowflake_generator(Arc::new(SnowflakeGenerator::default()))
        .build()
        .expect("all dependencies provided");
    (ctx, store)
}

#[async_trait]
impl FamilyRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Family>> {
        Ok(self.state.lock().families.get(&id).cloned())
    }

    async fn find_by_invite_code(&self, code: &str) -> RepoResult<Option<Family>> {
        let state = self.state.lock();
        Ok(state.families.values().find(|f| f.invite_code == code).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Family>> {
        let state = self.state.lock();
        Ok(state
            .families
            .values()
            .filter(|f| f.is_member(user_id))
            .cloned()
            .collect())
    }

    async fn create(&self, family: &Family) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state
            .families
            .values()
            .any(|f| f.invite_code == family.invite_code)
        {
            return Err(DomainError::InviteCodeExists);
        }
        state.families.insert(family.id, family.clone());
        Ok(())
    }

    async fn update(&self, family: &Family) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .families
            .get_mut(&family.id)
            .ok_or(DomainError::FamilyNotFound(family.id))?;
        stored.name.clone_from(&family.name);
        stored.description.clone_from(&family.description);
        stored.privacy = family.privacy;
        stored.settings = family.settings;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        state
            .families
            .remove(&id)
            .ok_or(DomainError::FamilyNotFound(id))?;
        state.members.retain(|_, m| m.family_id != id);
        state.edges.retain(|_, e| e.family_id != id);
        state.invitations.retain(|_, i| i.family_id != id);
        Ok(())
    }

    async fn add_membership(&self, family_id: Snowflake, membership: &Membership) -> RepoResult<()> {
        let mut state = self.state.lock();
        let family = state
            .families
            .get_mut(&family_id)
            .ok_or(DomainError::FamilyNotFound(family_id))?;
        if family.is_member(membership.user_id) {
            return Err(DomainError::AlreadyMember);
        }
        family.members.push(membership.clone());
        Ok(())
    }

    async fn remove_membership(&self, family_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        let Some(family) = state.families.get_mut(&family_id) else {
            return Ok(false);
        };
        let before = family.members.len();
        family.members.retain(|m| m.user_id != user_id);
        Ok(family.members.len() < before)
    }

    async fn set_role(
        &self,
        family_id: Snowflake,
        user_id: Snowflake,
        role: FamilyRole,
    ) -> RepoResult<()> {
        let mut state = self.state.lock();
        let entry = state
            .families
            .get_mut(&family_id)
            .and_then(|f| f.members.iter_mut().find(|m| m.user_id == user_id))
            .ok_or(DomainError::NotOnRoster(user_id))?;
        entry.role = role;
        Ok(())
    }
}

#[async_trait]
impl FamilyMemberRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        family_id: Snowflake,
        id: Snowflake,
    ) -> RepoResult<Option<FamilyMember>> {
        let state = self.state.lock();
        Ok(state
            .members
            .get(&id)
            .filter(|m| m.family_id == family_id)
            .cloned())
    }

    async fn find_by_family(
        &self,
        family_id: Snowflake,
        query: MemberQuery,
    ) -> RepoResult<Vec<FamilyMember>> {
        let state = self.state.lock();
        Ok(state
            .members
            .values()
            .filter(|m| m.family_id == family_id)
            .filter(|m| query.after.map_or(true, |after| m.id > after))
            .take(usize::try_from(query.limit.max(1)).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn find_all_by_family(&self, family_id: Snowflake) -> RepoResult<Vec<FamilyMember>> {
        let state = self.state.lock();
        Ok(state
            .members
            .values()
            .filter(|m| m.family_id == family_id)
            .cloned()
            .collect())
    }

    async fn create(&self, member: &FamilyMember) -> RepoResult<()> {
        self.state.lock().members.insert(member.id, member.clone());
        Ok(())
    }

    async fn update(&self, member: &FamilyMember) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.members.get_mut(&member.id) {
            Some(stored) if stored.family_id == member.family_id => {
                *stored = member.clone();
                Ok(())
            }
            _ => Err(DomainError::MemberNotFound(member.id)),
        }
    }

    async fn delete(&self, family_id: Snowflake, id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        if !state
            .members
            .get(&id)
            .is_some_and(|m| m.family_id == family_id)
        {
            return Ok(false);
        }
        state.members.remove(&id);
        state.edges.retain(|_, e| !e.involves(id));
        Ok(true)
    }
}

#[async_trait]
impl RelationshipRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        family_id: Snowflake,
        id: Snowflake,
    ) -> RepoResult<Option<Relationship>> {
        let state = self.state.lock();
        Ok(state
            .edges
            .get(&id)
            .filter(|e| e.family_id == family_id)
            .cloned())
    }

    async fn find_by_family(&self, family_id: Snowflake) -> RepoResult<Vec<Relationship>> {
        let state = self.state.lock();
        Ok(state
            .edges
            .values()
            .filter(|e| e.family_id == family_id)
            .cloned()
            .collect())
    }

    async fn find_by_member(
        &self,
        family_id: Snowflake,
        member_id: Snowflake,
    ) -> RepoResult<Vec<Relationship>> {
        let state = self.state.lock();
        Ok(state
            .edges
            .values()
            .filter(|e| e.family_id == family_id && e.involves(member_id))
            .cloned()
            .collect())
    }

    async fn create(&self, relationship: &Relationship) -> RepoResult<()> {
        let mut state = self.state.lock();
        let key = relationship.key();
        if state.edges.values().any(|e| e.key() == key) {
            return Err(DomainError::RelationshipExists);
        }
        state.edges.insert(relationship.id, relationship.clone());
        Ok(())
    }

    async fn delete(&self, family_id: Snowflake, id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        if state.edges.get(&id).is_some_and(|e| e.family_id == family_id) {
            state.edges.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl InvitationRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<FamilyInvitation>> {
        Ok(self.state.lock().invitations.get(&id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<FamilyInvitation>> {
        let found = self
            .state
            .lock()
            .invitations
            .values()
            .find(|i| i.token == token)
            .cloned();
        if self.yield_after_token_lookup.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        Ok(found)
    }

    async fn find_by_family(
        &self,
        family_id: Snowflake,
        status: Option<InvitationStatus>,
    ) -> RepoResult<Vec<FamilyInvitation>> {
        let state = self.state.lock();
        Ok(state
            .invitations
            .values()
            .rev()
            .filter(|i| i.family_id == family_id)
            .filter(|i| status.map_or(true, |s| i.status == s))
            .cloned()
            .collect())
    }

    async fn create(&self, invitation: &FamilyInvitation) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.invitations.values().any(|i| i.token == invitation.token) {
            return Err(DomainError::InvitationTokenExists);
        }
        state.invitations.insert(invitation.id, invitation.clone());
        Ok(())
    }

    async fn mark_expired(&self, id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        Ok(match state.invitations.get_mut(&id) {
            Some(i) if i.status == InvitationStatus::Pending => {
                i.status = InvitationStatus::Expired;
                true
            }
            _ => false,
        })
    }

    async fn mark_cancelled(&self, id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        Ok(match state.invitations.get_mut(&id) {
            Some(i) if i.status == InvitationStatus::Pending => {
                i.status = InvitationStatus::Cancelled;
                true
            }
            _ => false,
        })
    }

    async fn accept(
        &self,
        id: Snowflake,
        family_id: Snowflake,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<bool> {
        self.accept_calls.fetch_add(1, Ordering::SeqCst);
        // one lock for both writes stands in for the transaction
        let mut state = self.state.lock();
        let claimable = state
            .invitations
            .get(&id)
            .is_some_and(|i| i.status == InvitationStatus::Pending && i.expires_at >= now);
        if !claimable {
            return Ok(false);
        }
        let family = state
            .families
            .get_mut(&family_id)
            .ok_or(DomainError::FamilyNotFound(family_id))?;
        if family.is_member(user_id) {
            return Err(DomainError::AlreadyMember);
        }
        family.members.push(Membership {
            user_id,
            role: FamilyRole::Member,
            joined_at: now,
        });
        if let Some(invitation) = state.invitations.get_mut(&id) {
            invitation.status = InvitationStatus::Accepted;
            invitation.accepted_by = Some(user_id);
            invitation.accepted_at = Some(now);
        }
        Ok(true)
    }
}

#[async_trait]
impl LegacyTreeRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LegacyFamilyTree>> {
        Ok(self.state.lock().trees.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<LegacyFamilyTree>> {
        let state = self.state.lock();
        Ok(state
            .trees
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, tree: &LegacyFamilyTree) -> RepoResult<()> {
        self.state.lock().trees.insert(tree.id, tree.clone());
        Ok(())
    }

    async fn update_nodes(&self, tree: &LegacyFamilyTree) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .trees
            .get_mut(&tree.id)
            .ok_or(DomainError::LegacyTreeNotFound(tree.id))?;
        stored.nodes.clone_from(&tree.nodes);
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().trees.remove(&id).is_some())
    }
}
