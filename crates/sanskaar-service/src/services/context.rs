//! Service context - dependency container for services
//!
//! Holds all repositories and other dependencies needed by services.

use std::sync::Arc;

use chrono::Duration;
use sanskaar_common::auth::JwtService;
use sanskaar_core::traits::{
    FamilyMemberRepository, FamilyRepository, InvitationRepository, LegacyTreeRepository,
    RelationshipRepository,
};
use sanskaar_core::{Snowflake, SnowflakeGenerator};
use sanskaar_db::{
    PgFamilyMemberRepository, PgFamilyRepository, PgInvitationRepository, PgLegacyTreeRepository,
    PgPool, PgRelationshipRepository,
};

/// Default lifetime of a new invitation
pub const DEFAULT_INVITATION_TTL_HOURS: i64 = 168;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - JWT service for bearer token validation
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Present when backed by PostgreSQL; used by readiness probes
    pool: Option<PgPool>,

    // Repositories
    family_repo: Arc<dyn FamilyRepository>,
    member_repo: Arc<dyn FamilyMemberRepository>,
    relationship_repo: Arc<dyn RelationshipRepository>,
    invitation_repo: Arc<dyn InvitationRepository>,
    legacy_tree_repo: Arc<dyn LegacyTreeRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    invitation_ttl: Duration,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if any
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn family_repo(&self) -> &dyn FamilyRepository {
        self.family_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn FamilyMemberRepository {
        self.member_repo.as_ref()
    }

    pub fn relationship_repo(&self) -> &dyn RelationshipRepository {
        self.relationship_repo.as_ref()
    }

    pub fn invitation_repo(&self) -> &dyn InvitationRepository {
        self.invitation_repo.as_ref()
    }

    pub fn legacy_tree_repo(&self) -> &dyn LegacyTreeRepository {
        self.legacy_tree_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Lifetime given to invitations created without an explicit one
    pub fn invitation_ttl(&self) -> Duration {
        self.invitation_ttl
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("invitation_ttl", &self.invitation_ttl)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    family_repo: Option<Arc<dyn FamilyRepository>>,
    member_repo: Option<Arc<dyn FamilyMemberRepository>>,
    relationship_repo: Option<Arc<dyn RelationshipRepository>>,
    invitation_repo: Option<Arc<dyn InvitationRepository>>,
    legacy_tree_repo: Option<Arc<dyn LegacyTreeRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    invitation_ttl: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            family_repo: None,
            member_repo: None,
            relationship_repo: None,
            invitation_repo: None,
            legacy_tree_repo: None,
            jwt_service: None,
            snowflake_generator: None,
            invitation_ttl: Duration::hours(DEFAULT_INVITATION_TTL_HOURS),
        }
    }

    /// Wire every repository to PostgreSQL through `pool`
    pub fn postgres(self, pool: PgPool) -> Self {
        self.family_repo(Arc::new(PgFamilyRepository::new(pool.clone())))
            .member_repo(Arc::new(PgFamilyMemberRepository::new(pool.clone())))
            .relationship_repo(Arc::new(PgRelationshipRepository::new(pool.clone())))
            .invitation_repo(Arc::new(PgInvitationRepository::new(pool.clone())))
            .legacy_tree_repo(Arc::new(PgLegacyTreeRepository::new(pool.clone())))
            .pool(pool)
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn family_repo(mut self, repo: Arc<dyn FamilyRepository>) -> Self {
        self.family_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn FamilyMemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn relationship_repo(mut self, repo: Arc<dyn RelationshipRepository>) -> Self {
        self.relationship_repo = Some(repo);
        self
    }

    pub fn invitation_repo(mut self, repo: Arc<dyn InvitationRepository>) -> Self {
        self.invitation_repo = Some(repo);
        self
    }

    pub fn legacy_tree_repo(mut self, repo: Arc<dyn LegacyTreeRepository>) -> Self {
        self.legacy_tree_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn invitation_ttl(mut self, ttl: Duration) -> Self {
        self.invitation_ttl = ttl;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext {
            pool: self.pool,
            family_repo: self
                .family_repo
                .ok_or_else(|| ServiceError::validation("family_repo is required"))?,
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            relationship_repo: self
                .relationship_repo
                .ok_or_else(|| ServiceError::validation("relationship_repo is required"))?,
            invitation_repo: self
                .invitation_repo
                .ok_or_else(|| ServiceError::validation("invitation_repo is required"))?,
            legacy_tree_repo: self
                .legacy_tree_repo
                .ok_or_else(|| ServiceError::validation("legacy_tree_repo is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            invitation_ttl: self.invitation_ttl,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
