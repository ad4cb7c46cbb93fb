//! # sanskaar-db
//!
//! Database layer implementing the repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for every repository trait
//! defined in `sanskaar-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the transactional ones
//!   (family creation with its roster, member removal with its edges,
//!   invitation acceptance)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sanskaar_common::AppConfig;
//! use sanskaar_db::{create_pool, PgFamilyRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&config.database).await?;
//!     let families = PgFamilyRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{
    PgFamilyMemberRepository, PgFamilyRepository, PgInvitationRepository, PgLegacyTreeRepository,
    PgRelationshipRepository,
};
