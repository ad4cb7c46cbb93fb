//! Route handlers
//!
//! HTTP request handlers organized by resource.

pub mod families;
pub mod health;
pub mod invitations;
pub mod legacy;
pub mod members;
pub mod relationships;
pub mod roster;
pub mod tree;
