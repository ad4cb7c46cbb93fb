//! Entity to model mappers
//!
//! - `From<Model> for Entity`: database rows to domain objects
//! - label parsers fall back to the column default for unknown strings

mod family;
mod invitation;
mod legacy_tree;
mod member;
mod relationship;

pub use family::family_with_roster;
