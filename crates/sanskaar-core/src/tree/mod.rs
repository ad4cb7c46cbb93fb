//! Family tree views
//!
//! Two pure builders over borrowed member and relationship lists:
//! - [`resolve_tree`] lays members out as parent/child hierarchies from the
//!   relationship graph.
//! - [`group_by_generation`] buckets members by their relation label and
//!   ignores relationships entirely.
//!
//! Neither mutates its input, and both produce the same output for the same
//! input.

mod generations;
mod hierarchy;

pub use generations::{group_by_generation, Generation, GenerationView};
pub use hierarchy::{resolve_tree, TreeNode, MAX_TREE_DEPTH};
