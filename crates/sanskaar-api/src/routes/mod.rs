//! Route definitions
//!
//! API routes grouped by resource and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{
    families, health, invitations, legacy, members, relationships, roster, tree,
};
use crate::state::AppState;

/// Main API router; health routes are mounted separately
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health routes, kept out of the rate limiter
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(family_routes())
        .merge(member_routes())
        .merge(relationship_routes())
        .merge(invitation_routes())
        .merge(legacy_routes())
}

fn family_routes() -> Router<AppState> {
    Router::new()
        .route("/families", post(families::create_family))
        .route("/families/@me", get(families::list_my_families))
        .route("/families/join", post(families::join_family))
        .route(
            "/families/:family_id",
            get(families::get_family)
                .patch(families::update_family)
                .delete(families::delete_family),
        )
        // Roster
        .route("/families/:family_id/roster/@me", delete(roster::leave_family))
        .route(
            "/families/:family_id/roster/:user_id",
            patch(roster::update_roster_role).delete(roster::remove_roster_member),
        )
        // Views
        .route("/families/:family_id/tree", get(tree::get_tree))
        .route("/families/:family_id/generations", get(tree::get_generations))
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/families/:family_id/members",
            get(members::list_members).post(members::add_member),
        )
        .route(
            "/families/:family_id/members/:member_id",
            get(members::get_member)
                .patch(members::update_member)
                .delete(members::remove_member),
        )
}

fn relationship_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/families/:family_id/relationships",
            get(relationships::list_relationships).post(relationships::add_relationship),
        )
        .route(
            "/families/:family_id/relationships/:relationship_id",
            delete(relationships::remove_relationship),
        )
}

fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/families/:family_id/invitations",
            get(invitations::list_invitations).post(invitations::create_invitation),
        )
        .route(
            "/families/:family_id/invitations/:invitation_id",
            delete(invitations::cancel_invitation),
        )
        // Token holders
        .route("/invitations/:token", get(invitations::preview_invitation))
        .route("/invitations/:token/accept", post(invitations::accept_invitation))
}

fn legacy_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/legacy-trees",
            get(legacy::list_trees).post(legacy::create_tree),
        )
        .route(
            "/legacy-trees/:tree_id",
            get(legacy::get_tree).delete(legacy::delete_tree),
        )
        .route("/legacy-trees/:tree_id/nodes", post(legacy::append_node))
}
