//! # sanskaar-api
//!
//! REST API server for family trees, built on Axum.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_configured_app, run, serve};
pub use state::AppState;
