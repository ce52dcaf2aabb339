//! # Ideaflow API
//!
//! HTTP routes for tracking ideas through triage, evaluation, budgeting,
//! estimation, scheduling and go-live.

use axum::{
    routing::{get, put},
    Router,
};

pub mod db;
pub mod handlers;
pub mod response;

pub use db::DbState;
pub use response::{ApiError, ChangesResponse, DataResponse, ErrorResponse, JsonBody};

/// Creates the ideas API router (nested under /api/ideas)
pub fn create_ideas_router() -> Router<DbState> {
    Router::new()
        .route("/", get(handlers::list_ideas).post(handlers::create_idea))
        .route(
            "/{id}",
            get(handlers::get_idea).delete(handlers::delete_idea),
        )
        .route("/{id}/evaluate", put(handlers::evaluate_idea))
        .route("/{id}/budget", put(handlers::allocate_budget))
        .route("/{id}/estimation", put(handlers::add_estimation))
        .route("/{id}/schedule", put(handlers::schedule_idea))
        .route("/{id}/golive", put(handlers::go_live))
}

/// Creates the application router with all API routes bound to `db`
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .nest("/api/ideas", create_ideas_router())
        .with_state(db)
}
