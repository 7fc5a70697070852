//! Route definitions for the `/portal` resource (token-authorized).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::portal;
use crate::state::AppState;

/// Routes mounted at `/portal`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sponsor/{token}", get(portal::sponsor_portal))
        .route("/deal/{token}", get(portal::deal_portal))
        .route("/brandkit", get(portal::get_brandkit))
        .route("/tickets", post(portal::create_ticket))
        .route("/tickets/{id}", get(portal::get_ticket))
        .route("/tickets/{id}/reply", post(portal::reply_ticket))
        .route("/claims", post(portal::create_claim))
        .route(
            "/deliverables/{id}/approve",
            post(portal::approve_deliverable),
        )
        .route(
            "/deliverables/{id}/comments",
            get(portal::list_comments).post(portal::add_comment),
        )
        .route("/deliverables/{id}/proofs", post(portal::add_proof))
}
