//! Route definitions for the `/claims` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::claims;
use crate::state::AppState;

/// Routes mounted at `/claims`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(claims::list_claims))
        .route("/{id}", patch(claims::update_claim))
        .route("/{id}/decide", post(claims::decide_claim))
        .route("/{id}/archive", post(claims::archive_claim))
        .route("/{id}/restore", post(claims::restore_claim))
}
