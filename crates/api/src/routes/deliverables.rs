//! Route definitions for the `/deliverables` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::deliverables;
use crate::state::AppState;

/// Routes mounted at `/deliverables`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", patch(deliverables::update_deliverable))
        .route("/{id}/archive", post(deliverables::archive_deliverable))
        .route("/{id}/restore", post(deliverables::restore_deliverable))
        .route("/{id}/cancel", post(deliverables::cancel_deliverable))
        .route(
            "/{id}/proofs",
            get(deliverables::list_proofs).post(deliverables::add_proof),
        )
        .route(
            "/{id}/comments",
            get(deliverables::list_comments).post(deliverables::add_comment),
        )
}
