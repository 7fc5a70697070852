//! Route definitions for the `/tickets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Routes mounted at `/tickets`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list_tickets).post(tickets::create_ticket))
        .route("/{id}", get(tickets::get_ticket).patch(tickets::update_ticket))
        .route("/{id}/archive", post(tickets::archive_ticket))
        .route("/{id}/restore", post(tickets::restore_ticket))
        .route("/{id}/reply", post(tickets::reply_ticket))
}
