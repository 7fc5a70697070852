//! Route definitions for the `/sponsors` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sponsors;
use crate::state::AppState;

/// Routes mounted at `/sponsors`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sponsors::list_sponsors).post(sponsors::create_sponsor))
        .route(
            "/{id}",
            get(sponsors::get_sponsor).patch(sponsors::update_sponsor),
        )
        .route("/{id}/archive", post(sponsors::archive_sponsor))
        .route("/{id}/restore", post(sponsors::restore_sponsor))
        .route("/{id}/deals", get(sponsors::list_sponsor_deals))
}
