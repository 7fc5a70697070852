pub mod activity;
pub mod auth;
pub mod claims;
pub mod deals;
pub mod deliverables;
pub mod health;
pub mod orgs;
pub mod portal;
pub mod sponsors;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                 login (public)
///
/// /orgs                                       list, create
/// /orgs/{id}                                  get, update
///
/// /sponsors                                   list, create
/// /sponsors/{id}                              get, update
/// /sponsors/{id}/archive|restore              lifecycle (POST)
/// /sponsors/{id}/deals                        list sponsor's deals
///
/// /deals                                      list, create
/// /deals/{id}                                 get, update
/// /deals/{id}/archive|restore                 lifecycle (POST)
/// /deals/{id}/deliverables                    list, create
/// /deals/{id}/brandkit                        get, replace (PUT)
/// /deals/{id}/claims                          list
///
/// /deliverables/{id}                          update (PATCH)
/// /deliverables/{id}/archive|restore|cancel   lifecycle + terminal cancel
/// /deliverables/{id}/proofs                   list, add
/// /deliverables/{id}/comments                 list, add
///
/// /tickets                                    list, create
/// /tickets/{id}                               get (with messages), update
/// /tickets/{id}/archive|restore|reply         lifecycle + reply
///
/// /claims                                     list
/// /claims/{id}                                update (quick-status override)
/// /claims/{id}/decide                         atomic decision (POST)
/// /claims/{id}/archive|restore                lifecycle (POST)
///
/// /activity                                   org trail, ?deal_id=&limit=&offset=
///
/// /portal/sponsor/{token}                     sponsor summary view
/// /portal/deal/{token}                        deal subgraph view
/// /portal/brandkit                            read-only kit, ?deal_token=
/// /portal/tickets                             create (sponsor_token)
/// /portal/tickets/{id}                        get, reply
/// /portal/claims                              eligibility-checked create
/// /portal/deliverables/{id}/approve           one-shot sponsor approval
/// /portal/deliverables/{id}/comments          list, add
/// /portal/deliverables/{id}/proofs            add
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/orgs", orgs::router())
        .nest("/sponsors", sponsors::router())
        .nest("/deals", deals::router())
        .nest("/deliverables", deliverables::router())
        .nest("/tickets", tickets::router())
        .nest("/claims", claims::router())
        .nest("/activity", activity::router())
        .nest("/portal", portal::router())
}
