//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) on a
//! test database pool, seeds staff users through the repository layer, and
//! provides thin request/response helpers over `tower::ServiceExt`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use sponsorops_api::auth::jwt::{generate_access_token, JwtConfig};
use sponsorops_api::auth::password::hash_password;
use sponsorops_api::config::ServerConfig;
use sponsorops_api::routes;
use sponsorops_api::state::AppState;
use sponsorops_db::models::user::CreateUser;
use sponsorops_db::repositories::{OrganizationRepo, UserRepo};

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the router construction in `main.rs`.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// A seeded staff user: the organization scope and a ready-to-send bearer
/// token.
pub struct StaffUser {
    pub user_id: i64,
    pub organization_id: i64,
    pub email: String,
    pub bearer: String,
}

/// Create an organization and a staff user inside it, returning a valid
/// bearer token signed with the test JWT secret.
pub async fn seed_staff(pool: &SqlitePool, org_name: &str, email: &str) -> StaffUser {
    let mut conn = pool.acquire().await.unwrap();
    let org = OrganizationRepo::create(&mut conn, org_name).await.unwrap();
    let user = UserRepo::create(
        &mut conn,
        &CreateUser {
            organization_id: org.id,
            email: email.to_string(),
            password_hash: hash_password("staff-password").unwrap(),
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap();

    let token = generate_access_token(user.id, &user.role, &test_config().jwt).unwrap();

    StaffUser {
        user_id: user.id,
        organization_id: org.id,
        email: user.email,
        bearer: format!("Bearer {token}"),
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(AUTHORIZATION, bearer);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, bearer: Option<&str>) -> Response {
    send(app, Method::GET, uri, bearer, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    bearer: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, bearer, Some(body)).await
}

/// POST with an empty body (lifecycle operations).
pub async fn post_empty(app: Router, uri: &str, bearer: Option<&str>) -> Response {
    send(app, Method::POST, uri, bearer, None).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    bearer: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, uri, bearer, Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    bearer: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, bearer, Some(body)).await
}

/// Deserialize a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
