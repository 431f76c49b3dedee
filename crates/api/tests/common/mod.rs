#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use bookswap_api::auth::jwt::{generate_access_token, JwtConfig};
use bookswap_api::auth::password::hash_password;
use bookswap_api::config::ServerConfig;
use bookswap_api::router::build_app_router;
use bookswap_api::state::AppState;
use bookswap_core::types::{Date, DbId};
use bookswap_db::models::blog_request::{BlogRequest, CreateBlogRequest};
use bookswap_db::models::profile::UpdateProfile;
use bookswap_db::models::user::CreateUser;
use bookswap_db::repositories::{BlogRequestRepo, ProfileRepo, UserRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over `pool`, with the production
/// middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Parse a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> Date {
    Date::parse_from_str(s, "%Y-%m-%d").expect("test date literal")
}

/// Create a user with an empty profile. Returns the user id.
pub async fn create_user(pool: &PgPool, username: &str) -> DbId {
    let password_hash = hash_password("test_password_123!").expect("hashing should succeed");
    let mut tx = pool.begin().await.unwrap();
    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    .expect("user creation should succeed");
    ProfileRepo::ensure(&mut *tx, user.id, "").await.unwrap();
    tx.commit().await.unwrap();
    user.id
}

/// Create a user whose profile carries a genre and subscriber count.
pub async fn create_author(pool: &PgPool, username: &str, genre: &str, subscribers: i32) -> DbId {
    let id = create_user(pool, username).await;
    ProfileRepo::update(
        pool,
        id,
        &UpdateProfile {
            genre: Some(Some(genre.to_string())),
            subscriber_count: Some(Some(subscribers)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    id
}

/// Create a request directly through the repository.
pub async fn create_request(
    pool: &PgPool,
    owner_id: DbId,
    book_name: &str,
    start: &str,
    from: &str,
    to: &str,
) -> BlogRequest {
    BlogRequestRepo::create(
        pool,
        owner_id,
        &CreateBlogRequest {
            book_name: book_name.to_string(),
            start_date: date(start),
            available_from: date(from),
            available_to: date(to),
        },
    )
    .await
    .expect("request creation should succeed")
}

/// Access token for `user_id` signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a raw body with an optional content type, bypassing JSON encoding.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}
