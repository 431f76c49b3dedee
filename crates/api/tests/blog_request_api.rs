//! HTTP-level tests for the `/requests` resource and claim endpoints.
//!
//! Claim endpoints use the real current date, so windows here are built
//! relative to `today()`.

mod common;

use axum::http::StatusCode;
use bookswap_core::reservation::today;
use bookswap_core::types::Date;
use chrono::Duration;
use common::{
    body_json, create_author, create_request, create_user, delete_auth, get_auth, patch_json_auth,
    post_json_auth, token_for,
};
use sqlx::PgPool;

fn day(offset: i64) -> Date {
    today() + Duration::days(offset)
}

fn fmt(d: Date) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Request owned by a fresh user with window `[today - 2, today + 10]`.
async fn open_request(pool: &PgPool) -> (i64, i64) {
    let owner = create_author(pool, "owner", "genre1", 150).await;
    let request = create_request(
        pool,
        owner,
        "Dune",
        &fmt(day(20)),
        &fmt(day(-2)),
        &fmt(day(10)),
    )
    .await;
    (owner, request.id)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_request_over_http(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "book_name": "Dune",
        "start_date": "2025-03-01",
        "available_from": "2025-02-01",
        "available_to": "2025-02-20",
    });
    let response = post_json_auth(app, "/api/v1/requests", &token_for(owner), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["book_name"], "Dune");
    assert_eq!(json["data"]["available_to"], "2025-02-20");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "book_name": "Dune",
        "start_date": "2025-03-01",
        "available_from": "2025-02-21",
        "available_to": "2025-02-20",
    });
    let response = post_json_auth(app, "/api/v1/requests", &token_for(owner), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_lifecycle_over_http(pool: PgPool) {
    let (owner, request_id) = open_request(&pool).await;
    let reader = create_user(&pool, "reader").await;
    let token = token_for(reader);
    let claim_uri = format!("/api/v1/requests/{request_id}/claim");
    let blocked_uri = format!("/api/v1/requests/{request_id}/blocked-dates");

    // Reserve.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "claimed_date": fmt(day(3)) });
    let response = post_json_auth(app, &claim_uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["claimed_date"], fmt(day(3)));

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &blocked_uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["blocked_dates"],
        serde_json::json!([fmt(day(3))])
    );

    // Owner sees the claim in the detail view.
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/requests/{request_id}");
    let response = get_auth(app, &uri, &token_for(owner)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["claim_count"], 1);
    assert_eq!(json["data"]["claims"][0]["claimant_username"], "reader");

    // An empty date withdraws.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "claimed_date": "" });
    let response = post_json_auth(app, &claim_uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Withdrawing again is a no-op.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &claim_uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &blocked_uri, &token).await;
    assert_eq!(
        body_json(response).await["data"]["blocked_dates"],
        serde_json::json!([])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_rejections_over_http(pool: PgPool) {
    let (owner, request_id) = open_request(&pool).await;
    let reader = create_user(&pool, "reader").await;
    let rival = create_user(&pool, "rival").await;
    let claim_uri = format!("/api/v1/requests/{request_id}/claim");

    let post = |token: String, claimed_date: String| {
        let pool = pool.clone();
        let uri = claim_uri.clone();
        async move {
            let app = common::build_test_app(pool);
            let body = serde_json::json!({ "claimed_date": claimed_date });
            let response = post_json_auth(app, &uri, &token, body).await;
            (response.status(), body_json(response).await)
        }
    };

    let (status, json) = post(token_for(owner), fmt(day(3))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "SELF_CLAIM");

    // The window opened two days ago, but past dates are never claimable.
    let (status, json) = post(token_for(reader), fmt(day(-1))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "OUT_OF_WINDOW");
    assert_eq!(json["details"]["min_allowed"], fmt(day(0)));
    assert_eq!(json["details"]["max_allowed"], fmt(day(10)));

    let (status, _) = post(token_for(reader), fmt(day(11))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, json) = post(token_for(reader), "next tuesday".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_FORMAT");

    let (status, _) = post(token_for(reader), fmt(day(0))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = post(token_for(rival), fmt(day(0))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "DATE_TAKEN");

    let (status, json) = post(token_for(reader), fmt(day(5))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "ALREADY_CLAIMED");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/requests/999999/claim",
        &token_for(reader),
        serde_json::json!({ "claimed_date": fmt(day(1)) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_edits_and_deletes_over_http(pool: PgPool) {
    let (owner, request_id) = open_request(&pool).await;
    let reader = create_user(&pool, "reader").await;
    let uri = format!("/api/v1/requests/{request_id}");

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "book_name": "Hijacked" });
    let response = patch_json_auth(app, &uri, &token_for(reader), body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "available_to": fmt(day(12)) });
    let response = patch_json_auth(app, &uri, &token_for(owner), body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["available_to"], fmt(day(12)));

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("{uri}/claim"),
        &token_for(reader),
        serde_json::json!({ "claimed_date": fmt(day(12)) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token_for(reader)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token_for(owner)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("{uri}/blocked-dates"), &token_for(reader)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/requests/mine", &token_for(reader)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["accepted"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn available_view_over_http(pool: PgPool) {
    let (_owner, request_id) = open_request(&pool).await;
    let other = create_author(&pool, "other", "genre4", 20).await;
    create_request(&pool, other, "Emma", &fmt(day(30)), &fmt(day(1)), &fmt(day(5))).await;
    let reader = create_user(&pool, "reader").await;
    let token = token_for(reader);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/requests/available?genre=genre1&audience=size2", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], request_id);
    assert_eq!(items[0]["owner_username"], "owner");
    assert_eq!(items[0]["owner_audience"], "size2");
    assert_eq!(json["data"]["today"], fmt(day(0)));

    // Empty values mean "no filter".
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/requests/available?genre=&audience=", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/requests/available?audience=huge", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_FORMAT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn schedule_over_http(pool: PgPool) {
    let (_owner, request_id) = open_request(&pool).await;
    let reader = create_user(&pool, "reader").await;
    let token = token_for(reader);
    create_request(&pool, reader, "Own", &fmt(day(40)), &fmt(day(1)), &fmt(day(9))).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/requests/{request_id}/claim"),
        &token,
        serde_json::json!({ "claimed_date": fmt(day(4)) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/requests/schedule", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["promotion_dates"], serde_json::json!([fmt(day(4))]));
    assert_eq!(json["data"]["request_dates"], serde_json::json!([fmt(day(40))]));
}
