use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` (database unreachable) or `schema_outdated`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
    pub schema: SchemaStatus,
}

/// Applied versus embedded migration versions.
#[derive(Debug, Serialize)]
pub struct SchemaStatus {
    pub applied: Option<i64>,
    pub expected: Option<i64>,
}

impl SchemaStatus {
    fn is_current(&self) -> bool {
        self.applied >= self.expected
    }
}

/// GET /health -- database reachability and migration state.
///
/// Answers 503 unless the database is reachable and fully migrated.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = bookswap_db::health_check(&state.pool).await.is_ok();
    let applied = if db_healthy {
        bookswap_db::applied_schema_version(&state.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Could not read applied schema version");
                None
            })
    } else {
        None
    };
    let schema = SchemaStatus {
        applied,
        expected: bookswap_db::expected_schema_version(),
    };

    let status = match (db_healthy, schema.is_current()) {
        (false, _) => "degraded",
        (true, false) => "schema_outdated",
        (true, true) => "ok",
    };
    let code = if status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            schema,
        }),
    )
}

/// Mount health check routes (root level, not under the API prefix).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
