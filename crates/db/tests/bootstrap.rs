use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    bookswap_db::health_check(&pool).await.unwrap();

    let tables = ["users", "profiles", "blog_requests", "claims"];
    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The claim uniqueness constraints must exist under the names the
/// application translates.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_claim_constraints_are_named(pool: PgPool) {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT conname::TEXT FROM pg_constraint
         WHERE conrelid = 'claims'::regclass
         ORDER BY conname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for expected in [
        bookswap_db::repositories::claim_repo::UQ_CLAIMS_REQUEST_DATE,
        bookswap_db::repositories::claim_repo::UQ_CLAIMS_CLAIMANT_REQUEST,
        bookswap_db::repositories::claim_repo::FK_CLAIMS_REQUEST,
    ] {
        assert!(
            names.iter().any(|n| n == expected),
            "missing constraint {expected}, found {names:?}"
        );
    }
}

/// A freshly migrated database is at the newest embedded migration.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_schema_version_matches_embedded_migrations(pool: PgPool) {
    let expected = bookswap_db::expected_schema_version();
    assert_eq!(expected, Some(20260301000005));

    let applied = bookswap_db::applied_schema_version(&pool).await.unwrap();
    assert_eq!(applied, expected);
}
