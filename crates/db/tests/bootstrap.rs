use sqlx::PgPool;

/// Connect, migrate, and verify the seeded lookup data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    assetman_db::health_check(&pool).await.unwrap();

    let statuses: Vec<(String, bool)> =
        sqlx::query_as("SELECT name, is_active FROM asset_status ORDER BY name")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        statuses,
        vec![
            ("in_stock".to_string(), true),
            ("in_use".to_string(), true),
            ("repair".to_string(), true),
            ("retired".to_string(), false),
        ]
    );

    let types: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM asset_types")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(types.0, 7);
}

/// Every seeded status name resolves to a lifecycle state.
#[sqlx::test(migrations = "./migrations")]
async fn test_seeded_statuses_resolve(pool: PgPool) {
    let statuses = assetman_db::repositories::LookupRepo::list_statuses(&pool)
        .await
        .unwrap();
    for status in statuses {
        assert!(status.state().is_ok(), "{} should resolve", status.name);
    }
}

/// The assignment range check rejects an interval that ends at its start.
#[sqlx::test(migrations = "./migrations")]
async fn test_range_check_constraint(pool: PgPool) {
    let asset_id: i64 = sqlx::query_scalar(
        "INSERT INTO assets (asset_tag, type_id, status_id) \
         SELECT 'CK-1', t.type_id, s.status_id FROM asset_types t, asset_status s \
         WHERE t.name = 'Laptop' AND s.name = 'in_stock' RETURNING asset_id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let err = sqlx::query(
        "INSERT INTO asset_assignments (asset_id, assigned_from, assigned_to) \
         VALUES ($1, '2025-01-01', '2025-01-01')",
    )
    .bind(asset_id)
    .execute(&pool)
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("ck_asset_assignments_range"));
}
