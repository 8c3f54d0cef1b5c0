mod common;

use assetman_core::roles::Role;
use axum::http::StatusCode;
use common::{body_json, get, get_auth, token_for};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn lookups_return_all_four_lists_sorted_by_name(pool: PgPool) {
    common::insert_org_unit(&pool, "Sales").await;
    common::insert_org_unit(&pool, "Engineering").await;
    common::insert_location(&pool, "Data Center", Some("B1")).await;

    let response = get_auth(
        common::build_test_app(pool),
        "/lookups",
        &token_for(Role::Viewer),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let names = |key: &str| -> Vec<String> {
        json[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(
        names("statuses"),
        vec!["in_stock", "in_use", "repair", "retired"]
    );
    assert_eq!(names("org_units"), vec!["Engineering", "Sales"]);
    assert_eq!(names("locations"), vec!["Data Center"]);
    assert_eq!(names("types").len(), 7);
    assert!(names("types").contains(&"CloudAccount".to_string()));
    assert_eq!(json["statuses"][3]["is_active"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn lookups_require_authentication(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/lookups").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
