//! Route wiring under `/api/v1` with a mocked database.

use std::collections::BTreeMap;

use actix_web::{App, http::StatusCode, test, web};
use sea_orm::{DatabaseBackend, MockDatabase, Value};

use recipes_lib::api;
use recipes_lib::config::{ListingConfig, MediaConfig};
use recipes_lib::db::DbPool;

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

macro_rules! app {
    ($db:expr, $listing:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(DbPool::from_connection($db.into_connection())))
                .app_data(web::Data::new($listing))
                .app_data(web::Data::new(MediaConfig::default()))
                .service(
                    web::scope("/api/v1")
                        .configure(api::configure_health_routes)
                        .configure(api::configure_recipe_routes)
                        .configure(api::configure_author_routes),
                ),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_health_under_api_scope() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres), ListingConfig::default());

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_empty_home_has_single_empty_page() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(0)]])
        .append_query_results([Vec::<recipes_lib::entity::recipe::Model>::new()]);
    let app = app!(db, ListingConfig::default());

    let req = test::TestRequest::get().uri("/api/v1/recipes").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["recipes"], serde_json::json!([]));
    assert_eq!(body["page"]["num_pages"], 1);
    assert_eq!(body["page"]["has_next"], false);
    assert_eq!(body["pagination"]["page_range"], serde_json::json!([1]));
}

#[actix_rt::test]
async fn test_window_uses_configured_link_count() {
    // 60 recipes at 3 per page is 20 pages
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(60)]])
        .append_query_results([Vec::<recipes_lib::entity::recipe::Model>::new()]);
    let listing = ListingConfig {
        per_page: 3,
        pagination_links: 6,
    };
    let app = app!(db, listing);

    let req = test::TestRequest::get().uri("/api/v1/recipes?page=10").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["page"]["number"], 10);
    assert_eq!(body["page"]["num_pages"], 20);
    assert_eq!(body["pagination"]["pagination"], serde_json::json!([8, 9, 10, 11, 12, 13]));
    assert_eq!(body["pagination"]["qty_pages"], 6);
}

#[actix_rt::test]
async fn test_page_zero_is_not_found() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres), ListingConfig::default());

    let req = test::TestRequest::get().uri("/api/v1/recipes?page=0").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_blank_search_error_body() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres), ListingConfig::default());

    let req = test::TestRequest::get()
        .uri("/api/v1/recipes/search?q=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Search term not found");
}
