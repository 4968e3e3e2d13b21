//! Author profile handler.

use actix_web::{HttpResponse, get, web};

use crate::config::ListingConfig;
use crate::db::{DbPool, RecipeFilter};
use crate::error::{AppError, AppResult};
use crate::models::{AuthorProfileResponse, AuthorSummary, PageQuery};

use super::recipes::recipe_page;

/// Get an author's profile with a page of their published recipes.
#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}",
    tag = "Authors",
    params(
        ("id" = i64, Path, description = "Author ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Author profile", body = AuthorProfileResponse),
        (status = 404, description = "Author not found or page out of range", body = crate::error::ErrorResponse)
    )
)]
#[get("/authors/{id}")]
pub async fn get_author_profile(
    pool: web::Data<DbPool>,
    listing: web::Data<ListingConfig>,
    path: web::Path<i64>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let author = pool
        .get_author(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {}", id)))?;
    let profile = pool.get_profile(id).await?;

    let (page, pagination) =
        recipe_page(&pool, RecipeFilter::Author(id), &listing, query.page_number()).await?;

    Ok(HttpResponse::Ok().json(AuthorProfileResponse {
        author: AuthorSummary::from(&author),
        bio: AuthorProfileResponse::bio_from(profile.as_ref()),
        page: page.meta(),
        recipes: page.object_list,
        pagination,
    }))
}

/// Configure author routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_author_profile);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    use crate::entity::{author, profile};

    #[actix_rt::test]
    async fn test_unknown_author_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<author::Model>::new()]);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DbPool::from_connection(db.into_connection())))
                .app_data(web::Data::new(ListingConfig::default()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/authors/9").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_profile_without_recipes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author::Model {
                id: 9,
                username: "ana".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Maria".to_string(),
                email: None,
                created_at: Utc::now(),
            }]])
            .append_query_results([vec![profile::Model {
                id: 1,
                author_id: 9,
                bio: "Home cook".to_string(),
            }]])
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(0)),
            )])]])
            .append_query_results([Vec::<crate::entity::recipe::Model>::new()]);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DbPool::from_connection(db.into_connection())))
                .app_data(web::Data::new(ListingConfig::default()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/authors/9").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["author"]["full_name"], "Ana Maria (ana)");
        assert_eq!(body["bio"], "Home cook");
        assert_eq!(body["recipes"], serde_json::json!([]));
        assert_eq!(body["page"]["count"], 0);
        assert_eq!(body["pagination"]["pagination"], serde_json::json!([1]));
    }
}
