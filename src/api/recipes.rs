//! Recipe API handlers: paginated listings and the detail view.

use actix_web::{HttpRequest, HttpResponse, get, web};
use tracing::debug;

use crate::config::{ListingConfig, MediaConfig};
use crate::db::{DbPool, RecipeFilter, RecipePages};
use crate::error::{AppError, AppResult};
use crate::models::{
    CategoryInfo, CategoryRecipeListResponse, PageQuery, RecipeDetail, RecipeListResponse,
    RecipeSummary, SearchQuery, SearchRecipeListResponse, TagInfo, TagRecipeListResponse,
    cover_url,
};
use crate::pagination::{Page, PaginationRange, make_pagination};

/// Load one page of published recipes matching `filter` with its link window.
pub(crate) async fn recipe_page(
    pool: &DbPool,
    filter: RecipeFilter,
    listing: &ListingConfig,
    page_number: i64,
) -> AppResult<(Page<RecipeSummary>, PaginationRange)> {
    let collection = RecipePages::new(pool.clone(), filter, listing.per_page);
    make_pagination(&collection, page_number, listing.pagination_links).await
}

/// List published recipes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    tag = "Recipes",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of recipes", body = RecipeListResponse),
        (status = 404, description = "Page out of range", body = crate::error::ErrorResponse)
    )
)]
#[get("/recipes")]
pub async fn list_recipes(
    pool: web::Data<DbPool>,
    listing: web::Data<ListingConfig>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let (page, pagination) =
        recipe_page(&pool, RecipeFilter::All, &listing, query.page_number()).await?;

    Ok(HttpResponse::Ok().json(RecipeListResponse {
        page: page.meta(),
        recipes: page.object_list,
        pagination,
    }))
}

/// List published recipes in a category.
///
/// Returns 404 when the category has no published recipes.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/category/{category_id}",
    tag = "Recipes",
    params(
        ("category_id" = i64, Path, description = "Category ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of recipes in the category", body = CategoryRecipeListResponse),
        (status = 404, description = "Unknown or empty category", body = crate::error::ErrorResponse)
    )
)]
#[get("/recipes/category/{category_id}")]
pub async fn list_category_recipes(
    pool: web::Data<DbPool>,
    listing: web::Data<ListingConfig>,
    path: web::Path<i64>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let category_id = path.into_inner();

    let category = pool
        .get_category(category_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {}", category_id)))?;

    let (page, pagination) = recipe_page(
        &pool,
        RecipeFilter::Category(category_id),
        &listing,
        query.page_number(),
    )
    .await?;

    if page.object_list.is_empty() {
        return Err(AppError::NotFound(format!(
            "Recipes in category {}",
            category_id
        )));
    }

    Ok(HttpResponse::Ok().json(CategoryRecipeListResponse {
        title: format!("{} - Category | ", category.name),
        category: CategoryInfo::from(&category),
        page: page.meta(),
        recipes: page.object_list,
        pagination,
    }))
}

/// Search published recipes by title or description.
///
/// The term is trimmed; a blank term is a 404.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/search",
    tag = "Recipes",
    params(SearchQuery),
    responses(
        (status = 200, description = "Page of matching recipes", body = SearchRecipeListResponse),
        (status = 404, description = "Blank search term or page out of range", body = crate::error::ErrorResponse)
    )
)]
#[get("/recipes/search")]
pub async fn search_recipes(
    pool: web::Data<DbPool>,
    listing: web::Data<ListingConfig>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let term = query.term();
    if term.is_empty() {
        return Err(AppError::NotFound("Search term".to_string()));
    }

    debug!(term = %term, "Searching recipes");

    let (page, pagination) = recipe_page(
        &pool,
        RecipeFilter::Search(term.to_string()),
        &listing,
        query.page_query().page_number(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(SearchRecipeListResponse {
        page_title: SearchRecipeListResponse::page_title_for(term),
        search_term: term.to_string(),
        additional_url_query: SearchRecipeListResponse::url_query_for(term),
        page: page.meta(),
        recipes: page.object_list,
        pagination,
    }))
}

/// List published recipes carrying a tag.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/tags/{slug}",
    tag = "Recipes",
    params(
        ("slug" = String, Path, description = "Tag slug"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of tagged recipes", body = TagRecipeListResponse),
        (status = 404, description = "Unknown tag or page out of range", body = crate::error::ErrorResponse)
    )
)]
#[get("/recipes/tags/{slug}")]
pub async fn list_tag_recipes(
    pool: web::Data<DbPool>,
    listing: web::Data<ListingConfig>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let tag = pool
        .get_tag_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag {}", slug)))?;

    let (page, pagination) =
        recipe_page(&pool, RecipeFilter::Tag(tag.id), &listing, query.page_number()).await?;

    Ok(HttpResponse::Ok().json(TagRecipeListResponse {
        tag: TagInfo::from(&tag),
        page: page.meta(),
        recipes: page.object_list,
        pagination,
    }))
}

/// Get a published recipe by ID.
///
/// The cover is returned as an absolute URL built from the request host.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    tag = "Recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetail),
        (status = 404, description = "Recipe not found or unpublished", body = crate::error::ErrorResponse)
    )
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    media: web::Data<MediaConfig>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let recipe = pool
        .get_published_recipe(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Recipe {}", id)))?;

    let category = match recipe.category_id {
        Some(category_id) => pool.get_category(category_id).await?,
        None => None,
    };
    let author = match recipe.author_id {
        Some(author_id) => pool.get_author(author_id).await?,
        None => None,
    };
    let tags = pool.get_recipe_tags(recipe.id).await?;

    let base_url = {
        let info = req.connection_info();
        format!("{}://{}", info.scheme(), info.host())
    };
    let cover = cover_url(&base_url, &media.url, &recipe.cover);

    Ok(HttpResponse::Ok().json(RecipeDetail::new(
        recipe,
        category.as_ref(),
        author.as_ref(),
        &tags,
        cover,
    )))
}

/// Configure recipe routes. Fixed paths are registered before `/recipes/{id}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_recipes)
        .service(search_recipes)
        .service(list_category_recipes)
        .service(list_tag_recipes)
        .service(get_recipe);
}
