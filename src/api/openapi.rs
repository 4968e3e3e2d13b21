//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models, pagination};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipes Server",
        version = "0.3.0",
        description = "Read API for published recipes with paginated listings by category, tag, author and search term"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Recipe endpoints
        api::recipes::list_recipes,
        api::recipes::list_category_recipes,
        api::recipes::search_recipes,
        api::recipes::list_tag_recipes,
        api::recipes::get_recipe,
        // Author endpoints
        api::authors::get_author_profile,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            pagination::PageMeta,
            pagination::PaginationRange,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Recipes
            models::CategoryInfo,
            models::TagInfo,
            models::AuthorSummary,
            models::RecipeSummary,
            models::RecipeDetail,
            models::RecipeListResponse,
            models::CategoryRecipeListResponse,
            models::SearchRecipeListResponse,
            models::TagRecipeListResponse,
            // Authors
            models::AuthorProfileResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Recipes", description = "Published recipe listings and details"),
        (name = "Authors", description = "Author profiles")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_recipe_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for path in [
            "/api/v1/recipes",
            "/api/v1/recipes/search",
            "/api/v1/recipes/category/{category_id}",
            "/api/v1/recipes/tags/{slug}",
            "/api/v1/recipes/{id}",
            "/api/v1/authors/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {} in {:?}", path, paths);
        }
    }
}
