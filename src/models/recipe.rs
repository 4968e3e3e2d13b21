//! Recipe domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use utoipa::ToSchema;

use crate::entity::{author, category, recipe, tag};
use crate::error::{AppError, AppResult};
use crate::pagination::{PageMeta, PaginationRange};

use super::AuthorSummary;

/// Column limits enforced before a recipe is stored.
pub const TITLE_MAX_LENGTH: usize = 65;
pub const DESCRIPTION_MAX_LENGTH: usize = 165;
pub const UNIT_MAX_LENGTH: usize = 65;
pub const CATEGORY_NAME_MAX_LENGTH: usize = 65;
pub const SLUG_MAX_LENGTH: usize = 50;

/// Category reference embedded in recipe payloads.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryInfo {
    pub id: i64,
    pub name: String,
}

impl From<&category::Model> for CategoryInfo {
    fn from(model: &category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
        }
    }
}

/// Tag reference embedded in recipe payloads.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TagInfo {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<&tag::Model> for TagInfo {
    fn from(model: &tag::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            slug: model.slug.clone(),
        }
    }
}

/// Recipe as shown in list views.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub preparation_time: i32,
    pub preparation_time_unit: String,
    pub servings: i32,
    pub servings_unit: String,
    /// Cover path relative to the media URL, empty when there is none.
    pub cover: String,
    pub category: Option<CategoryInfo>,
    pub author: Option<AuthorSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeSummary {
    pub fn new(
        model: recipe::Model,
        category: Option<&category::Model>,
        author: Option<&author::Model>,
    ) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            slug: model.slug,
            preparation_time: model.preparation_time,
            preparation_time_unit: model.preparation_time_unit,
            servings: model.servings,
            servings_unit: model.servings_unit,
            cover: model.cover,
            category: category.map(CategoryInfo::from),
            author: author.map(AuthorSummary::from),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Full recipe for the detail view.
///
/// Publication and rendering flags are internal and not exposed.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub preparation_time: i32,
    pub preparation_time_unit: String,
    pub servings: i32,
    pub servings_unit: String,
    pub preparation_steps: String,
    /// Absolute cover URL, empty when there is none.
    pub cover: String,
    pub category: Option<CategoryInfo>,
    pub author: Option<AuthorSummary>,
    pub tags: Vec<TagInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeDetail {
    pub fn new(
        model: recipe::Model,
        category: Option<&category::Model>,
        author: Option<&author::Model>,
        tags: &[tag::Model],
        cover: String,
    ) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            slug: model.slug,
            preparation_time: model.preparation_time,
            preparation_time_unit: model.preparation_time_unit,
            servings: model.servings,
            servings_unit: model.servings_unit,
            preparation_steps: model.preparation_steps,
            cover,
            category: category.map(CategoryInfo::from),
            author: author.map(AuthorSummary::from),
            tags: tags.iter().map(TagInfo::from).collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Home list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeSummary>,
    pub page: PageMeta,
    pub pagination: PaginationRange,
}

/// Category list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryRecipeListResponse {
    /// Page title, e.g. "Desserts - Category | ".
    pub title: String,
    pub category: CategoryInfo,
    pub recipes: Vec<RecipeSummary>,
    pub page: PageMeta,
    pub pagination: PaginationRange,
}

/// Search list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchRecipeListResponse {
    /// Page title, e.g. `Search for "pasta" | `.
    pub page_title: String,
    pub search_term: String,
    /// Query suffix to append to pagination links.
    pub additional_url_query: String,
    pub recipes: Vec<RecipeSummary>,
    pub page: PageMeta,
    pub pagination: PaginationRange,
}

impl SearchRecipeListResponse {
    pub fn page_title_for(term: &str) -> String {
        format!("Search for \"{}\" | ", term)
    }

    pub fn url_query_for(term: &str) -> String {
        format!("&q={}", urlencoding::encode(term))
    }
}

/// Tag list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TagRecipeListResponse {
    pub tag: TagInfo,
    pub recipes: Vec<RecipeSummary>,
    pub page: PageMeta,
    pub pagination: PaginationRange,
}

/// Recipe data accepted by the seeding tool.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    /// Derived from the title when empty.
    pub slug: String,
    pub preparation_time: i32,
    pub preparation_time_unit: String,
    pub servings: i32,
    pub servings_unit: String,
    pub preparation_steps: String,
    pub is_published: bool,
    pub category_id: Option<i64>,
    pub author_id: Option<i64>,
    pub tag_ids: Vec<i64>,
}

impl NewRecipe {
    /// Check column limits and fill in the slug.
    pub fn clean(mut self) -> AppResult<Self> {
        let mut errors = Vec::new();

        for (field, value, max) in [
            ("title", &self.title, TITLE_MAX_LENGTH),
            ("description", &self.description, DESCRIPTION_MAX_LENGTH),
            ("preparation_time_unit", &self.preparation_time_unit, UNIT_MAX_LENGTH),
            ("servings_unit", &self.servings_unit, UNIT_MAX_LENGTH),
        ] {
            if value.chars().count() > max {
                errors.push(format!("{} must be at most {} characters", field, max));
            }
        }

        if self.title.trim().is_empty() {
            errors.push("title must not be empty".to_string());
        }

        if self.slug.chars().count() > SLUG_MAX_LENGTH {
            errors.push(format!("slug must be at most {} characters", SLUG_MAX_LENGTH));
        }

        if !errors.is_empty() {
            return Err(AppError::InvalidInput(errors.join("; ")));
        }

        if self.slug.is_empty() {
            // Titles may be longer than the slug column.
            let mut slug = slugify(&self.title);
            slug.truncate(SLUG_MAX_LENGTH);
            self.slug = slug.trim_end_matches(['-', '_']).to_string();
        }

        Ok(self)
    }
}

/// Check a category name against its column limit.
pub fn validate_category_name(name: &str) -> AppResult<()> {
    if name.chars().count() > CATEGORY_NAME_MAX_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "category name must be at most {} characters",
            CATEGORY_NAME_MAX_LENGTH
        )));
    }
    Ok(())
}

/// Lowercase ASCII slug.
///
/// Accented letters are decomposed and reduced to their ASCII base. Letters,
/// digits, underscores and hyphens are kept; runs of whitespace and hyphens
/// become a single hyphen; anything else is dropped. Leading and trailing
/// hyphens and underscores are stripped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.nfkd().filter(char::is_ascii) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    slug.trim_matches(['-', '_']).to_string()
}

/// Absolute URL for a cover image, or an empty string when there is no cover.
pub fn cover_url(base_url: &str, media_url: &str, cover: &str) -> String {
    if cover.is_empty() {
        return String::new();
    }

    let media = media_url.trim_matches('/');
    let base = base_url.trim_end_matches('/');
    let path = cover.trim_start_matches('/');

    if media.is_empty() {
        format!("{}/{}", base, path)
    } else {
        format!("{}/{}/{}", base, media, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_recipe() -> NewRecipe {
        NewRecipe {
            title: "Test Recipe".to_string(),
            description: "Test Description".to_string(),
            slug: String::new(),
            preparation_time: 10,
            preparation_time_unit: "Minutes".to_string(),
            servings: 2,
            servings_unit: "People".to_string(),
            preparation_steps: "Test Steps".to_string(),
            is_published: false,
            category_id: None,
            author_id: None,
            tag_ids: Vec::new(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Test for slug in recipe"), "test-for-slug-in-recipe");
        assert_eq!(slugify("  Bolo de  Cenoura!  "), "bolo-de-cenoura");
        assert_eq!(slugify("Mac & Cheese"), "mac-cheese");
        assert_eq!(slugify("snake_case-title"), "snake_case-title");
        assert_eq!(slugify("a&b"), "ab");
        assert_eq!(slugify("a - & -- b"), "a-b");
        assert_eq!(slugify("_-Hidden-_"), "hidden");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Pão de Queijo"), "pao-de-queijo");
        assert_eq!(slugify("Açaí na Tigela"), "acai-na-tigela");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("Feijoada à Moda"), "feijoada-a-moda");
    }

    #[test]
    fn test_clean_limits_slug_length() {
        let mut recipe = new_recipe();
        recipe.title = format!("{} {}", "a".repeat(49), "bolo");
        let recipe = recipe.clean().unwrap();
        assert_eq!(recipe.slug, "a".repeat(49));

        let mut recipe = new_recipe();
        recipe.title = "B".repeat(TITLE_MAX_LENGTH);
        assert_eq!(recipe.clean().unwrap().slug.len(), SLUG_MAX_LENGTH);

        let mut recipe = new_recipe();
        recipe.slug = "s".repeat(SLUG_MAX_LENGTH + 1);
        assert!(matches!(recipe.clean(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_clean_generates_missing_slug() {
        let recipe = new_recipe().clean().unwrap();
        assert_eq!(recipe.slug, "test-recipe");
    }

    #[test]
    fn test_clean_keeps_given_slug() {
        let mut recipe = new_recipe();
        recipe.slug = "custom".to_string();
        assert_eq!(recipe.clean().unwrap().slug, "custom");
    }

    #[test]
    fn test_clean_rejects_long_fields() {
        let cases: [(fn(&mut NewRecipe, String), usize); 4] = [
            (|r, v| r.title = v, TITLE_MAX_LENGTH),
            (|r, v| r.description = v, DESCRIPTION_MAX_LENGTH),
            (|r, v| r.preparation_time_unit = v, UNIT_MAX_LENGTH),
            (|r, v| r.servings_unit = v, UNIT_MAX_LENGTH),
        ];

        for (set, max) in cases {
            let mut at_limit = new_recipe();
            set(&mut at_limit, "A".repeat(max));
            assert!(at_limit.clean().is_ok());

            let mut too_long = new_recipe();
            set(&mut too_long, "A".repeat(max + 1));
            assert!(matches!(too_long.clean(), Err(AppError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_category_name_limit() {
        assert!(validate_category_name(&"A".repeat(65)).is_ok());
        assert!(validate_category_name(&"A".repeat(66)).is_err());
    }

    #[test]
    fn test_cover_url() {
        assert_eq!(cover_url("http://localhost:8080", "/media/", ""), "");
        assert_eq!(
            cover_url("http://localhost:8080/", "/media/", "recipes/covers/2026/01/02/a.jpg"),
            "http://localhost:8080/media/recipes/covers/2026/01/02/a.jpg"
        );
        assert_eq!(
            cover_url("https://example.com", "", "/a.jpg"),
            "https://example.com/a.jpg"
        );
    }

    #[test]
    fn test_search_helpers() {
        assert_eq!(
            SearchRecipeListResponse::page_title_for("pasta"),
            "Search for \"pasta\" | "
        );
        assert_eq!(
            SearchRecipeListResponse::url_query_for("mac & cheese"),
            "&q=mac%20%26%20cheese"
        );
    }
}
