//! Domain models for the recipes server.

use serde::Deserialize;
use utoipa::IntoParams;

pub mod author;
pub mod recipe;

// Re-export commonly used types
pub use author::{AuthorProfileResponse, AuthorSummary};
pub use recipe::{
    CategoryInfo, CategoryRecipeListResponse, NewRecipe, RecipeDetail, RecipeListResponse,
    RecipeSummary, SearchRecipeListResponse, TagInfo, TagRecipeListResponse, cover_url, slugify,
};

/// Page selection from the `page` query parameter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (default: 1). Values that are not integers fall back to 1.
    pub page: Option<String>,
}

impl PageQuery {
    /// Requested page number, 1 when absent or unparsable.
    pub fn page_number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

/// Search parameters: the term plus page selection.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Text matched against recipe title and description.
    #[serde(default)]
    pub q: String,
    /// Page number (default: 1).
    pub page: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> &str {
        self.q.trim()
    }

    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_page_number_defaults_to_one() {
        assert_eq!(query(None).page_number(), 1);
        assert_eq!(query(Some("")).page_number(), 1);
        assert_eq!(query(Some("abc")).page_number(), 1);
        assert_eq!(query(Some("2.5")).page_number(), 1);
    }

    #[test]
    fn test_page_number_keeps_out_of_range_values() {
        assert_eq!(query(Some("7")).page_number(), 7);
        assert_eq!(query(Some(" 3 ")).page_number(), 3);
        assert_eq!(query(Some("0")).page_number(), 0);
        assert_eq!(query(Some("-2")).page_number(), -2);
        assert_eq!(query(Some("999")).page_number(), 999);
    }

    #[test]
    fn test_search_term_is_trimmed() {
        let search = SearchQuery {
            q: "  pasta ".to_string(),
            page: Some("2".to_string()),
        };

        assert_eq!(search.term(), "pasta");
        assert_eq!(search.page_query().page_number(), 2);
    }
}
