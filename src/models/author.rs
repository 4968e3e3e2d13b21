//! Author domain models and DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{author, profile};
use crate::pagination::{PageMeta, PaginationRange};

use super::RecipeSummary;

/// Author as shown next to a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AuthorSummary {
    pub id: i64,
    pub username: String,
    /// "First Last (username)".
    pub full_name: String,
}

impl AuthorSummary {
    pub fn display_name(first_name: &str, last_name: &str, username: &str) -> String {
        format!("{} {} ({})", first_name, last_name, username)
    }
}

impl From<&author::Model> for AuthorSummary {
    fn from(model: &author::Model) -> Self {
        Self {
            id: model.id,
            username: model.username.clone(),
            full_name: Self::display_name(&model.first_name, &model.last_name, &model.username),
        }
    }
}

/// Author profile with a page of their published recipes.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorProfileResponse {
    pub author: AuthorSummary,
    pub bio: String,
    pub recipes: Vec<RecipeSummary>,
    pub page: PageMeta,
    pub pagination: PaginationRange,
}

impl AuthorProfileResponse {
    pub fn bio_from(profile: Option<&profile::Model>) -> String {
        profile.map(|p| p.bio.clone()).unwrap_or_default()
    }
}
