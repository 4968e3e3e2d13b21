//! Database queries for recipes.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
};
use tokio::sync::OnceCell;

use crate::entity::author::{self, Entity as Author};
use crate::entity::category::{self, Entity as Category};
use crate::entity::recipe::{self, ActiveModel, Entity as Recipe};
use crate::entity::recipe_tag;
use crate::error::{AppError, AppResult};
use crate::models::{NewRecipe, RecipeSummary};
use crate::pagination::PagedCollection;

use super::DbPool;

/// Which published recipes a listing shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeFilter {
    All,
    Category(i64),
    Author(i64),
    Tag(i64),
    /// Case-insensitive substring of title or description.
    Search(String),
}

impl RecipeFilter {
    /// Published recipes matching this filter.
    fn select(&self) -> Select<Recipe> {
        let select = Recipe::find().filter(recipe::Column::IsPublished.eq(true));

        match self {
            Self::All => select,
            Self::Category(id) => select.filter(recipe::Column::CategoryId.eq(*id)),
            Self::Author(id) => select.filter(recipe::Column::AuthorId.eq(*id)),
            Self::Tag(id) => select.filter(
                recipe::Column::Id.in_subquery(
                    Query::select()
                        .column(recipe_tag::Column::RecipeId)
                        .from(recipe_tag::Entity)
                        .and_where(recipe_tag::Column::TagId.eq(*id))
                        .to_owned(),
                ),
            ),
            Self::Search(term) => {
                let pattern = like_pattern(term);
                select.filter(Expr::cust_with_values(
                    "(recipes.title ILIKE $1 OR recipes.description ILIKE $2)",
                    [pattern.clone(), pattern],
                ))
            }
        }
    }
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Published recipes as a paged collection, newest first.
///
/// The total count is queried once per instance.
pub struct RecipePages {
    pool: DbPool,
    filter: RecipeFilter,
    per_page: u64,
    count: OnceCell<u64>,
}

impl RecipePages {
    pub fn new(pool: DbPool, filter: RecipeFilter, per_page: u64) -> Self {
        Self {
            pool,
            filter,
            per_page: per_page.max(1),
            count: OnceCell::new(),
        }
    }
}

#[async_trait]
impl PagedCollection for RecipePages {
    type Item = RecipeSummary;

    async fn count(&self) -> AppResult<u64> {
        self.count
            .get_or_try_init(|| async {
                self.filter
                    .select()
                    .count(self.pool.connection())
                    .await
                    .map_err(|e| AppError::Database(format!("Failed to count recipes: {}", e)))
            })
            .await
            .copied()
    }

    fn per_page(&self) -> u64 {
        self.per_page
    }

    async fn fetch(&self, offset: u64, limit: u64) -> AppResult<Vec<RecipeSummary>> {
        let recipes = self
            .filter
            .select()
            .order_by_desc(recipe::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.pool.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list recipes: {}", e)))?;

        self.pool.summarize_recipes(recipes).await
    }
}

impl DbPool {
    /// Get a published recipe by ID.
    pub async fn get_published_recipe(&self, id: i64) -> AppResult<Option<recipe::Model>> {
        let result = Recipe::find_by_id(id)
            .filter(recipe::Column::IsPublished.eq(true))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get recipe: {}", e)))?;

        Ok(result)
    }

    /// Attach category and author to a batch of recipes, preserving order.
    pub async fn summarize_recipes(
        &self,
        recipes: Vec<recipe::Model>,
    ) -> AppResult<Vec<RecipeSummary>> {
        let category_ids: Vec<i64> = recipes.iter().filter_map(|r| r.category_id).collect();
        let author_ids: Vec<i64> = recipes.iter().filter_map(|r| r.author_id).collect();

        let categories: HashMap<i64, category::Model> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            Category::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(self.connection())
                .await
                .map_err(|e| AppError::Database(format!("Failed to load categories: {}", e)))?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        let authors: HashMap<i64, author::Model> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            Author::find()
                .filter(author::Column::Id.is_in(author_ids))
                .all(self.connection())
                .await
                .map_err(|e| AppError::Database(format!("Failed to load authors: {}", e)))?
                .into_iter()
                .map(|a| (a.id, a))
                .collect()
        };

        Ok(recipes
            .into_iter()
            .map(|r| {
                let category = r.category_id.and_then(|id| categories.get(&id));
                let author = r.author_id.and_then(|id| authors.get(&id));
                RecipeSummary::new(r, category, author)
            })
            .collect())
    }

    /// Insert a recipe and its tag links.
    pub async fn insert_recipe(&self, new: NewRecipe) -> AppResult<recipe::Model> {
        let new = new.clean()?;
        let now = Utc::now();

        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to start transaction: {}", e)))?;

        let model = ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            slug: Set(new.slug),
            preparation_time: Set(new.preparation_time),
            preparation_time_unit: Set(new.preparation_time_unit),
            servings: Set(new.servings),
            servings_unit: Set(new.servings_unit),
            preparation_steps: Set(new.preparation_steps),
            preparation_steps_is_html: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            is_published: Set(new.is_published),
            cover: Set(String::new()),
            category_id: Set(new.category_id),
            author_id: Set(new.author_id),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert recipe: {}", e)))?;

        for tag_id in new.tag_ids {
            recipe_tag::ActiveModel {
                recipe_id: Set(result.id),
                tag_id: Set(tag_id),
            }
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to tag recipe: {}", e)))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit recipe: {}", e)))?;

        Ok(result)
    }

    /// Whether a recipe with this title exists, ignoring case.
    pub async fn recipe_title_taken(&self, title: &str) -> AppResult<bool> {
        let count = Recipe::find()
            .filter(Expr::cust_with_values(
                "LOWER(recipes.title) = LOWER($1)",
                [title.to_string()],
            ))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to check recipe title: {}", e)))?;

        Ok(count > 0)
    }
}
