//! Database queries for categories and tags.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, RelationTrait, Set,
};
use sea_orm::{JoinType, QuerySelect};

use crate::entity::category::{self, Entity as Category};
use crate::entity::recipe_tag;
use crate::entity::tag::{self, Entity as Tag};
use crate::error::{AppError, AppResult};
use crate::models::recipe::validate_category_name;
use crate::models::slugify;

use super::DbPool;

impl DbPool {
    /// Get a category by ID.
    pub async fn get_category(&self, id: i64) -> AppResult<Option<category::Model>> {
        let result = Category::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get category: {}", e)))?;

        Ok(result)
    }

    /// Get a category by exact name.
    pub async fn get_category_by_name(&self, name: &str) -> AppResult<Option<category::Model>> {
        let result = Category::find()
            .filter(category::Column::Name.eq(name))
            .order_by_asc(category::Column::Id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get category: {}", e)))?;

        Ok(result)
    }

    /// Insert a category.
    pub async fn insert_category(&self, name: &str) -> AppResult<category::Model> {
        validate_category_name(name)?;

        let model = category::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert category: {}", e)))?;

        Ok(result)
    }

    /// Get a tag by slug.
    pub async fn get_tag_by_slug(&self, slug: &str) -> AppResult<Option<tag::Model>> {
        let result = Tag::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get tag: {}", e)))?;

        Ok(result)
    }

    /// Insert a tag, deriving its slug from the name.
    pub async fn insert_tag(&self, name: &str) -> AppResult<tag::Model> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "tag name '{}' has no usable characters",
                name
            )));
        }

        let model = tag::ActiveModel {
            name: Set(name.to_string()),
            slug: Set(slug),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert tag: {}", e)))?;

        Ok(result)
    }

    /// Tags attached to a recipe, by name.
    pub async fn get_recipe_tags(&self, recipe_id: i64) -> AppResult<Vec<tag::Model>> {
        let result = Tag::find()
            .join(JoinType::InnerJoin, tag::Relation::RecipeTags.def())
            .filter(recipe_tag::Column::RecipeId.eq(recipe_id))
            .order_by_asc(tag::Column::Name)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get recipe tags: {}", e)))?;

        Ok(result)
    }
}
