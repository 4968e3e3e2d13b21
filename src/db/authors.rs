//! Database queries for authors and their profiles.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

use crate::entity::author::{self, Entity as Author};
use crate::entity::profile::{self, Entity as Profile};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Get an author by ID.
    pub async fn get_author(&self, id: i64) -> AppResult<Option<author::Model>> {
        let result = Author::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get author: {}", e)))?;

        Ok(result)
    }

    /// Get an author by username.
    pub async fn get_author_by_username(&self, username: &str) -> AppResult<Option<author::Model>> {
        let result = Author::find()
            .filter(author::Column::Username.eq(username))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get author: {}", e)))?;

        Ok(result)
    }

    /// Get the profile of an author.
    pub async fn get_profile(&self, author_id: i64) -> AppResult<Option<profile::Model>> {
        let result = Profile::find()
            .filter(profile::Column::AuthorId.eq(author_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get profile: {}", e)))?;

        Ok(result)
    }

    /// Insert an author together with their profile.
    pub async fn insert_author(
        &self,
        username: &str,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        bio: &str,
    ) -> AppResult<author::Model> {
        if username.trim().is_empty() {
            return Err(AppError::InvalidInput("username must not be empty".to_string()));
        }

        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to start transaction: {}", e)))?;

        let author = author::ActiveModel {
            username: Set(username.to_string()),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            email: Set(email.map(str::to_string)),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert author: {}", e)))?;

        profile::ActiveModel {
            author_id: Set(author.id),
            bio: Set(bio.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert profile: {}", e)))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit author: {}", e)))?;

        Ok(author)
    }
}
