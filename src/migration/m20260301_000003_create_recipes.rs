//! Migration: Create recipes table.
//!
//! Category and author are optional and survive deletion of the referenced row.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE recipes (
                    id BIGSERIAL PRIMARY KEY,
                    title VARCHAR(65) NOT NULL,
                    description VARCHAR(165) NOT NULL,
                    slug VARCHAR(50) NOT NULL UNIQUE,
                    preparation_time INTEGER NOT NULL,
                    preparation_time_unit VARCHAR(65) NOT NULL,
                    servings INTEGER NOT NULL,
                    servings_unit VARCHAR(65) NOT NULL,
                    preparation_steps TEXT NOT NULL,
                    preparation_steps_is_html BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    is_published BOOLEAN NOT NULL DEFAULT FALSE,
                    cover VARCHAR(255) NOT NULL DEFAULT '',
                    category_id BIGINT REFERENCES categories(id) ON DELETE SET NULL,
                    author_id BIGINT REFERENCES authors(id) ON DELETE SET NULL
                );

                -- Listing published recipes newest first
                CREATE INDEX idx_recipes_published_id ON recipes(id DESC)
                    WHERE is_published;

                CREATE INDEX idx_recipes_category_id ON recipes(category_id)
                    WHERE is_published;

                CREATE INDEX idx_recipes_author_id ON recipes(author_id)
                    WHERE is_published;

                CREATE TRIGGER update_recipes_updated_at
                    BEFORE UPDATE ON recipes
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_recipes_updated_at ON recipes;
                DROP TABLE IF EXISTS recipes CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
