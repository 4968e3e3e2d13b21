//! Migration: Create authors and profiles tables.
//!
//! Also creates the shared updated_at trigger function used by recipes.

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
                -- Shared trigger function for updated_at
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                CREATE TABLE authors (
                    id BIGSERIAL PRIMARY KEY,
                    username VARCHAR(150) NOT NULL UNIQUE,
                    first_name VARCHAR(150) NOT NULL DEFAULT '',
                    last_name VARCHAR(150) NOT NULL DEFAULT '',
                    email VARCHAR(254),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- One profile per author
                CREATE TABLE profiles (
                    id BIGSERIAL PRIMARY KEY,
                    author_id BIGINT NOT NULL UNIQUE
                        REFERENCES authors(id) ON DELETE CASCADE,
                    bio TEXT NOT NULL DEFAULT ''
                );
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
                DROP TABLE IF EXISTS profiles CASCADE;
                DROP TABLE IF EXISTS authors CASCADE;
                DROP FUNCTION IF EXISTS update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }
}
