//! SeaORM entity definitions for PostgreSQL database.

pub mod author;
pub mod category;
pub mod profile;
pub mod recipe;
pub mod recipe_tag;
pub mod tag;
