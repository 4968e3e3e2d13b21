//! Recipes server library.
//!
//! Storage, pagination and HTTP handlers for browsing published recipes.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod pagination;
