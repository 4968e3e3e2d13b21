//! API endpoint modules.

pub mod authors;
pub mod health;
pub mod openapi;
pub mod recipes;

pub use authors::configure_routes as configure_author_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use recipes::configure_routes as configure_recipe_routes;
