//! Integration tests exercising the library through its public API.

mod api_tests;
mod pagination_tests;
