//! HTTP layer: axum routers over the service crate, JSON error shaping,
//! API-key middleware for the category endpoints, and media serving.

pub mod auth;
pub mod errors;
pub mod routes;
pub mod startup;

pub use startup::run;
