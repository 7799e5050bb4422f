//! # Quill HTTP Server Module
//!
//! Axum server exposing the blogging API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/auth/*` - Registration, login, current user
//! - `/api/posts/*` - Posts, likes and comments

pub mod auth_routes;
pub mod config;
pub mod errors;
pub mod extract;
pub mod observability_routes;
pub mod post_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::HttpServer;
pub use state::AppState;
