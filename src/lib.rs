//! quill - a blogging backend
//!
//! Accounts, bearer-token authentication, posts, likes and comments over HTTP,
//! persisted in SQLite.

pub mod auth;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod store;
