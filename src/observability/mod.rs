//! Observability for Quill
//!
//! Structured logging through `tracing`. HTTP request spans come from the
//! `tower-http` trace layer installed by the server.
//!
//! # Usage
//!
//! ```ignore
//! use quill::observability::{self, LogFormat};
//!
//! observability::init(LogFormat::Json);
//! tracing::info!(port = 8000, "listening");
//! ```

mod logger;

pub use logger::{init, LogFormat};
