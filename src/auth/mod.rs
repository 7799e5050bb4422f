//! # Quill Auth Module
//!
//! Account registration, password verification and bearer tokens.

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod service;
pub mod user;

pub use crypto::PasswordPolicy;
pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtClaims, JwtConfig, JwtManager, TokenResponse};
pub use service::AuthService;
pub use user::{LoginRequest, RegisterRequest, User, UserResponse};
