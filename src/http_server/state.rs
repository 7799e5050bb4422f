//! Shared handler state

use std::sync::Arc;

use crate::auth::AuthService;
use crate::store::Database;

/// Everything a handler may need, cloned cheaply into each request
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: Database, auth: AuthService) -> Self {
        Self {
            db,
            auth: Arc::new(auth),
        }
    }
}
