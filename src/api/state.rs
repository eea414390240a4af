//! Application state shared by all handlers.

use std::sync::Arc;

use crate::infra::{Database, UserRepository};
use crate::services::{UserDirectory, UserService};

/// Application state containing the user service and, when backed by
/// PostgreSQL, the database handle used for health checks.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection (`None` for the in-memory store)
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state with an explicitly injected service.
    pub fn new(user_service: Arc<dyn UserService>, database: Option<Arc<Database>>) -> Self {
        Self {
            user_service,
            database,
        }
    }

    /// Wire a [`UserDirectory`] over the given repository.
    pub fn with_repository(repo: Arc<dyn UserRepository>, database: Option<Arc<Database>>) -> Self {
        Self::new(Arc::new(UserDirectory::new(repo)), database)
    }
}
