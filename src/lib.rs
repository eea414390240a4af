//! User Directory - user account management API
//!
//! Create, list, fetch, update and remove user records. Emails are unique
//! and immutable; stored passwords never appear in any response.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, commands and the redacted response view
//! - **services**: The user directory (business rules)
//! - **infra**: Database, migrations and user repositories
//! - **api**: HTTP handlers, extractors and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against PostgreSQL
//! cargo run -- serve
//!
//! # Start the server with an in-memory store
//! cargo run -- serve --in-memory
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{CreateUser, UpdateUser, User, UserResponse};
pub use errors::{AppError, AppResult};
pub use services::{UserDirectory, UserService};
