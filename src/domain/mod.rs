//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod credential;
pub mod user;

pub use credential::Credential;
pub use user::{CreateUser, MergedUser, NewUser, UpdateUser, User, UserResponse};
