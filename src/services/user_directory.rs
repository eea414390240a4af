//! User directory - user lifecycle rules on top of a repository.
//!
//! Stateless: every call goes to the repository. Each operation is a
//! lookup followed by a write, with no atomicity across the two calls.
//! The repository's own uniqueness check settles racing creates.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{CreateUser, NewUser, UpdateUser, User, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
///
/// Every operation returns the redacted [`UserResponse`] view.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user with a unique email
    async fn create(&self, input: CreateUser) -> AppResult<UserResponse>;

    /// List all users
    async fn find_all(&self) -> AppResult<Vec<UserResponse>>;

    /// Get user by ID
    async fn find_one(&self, id: Uuid) -> AppResult<UserResponse>;

    /// Merge the given fields into an existing user. Email never changes.
    async fn update(&self, id: Uuid, input: UpdateUser) -> AppResult<UserResponse>;

    /// Delete a user, returning it as it was just before deletion
    async fn remove(&self, id: Uuid) -> AppResult<UserResponse>;
}

/// Concrete implementation of UserService using a repository.
pub struct UserDirectory {
    repo: Arc<dyn UserRepository>,
}

impl UserDirectory {
    /// Create new user directory backed by the given repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn fetch(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound(id))
    }
}

#[async_trait]
impl UserService for UserDirectory {
    async fn create(&self, input: CreateUser) -> AppResult<UserResponse> {
        input.validate()?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::DuplicateEmail(input.email));
        }

        let user = self.repo.insert(NewUser::from(input)).await?;
        tracing::info!(user_id = %user.id, "User created");

        Ok(UserResponse::from(user))
    }

    async fn find_all(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repo.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn find_one(&self, id: Uuid) -> AppResult<UserResponse> {
        self.fetch(id).await.map(UserResponse::from)
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> AppResult<UserResponse> {
        input.validate()?;

        let current = self.fetch(id).await?;
        let user = self.repo.replace(id, current.merge(input)).await?;
        tracing::info!(user_id = %id, "User updated");

        Ok(UserResponse::from(user))
    }

    async fn remove(&self, id: Uuid) -> AppResult<UserResponse> {
        let existing = self.fetch(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "User removed");

        Ok(UserResponse::from(existing))
    }
}
