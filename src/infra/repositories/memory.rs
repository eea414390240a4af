//! In-memory implementation of UserRepository (for development/testing).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserRepository;
use crate::domain::{MergedUser, NewUser, User};
use crate::errors::{AppError, AppResult};

/// Process-local user store. Data is lost when the process exits.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        // Uniqueness is checked under the write lock, like a unique index
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail(user.email));
        }

        let now = chrono::Utc::now();
        let stored = User {
            id: Uuid::new_v4(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password: user.password,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.insert(stored.id, stored.clone());

        tracing::debug!(user_id = %stored.id, "Inserted user");
        Ok(stored)
    }

    async fn replace(&self, id: Uuid, user: MergedUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(AppError::NotFound(id))?;

        stored.first_name = user.first_name;
        stored.last_name = user.last_name;
        stored.password = user.password;
        stored.is_active = user.is_active;
        stored.updated_at = user.updated_at;

        tracing::debug!(user_id = %id, "Replaced user");
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut users = self.users.write().await;

        match users.remove(&id) {
            Some(_) => {
                tracing::debug!(user_id = %id, "Deleted user");
                Ok(())
            }
            None => Err(AppError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credential;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password: Credential::new("secret12"),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = InMemoryUserStore::new();

        let user = store.insert(new_user("test@example.com")).await.unwrap();
        assert!(user.is_active);
        assert_eq!(user.created_at, user.updated_at);

        let fetched = store.find_by_id(user.id).await.unwrap();
        assert_eq!(fetched, Some(user));
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("Test@Example.com")).await.unwrap();

        assert!(store.find_by_email("Test@Example.com").await.unwrap().is_some());
        assert!(store.find_by_email("test@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("test@example.com")).await.unwrap();

        let result = store.insert(new_user("test@example.com")).await;
        assert!(matches!(result, Err(AppError::DuplicateEmail(_))));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_and_delete_missing_user() {
        let store = InMemoryUserStore::new();
        let id = Uuid::new_v4();
        let merged = MergedUser {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: Credential::new("secret12"),
            is_active: false,
            updated_at: chrono::Utc::now(),
        };

        assert!(matches!(store.replace(id, merged).await, Err(AppError::NotFound(missing)) if missing == id));
        assert!(matches!(store.delete(id).await, Err(AppError::NotFound(_))));
    }
}
