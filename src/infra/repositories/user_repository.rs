//! User repository - the persistence boundary of the user directory.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr, Unchanged,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{MergedUser, NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations own the durable record. Each call is individually
/// consistent; nothing here spans more than one call.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by exact (case-sensitive) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// List all users in store order
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert a new active user with fresh id and timestamps.
    ///
    /// Fails with `DuplicateEmail` if the email is already stored.
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Overwrite the mutable fields of an existing user
    async fn replace(&self, id: Uuid, user: MergedUser) -> AppResult<User>;

    /// Permanently delete user by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let email = user.email.clone();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            password: Set(user.password.into_inner()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            let sql_err = e.sql_err();
            insert_error(e, sql_err, email)
        })?;

        Ok(User::from(model))
    }

    async fn replace(&self, id: Uuid, user: MergedUser) -> AppResult<User> {
        let active = ActiveModel {
            id: Unchanged(id),
            email: NotSet,
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            password: Set(user.password.into_inner()),
            is_active: Set(user.is_active),
            created_at: NotSet,
            updated_at: Set(user.updated_at),
        };

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound(id),
            other => AppError::from(other),
        })?;

        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(id));
        }

        Ok(())
    }
}

/// Map an insert failure. The email column carries the only unique index
/// besides the primary key, so a unique violation means the email is taken.
fn insert_error(err: DbErr, sql_err: Option<SqlErr>, email: String) -> AppError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateEmail(email),
        _ => AppError::from(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::domain::Credential;

    fn model(id: Uuid, email: &str) -> user::Model {
        let now = Utc::now();
        user::Model {
            id,
            email: email.to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: "secret12".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn merged() -> MergedUser {
        MergedUser {
            first_name: "C".to_string(),
            last_name: "B".to_string(),
            password: Credential::new("secret12"),
            is_active: false,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_unique_violation_is_duplicate_email() {
        let error = insert_error(
            DbErr::Custom("duplicate key value".into()),
            Some(SqlErr::UniqueConstraintViolation("users_email_key".into())),
            "a@x.com".to_string(),
        );

        assert!(matches!(error, AppError::DuplicateEmail(email) if email == "a@x.com"));
    }

    #[test]
    fn test_other_insert_failures_stay_database_errors() {
        let error = insert_error(
            DbErr::Custom("connection reset".into()),
            None,
            "a@x.com".to_string(),
        );
        assert!(matches!(error, AppError::Database(_)));

        let error = insert_error(
            DbErr::Custom("fk".into()),
            Some(SqlErr::ForeignKeyConstraintViolation("fk".into())),
            "a@x.com".to_string(),
        );
        assert!(matches!(error, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_insert_returns_stored_user() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(id, "a@x.com")]])
            .into_connection();
        let store = UserStore::new(db);

        let user = store
            .insert(NewUser {
                email: "a@x.com".to_string(),
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                password: Credential::new("secret12"),
            })
            .await
            .unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.password.expose(), "secret12");
    }

    #[tokio::test]
    async fn test_find_by_email_maps_row_to_user() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(id, "a@x.com")]])
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = UserStore::new(db);

        let found = store.find_by_email("a@x.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(id));

        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_missing_row_is_not_found() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = UserStore::new(db);

        let result = store.replace(id, merged()).await;

        assert!(matches!(result, Err(AppError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_replace_returns_updated_row() {
        let id = Uuid::new_v4();
        let mut row = model(id, "a@x.com");
        row.first_name = "C".to_string();
        row.is_active = false;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();
        let store = UserStore::new(db);

        let user = store.replace(id, merged()).await.unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.first_name, "C");
        assert!(!user.is_active);
    }

    #[tokio::test]
    async fn test_delete_without_affected_rows_is_not_found() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let store = UserStore::new(db);

        assert!(store.delete(id).await.is_ok());
        assert!(matches!(store.delete(id).await, Err(AppError::NotFound(missing)) if missing == id));
    }
}
