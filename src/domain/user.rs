//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::Credential;

/// User domain entity as held by the store.
///
/// Has no `Serialize` impl. Callers only ever see [`UserResponse`],
/// which has no credential field.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Credential,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply an update command on top of this record.
    ///
    /// Fields absent from `changes` keep their stored value. The result
    /// carries no email, so the email of a user can never change.
    pub fn merge(self, changes: UpdateUser) -> MergedUser {
        MergedUser {
            first_name: changes.first_name.unwrap_or(self.first_name),
            last_name: changes.last_name.unwrap_or(self.last_name),
            password: changes.password.map(Credential::new).unwrap_or(self.password),
            is_active: changes.is_active.unwrap_or(self.is_active),
            updated_at: Utc::now().max(self.updated_at),
        }
    }
}

/// Fields handed to the store to insert a new user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Credential,
}

impl From<CreateUser> for NewUser {
    fn from(input: CreateUser) -> Self {
        Self {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password: Credential::new(input.password),
        }
    }
}

/// Full replacement of the mutable fields of a stored user.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedUser {
    pub first_name: String,
    pub last_name: String,
    pub password: Credential,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// User creation command
#[derive(Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// User email address
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "email must be an email"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Given name
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "firstName should not be empty"))]
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "lastName should not be empty"))]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Password, stored as given
    #[validate(length(min = 1, message = "password should not be empty"))]
    #[schema(example = "secret12", write_only)]
    pub password: String,
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User update command. Every field is optional; `email` is not accepted.
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// New given name
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, message = "firstName should not be empty"))]
    #[schema(example = "Grace")]
    pub first_name: Option<String>,
    /// New family name
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, message = "lastName should not be empty"))]
    #[schema(example = "Hopper")]
    pub last_name: Option<String>,
    /// New password
    #[serde(default)]
    #[validate(length(min = 1, message = "password should not be empty"))]
    #[schema(example = "n3wSecret", write_only)]
    pub password: Option<String>,
    /// Enable or disable the account
    #[serde(default)]
    #[schema(example = false)]
    pub is_active: Option<bool>,
}

impl std::fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Given name
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Whether the account is enabled
    pub is_active: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|v| v.map(|s| s.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn stored_user() -> User {
        let created = Utc::now() - Duration::minutes(5);
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: Credential::new("secret12"),
            is_active: true,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_response_has_no_password_field() {
        let value = serde_json::to_value(UserResponse::from(stored_user())).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("password"));
        assert_eq!(object["email"], "a@x.com");
        assert_eq!(object["firstName"], "A");
        assert_eq!(object["lastName"], "B");
        assert_eq!(object["isActive"], true);
        assert!(object.contains_key("createdAt"));
        assert!(object.contains_key("updatedAt"));
    }

    #[test]
    fn test_merge_overwrites_only_present_fields() {
        let user = stored_user();
        let merged = user.clone().merge(UpdateUser {
            first_name: Some("C".to_string()),
            ..UpdateUser::default()
        });

        assert_eq!(merged.first_name, "C");
        assert_eq!(merged.last_name, user.last_name);
        assert_eq!(merged.password, user.password);
        assert_eq!(merged.is_active, user.is_active);
        assert!(merged.updated_at >= user.updated_at);
    }

    #[test]
    fn test_merge_replaces_password_and_status() {
        let merged = stored_user().merge(UpdateUser {
            password: Some("n3wSecret".to_string()),
            is_active: Some(false),
            ..UpdateUser::default()
        });

        assert_eq!(merged.password.expose(), "n3wSecret");
        assert!(!merged.is_active);
    }

    #[test]
    fn test_merge_never_moves_updated_at_backwards() {
        let mut user = stored_user();
        user.updated_at = Utc::now() + Duration::hours(1);
        let previous = user.updated_at;

        let merged = user.merge(UpdateUser::default());
        assert_eq!(merged.updated_at, previous);
    }

    #[test]
    fn test_create_command_is_trimmed_and_validated() {
        let input: CreateUser = serde_json::from_value(json!({
            "email": "  a@x.com ",
            "firstName": " A",
            "lastName": "B ",
            "password": " secret12 "
        }))
        .unwrap();

        assert_eq!(input.email, "a@x.com");
        assert_eq!(input.first_name, "A");
        assert_eq!(input.last_name, "B");
        assert_eq!(input.password, " secret12 ");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_blank_names_fail_validation() {
        let input: CreateUser = serde_json::from_value(json!({
            "email": "a@x.com",
            "firstName": "   ",
            "lastName": "B",
            "password": "secret12"
        }))
        .unwrap();

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_command_ignores_email() {
        let input: UpdateUser = serde_json::from_value(json!({
            "email": "other@x.com",
            "lastName": "  D "
        }))
        .unwrap();

        assert_eq!(input.last_name.as_deref(), Some("D"));
        assert!(input.first_name.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_debug_output_redacts_passwords() {
        let create = CreateUser {
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password: "secret12".to_string(),
        };
        let update = UpdateUser {
            password: Some("n3wSecret".to_string()),
            ..UpdateUser::default()
        };

        assert!(!format!("{:?}", create).contains("secret12"));
        assert!(!format!("{:?}", update).contains("n3wSecret"));
        assert!(!format!("{:?}", stored_user()).contains("secret12"));
    }
}
