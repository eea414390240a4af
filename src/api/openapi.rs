//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::{CreateUser, UpdateUser, UserResponse};
use crate::errors::ErrorResponse;

/// OpenAPI documentation for the user directory
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Directory",
        version = "0.1.0",
        description = "User account management API with Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::create,
        user_handler::find_all,
        user_handler::find_one,
        user_handler::update,
        user_handler::remove,
    ),
    components(
        schemas(
            UserResponse,
            CreateUser,
            UpdateUser,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_user_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/users"));
        assert!(doc.paths.paths.contains_key("/users/{id}"));
    }

    #[test]
    fn test_user_schema_has_no_password() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let properties = &json["components"]["schemas"]["UserResponse"]["properties"];

        assert!(properties.get("email").is_some());
        assert!(properties.get("password").is_none());
    }
}
