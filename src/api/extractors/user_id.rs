//! Path extractor for `/users/:id`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::config::INVALID_UUID_MESSAGE;
use crate::errors::AppError;

/// Hyphenated UUID taken from the `id` path segment.
///
/// Anything else is rejected before a handler runs.
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        parse_hyphenated(&raw)
            .map(UserId)
            .ok_or_else(|| AppError::validation(INVALID_UUID_MESSAGE))
    }
}

fn parse_hyphenated(raw: &str) -> Option<Uuid> {
    // Uuid::parse_str also takes simple, braced and urn forms; only the
    // 36-character form is hyphenated.
    if raw.len() != 36 {
        return None;
    }
    Uuid::parse_str(raw).ok()
}
