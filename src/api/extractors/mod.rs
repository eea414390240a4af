//! Custom axum extractors that reject with [`AppError`](crate::errors::AppError).

mod user_id;
mod validated_json;

pub use user_id::UserId;
pub use validated_json::ValidatedJson;
