//! HTTP request handlers

pub mod health;
pub mod weather;

use crate::error::ApiError;

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
