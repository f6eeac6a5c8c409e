//! HTTP handlers

pub mod health;
pub mod predict;
pub mod error_codes;
pub mod assess;
pub mod simulate;
pub mod trends;
pub mod webhook;

use crate::AppError;

/// Unmatched routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
