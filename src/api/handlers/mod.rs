pub mod base_positions;
pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod options;
pub mod stocks;

use crate::errors::AppError;

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}

/// Known route, unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
