//! Application result alias.

use crate::error::AppError;

/// Convenience alias used across all BusWatch crates.
pub type AppResult<T> = Result<T, AppError>;
