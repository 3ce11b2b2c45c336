//! Result alias over [`AppError`].

use crate::error::AppError;

/// `Result` with [`AppError`] as the error type.
pub type AppResult<T> = Result<T, AppError>;
