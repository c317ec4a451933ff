//! Result type alias for bookshelf operations.

use super::shelf_error::ShelfError;

/// Type alias for Results using ShelfError.
pub type ShelfResult<T> = Result<T, ShelfError>;

/// Extension trait for logging a failed result where it is handled.
pub trait ResultExt<T> {
    /// Log the error (with its code) at warn level and pass the result on.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use bookshelf::error::ResultExt;
    ///
    /// store.delete(id).await.map_err(ShelfError::from).log_failure("delete_book")?;
    /// ```
    fn log_failure(self, operation: &str) -> ShelfResult<T>;
}

impl<T> ResultExt<T> for ShelfResult<T> {
    fn log_failure(self, operation: &str) -> ShelfResult<T> {
        if let Err(err) = &self {
            tracing::warn!(
                operation,
                code = err.error_code(),
                category = err.category().as_str(),
                "{}",
                err
            );
        }
        self
    }
}
