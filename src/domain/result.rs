//! Result type alias for supersync

use super::errors::SupersyncError;

/// Result type alias for supersync operations
///
/// Convenience alias that uses `SupersyncError` as the error type.
/// Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, SupersyncError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::SupersyncError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(SupersyncError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
