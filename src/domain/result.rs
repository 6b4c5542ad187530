//! Result type alias for Nubilum

use super::errors::NubilumError;

/// Result type alias for Nubilum operations
///
/// # Examples
///
/// ```
/// use nubilum::domain::result::Result;
/// use nubilum::domain::errors::NubilumError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(NubilumError::Input("empty input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, NubilumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(NubilumError::Other("test error".to_string()));
        assert!(result.is_err());
    }
}
