//! Result type alias for facility feed operations

use super::errors::FeedError;

/// Result type alias using [`FeedError`] as the error type
///
/// # Examples
///
/// ```
/// use facility_feed::domain::result::Result;
/// use facility_feed::domain::errors::FeedError;
///
/// fn failing_function() -> Result<()> {
///     Err(FeedError::Export("no batches".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, FeedError>;

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
}
