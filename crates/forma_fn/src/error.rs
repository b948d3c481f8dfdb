//! Error type shared by every functional unit.

use core::error::Error;

/// Errors raised while applying a functional unit.
///
/// Combinators never catch or retry: an error raised by any stage, member,
/// branch or predicate reaches the caller of the outermost `apply` unchanged.
/// Expected "no result" outcomes are values (`()`, `None`), not errors.
#[derive(Debug, thiserror::Error)]
pub enum FnError {
    /// The unit failed with a message.
    #[error("function failed: {0}")]
    Failed(String),

    /// The unit failed with an underlying error.
    #[error(transparent)]
    Custom(Box<dyn Error + Send + Sync>),

    /// A type-erased stage received a value of the wrong type.
    #[error("type mismatch in `{unit}`: expected {expected}")]
    TypeMismatch {
        /// The type the stage expected.
        expected: &'static str,
        /// The unit that detected the mismatch.
        unit: &'static str,
    },

    /// A combinator produced fewer values than its output type requires.
    #[error("missing output in `{unit}`: expected {expected}")]
    MissingOutput {
        /// The type of the missing value.
        expected: &'static str,
        /// The combinator that detected the gap.
        unit: &'static str,
    },
}

impl FnError {
    /// Creates a [`FnError::Failed`] from any displayable message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Wraps an arbitrary error as [`FnError::Custom`].
    #[must_use]
    pub fn custom(error: impl Error + Send + Sync + 'static) -> Self {
        Self::Custom(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    #[test]
    fn failed_message() {
        let error = FnError::failed("boom");
        assert_eq!(error.to_string(), "function failed: boom");
    }

    #[test]
    fn custom_is_transparent() {
        let error = FnError::custom(DiskFull);
        assert_eq!(error.to_string(), "disk full");
        assert!(matches!(error, FnError::Custom(_)));
    }

    #[test]
    fn type_mismatch_names_the_unit() {
        let error = FnError::TypeMismatch {
            expected: "i32",
            unit: "double",
        };
        assert_eq!(error.to_string(), "type mismatch in `double`: expected i32");
    }
}
