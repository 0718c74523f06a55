//! Error types for the sift crate.

use thiserror::Error;

/// Errors raised while turning text into ranges and scalar values.
///
/// Filtering itself never fails: unknown fields, mismatched types and empty
/// collections simply leave a criterion unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiftError {
    /// The text does not follow the interval grammar, or a bound literal
    /// could not be read as the requested element type.
    #[error("invalid range '{input}': {reason}")]
    Format { input: String, reason: String },

    /// A single value could not be read as the requested element type.
    #[error("invalid {type_name} literal '{input}': {reason}")]
    Literal {
        input: String,
        type_name: String,
        reason: String,
    },

    /// No parser or comparator is registered for the requested element type.
    #[error("unsupported range element type '{type_name}'")]
    UnsupportedType { type_name: String },
}

impl SiftError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        SiftError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`SiftError::Format`].
    pub fn is_format(&self) -> bool {
        matches!(self, SiftError::Format { .. })
    }

    /// Returns `true` for [`SiftError::Literal`].
    pub fn is_literal(&self) -> bool {
        matches!(self, SiftError::Literal { .. })
    }

    /// Returns `true` for [`SiftError::UnsupportedType`].
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, SiftError::UnsupportedType { .. })
    }
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_message() {
        let err = SiftError::format("[1;2]", "expected ','");
        assert_eq!(err.to_string(), "invalid range '[1;2]': expected ','");
        assert!(err.is_format());
        assert!(!err.is_unsupported_type());
    }

    #[test]
    fn unsupported_type_message() {
        let err = SiftError::UnsupportedType {
            type_name: "uuid".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported range element type 'uuid'");
        assert!(err.is_unsupported_type());
    }

    #[test]
    fn literal_error_message() {
        let err = SiftError::Literal {
            input: "ab".to_string(),
            type_name: "char".to_string(),
            reason: "expected a single character, found 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid char literal 'ab': expected a single character, found 2"
        );
        assert!(err.is_literal());
        assert!(!err.is_format());
    }
}
