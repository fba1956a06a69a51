//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Pricing errors
/// - 2xxx: Dependency rule errors
/// - 3xxx: Catalog errors
/// - 4xxx: Quote errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Pricing errors (1xxx)
    Pricing,
    /// Dependency rule errors (2xxx)
    Dependency,
    /// Catalog errors (3xxx)
    Catalog,
    /// Quote errors (4xxx)
    Quote,
    /// System errors (everything else)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Pricing,
            2000..3000 => Self::Dependency,
            3000..4000 => Self::Catalog,
            4000..5000 => Self::Quote,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Pricing => "pricing",
            Self::Dependency => "dependency",
            Self::Catalog => "catalog",
            Self::Quote => "quote",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Pricing);
        assert_eq!(ErrorCategory::from_code(2005), ErrorCategory::Dependency);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Catalog);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Quote);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(5000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::ServiceNotFound.category(), ErrorCategory::Pricing);
        assert_eq!(
            ErrorCode::DependencySelfReference.category(),
            ErrorCategory::Dependency
        );
        assert_eq!(ErrorCode::DuplicateId.category(), ErrorCategory::Catalog);
        assert_eq!(ErrorCode::QuoteNotEditable.category(), ErrorCategory::Quote);
        assert_eq!(ErrorCode::ConfigError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Dependency).unwrap();
        assert_eq!(json, "\"dependency\"");

        let category: ErrorCategory = serde_json::from_str("\"quote\"").unwrap();
        assert_eq!(category, ErrorCategory::Quote);
    }
}
