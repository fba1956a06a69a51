//! Unified error codes for the quote engine
//!
//! This module defines all error codes used across the engine, the batch
//! binary and any admin/UI collaborator that consumes them.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Pricing errors
//! - 2xxx: Dependency rule errors
//! - 3xxx: Catalog errors
//! - 4xxx: Quote errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Pricing ====================
    /// Service does not exist
    ServiceNotFound = 1001,
    /// Service base price is negative or not a number
    InvalidBasePrice = 1002,
    /// Service is not active
    ServiceInactive = 1003,
    /// A required pricing factor has no selection
    RequiredFactorMissing = 1004,
    /// Business entity type does not exist
    EntityTypeNotFound = 1005,
    /// Add-on does not exist
    AddonNotFound = 1006,
    /// Add-on is not offered for the selected service
    AddonUnavailable = 1007,
    /// Price exceeds the representable range
    PriceOverflow = 1008,

    // ==================== 2xxx: Dependency ====================
    /// Dependent factor of a rule does not exist
    DependencyFactorNotFound = 2001,
    /// Controlling factor of a rule does not exist
    ControllingFactorNotFound = 2002,
    /// Rule links factors of different services
    DependencyCrossService = 2003,
    /// Rule makes a factor depend on itself
    DependencySelfReference = 2004,
    /// Rule would close a dependency cycle
    DependencyCycle = 2005,

    // ==================== 3xxx: Catalog ====================
    /// Catalog source could not be read
    CatalogReadFailed = 3001,
    /// Catalog source is not valid JSON for the expected shape
    CatalogParseFailed = 3002,
    /// Catalog failed boundary validation
    CatalogInvalid = 3003,
    /// Two records of the same table share an id
    DuplicateId = 3004,

    // ==================== 4xxx: Quote ====================
    /// Quote not found
    QuoteNotFound = 4001,
    /// Quote can no longer be revised
    QuoteNotEditable = 4002,
    /// Quote status change is not allowed
    QuoteInvalidTransition = 4003,
    /// Quote revision not found
    QuoteRevisionNotFound = 4004,
    /// Quote calculation is not valid
    QuoteNotPriced = 4005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9005,
    /// File system error
    IoError = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Pricing
            ErrorCode::ServiceNotFound => "Service not found",
            ErrorCode::InvalidBasePrice => "Service base price must be a non-negative number",
            ErrorCode::ServiceInactive => "Service is not active",
            ErrorCode::RequiredFactorMissing => "Required pricing factor is missing",
            ErrorCode::EntityTypeNotFound => "Business entity type not found",
            ErrorCode::AddonNotFound => "Add-on not found",
            ErrorCode::AddonUnavailable => "Add-on is not available for this service",
            ErrorCode::PriceOverflow => "Price exceeds the representable range",

            // Dependency
            ErrorCode::DependencyFactorNotFound => "Dependent factor not found",
            ErrorCode::ControllingFactorNotFound => "Controlling factor not found",
            ErrorCode::DependencyCrossService => "Factors belong to different services",
            ErrorCode::DependencySelfReference => "A factor cannot depend on itself",
            ErrorCode::DependencyCycle => "Dependency rule would create a cycle",

            // Catalog
            ErrorCode::CatalogReadFailed => "Failed to read catalog",
            ErrorCode::CatalogParseFailed => "Failed to parse catalog",
            ErrorCode::CatalogInvalid => "Catalog validation failed",
            ErrorCode::DuplicateId => "Duplicate record id",

            // Quote
            ErrorCode::QuoteNotFound => "Quote not found",
            ErrorCode::QuoteNotEditable => "Quote can no longer be revised",
            ErrorCode::QuoteInvalidTransition => "Quote status change is not allowed",
            ErrorCode::QuoteRevisionNotFound => "Quote revision not found",
            ErrorCode::QuoteNotPriced => "Quote calculation is not valid",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::IoError => "File system error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Pricing
            1001 => Ok(ErrorCode::ServiceNotFound),
            1002 => Ok(ErrorCode::InvalidBasePrice),
            1003 => Ok(ErrorCode::ServiceInactive),
            1004 => Ok(ErrorCode::RequiredFactorMissing),
            1005 => Ok(ErrorCode::EntityTypeNotFound),
            1006 => Ok(ErrorCode::AddonNotFound),
            1007 => Ok(ErrorCode::AddonUnavailable),
            1008 => Ok(ErrorCode::PriceOverflow),

            // Dependency
            2001 => Ok(ErrorCode::DependencyFactorNotFound),
            2002 => Ok(ErrorCode::ControllingFactorNotFound),
            2003 => Ok(ErrorCode::DependencyCrossService),
            2004 => Ok(ErrorCode::DependencySelfReference),
            2005 => Ok(ErrorCode::DependencyCycle),

            // Catalog
            3001 => Ok(ErrorCode::CatalogReadFailed),
            3002 => Ok(ErrorCode::CatalogParseFailed),
            3003 => Ok(ErrorCode::CatalogInvalid),
            3004 => Ok(ErrorCode::DuplicateId),

            // Quote
            4001 => Ok(ErrorCode::QuoteNotFound),
            4002 => Ok(ErrorCode::QuoteNotEditable),
            4003 => Ok(ErrorCode::QuoteInvalidTransition),
            4004 => Ok(ErrorCode::QuoteRevisionNotFound),
            4005 => Ok(ErrorCode::QuoteNotPriced),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::IoError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::ServiceNotFound.code(), 1001);
        assert_eq!(ErrorCode::InvalidBasePrice.code(), 1002);
        assert_eq!(ErrorCode::DependencyCycle.code(), 2005);
        assert_eq!(ErrorCode::CatalogInvalid.code(), 3003);
        assert_eq!(ErrorCode::QuoteNotEditable.code(), 4002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::DependencyCycle.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::ServiceNotFound));
        assert_eq!(ErrorCode::try_from(2004), Ok(ErrorCode::DependencySelfReference));
        assert_eq!(ErrorCode::try_from(9006), Ok(ErrorCode::IoError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
        assert_eq!(ErrorCode::try_from(1500), Err(InvalidErrorCode(1500)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::DependencyCycle).unwrap();
        assert_eq!(json, "2005");

        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::InvalidBasePrice);

        let bad: Result<ErrorCode, _> = serde_json::from_str("4242");
        assert!(bad.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::QuoteNotFound.to_string(), "4001");
        assert_eq!(InvalidErrorCode(77).to_string(), "invalid error code: 77");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::ServiceNotFound.message(), "Service not found");
        assert_eq!(
            ErrorCode::DependencyCycle.message(),
            "Dependency rule would create a cycle"
        );
    }
}
