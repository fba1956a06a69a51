//! Unified error system for the quote engine
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! Domain crates keep their own `thiserror` enums and convert into
//! [`AppError`] at the edge, so callers only ever render one shape.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Pricing errors
//! - 2xxx: Dependency rule errors
//! - 3xxx: Catalog errors
//! - 4xxx: Quote errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::ServiceNotFound);
//!
//! // Create an error with custom message and details
//! let err = AppError::with_message(ErrorCode::DependencyCycle, "Rule closes a cycle")
//!     .with_detail("path", vec![1, 2, 3, 1]);
//! assert_eq!(err.code.code(), 2005);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
