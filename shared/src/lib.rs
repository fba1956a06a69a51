//! Shared types for the quote engine
//!
//! Catalog data models, id normalization, the unified error system and a
//! few utilities used by every crate in the workspace.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
