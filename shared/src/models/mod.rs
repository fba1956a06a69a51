//! Data models
//!
//! Immutable catalog records exchanged with the external store, plus the
//! transient calculator selections. All IDs are `i64`, normalized on
//! deserialization by the helpers in [`id`].

pub mod addon;
pub mod dependency_rule;
pub mod entity_type;
pub mod factor_option;
pub mod id;
pub mod pricing_factor;
pub mod selection;
pub mod service;

// Re-exports
pub use addon::*;
pub use dependency_rule::*;
pub use entity_type::*;
pub use factor_option::*;
pub use pricing_factor::*;
pub use selection::*;
pub use service::*;
