//! 审计日志模块
//!
//! Tamper-evident record of quote and catalog changes.
//!
//! - `types`: entry and verification types
//! - `diff`: snapshot / diff details for entries
//! - `chain`: SHA-256 hash chain

mod chain;
mod diff;
mod types;

pub use chain::{AuditTrail, GENESIS_HASH};
pub use diff::{AuditConfig, FieldChange, create_diff, create_snapshot, get_config};
pub use types::{
    AuditAction, AuditChainBreak, AuditChainVerification, AuditEntry, ChainBreakReason, Operator,
};
