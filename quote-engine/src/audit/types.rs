//! 审计类型定义
//!
//! Entries are immutable once appended. Each one carries a SHA-256 hash that
//! covers the previous entry's hash, so any edit breaks the chain.

use serde::{Deserialize, Serialize};
use shared::types::Timestamp;

/// 审计操作类型（枚举，非自由文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // ═══ Quotes ═══
    QuoteCreated,
    QuoteRevised,
    QuoteStatusChanged,

    // ═══ Catalog administration ═══
    DependencyRuleAccepted,
    DependencyRuleRejected,
    CatalogLoaded,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuoteCreated => "quote_created",
            Self::QuoteRevised => "quote_revised",
            Self::QuoteStatusChanged => "quote_status_changed",
            Self::DependencyRuleAccepted => "dependency_rule_accepted",
            Self::DependencyRuleRejected => "dependency_rule_rejected",
            Self::CatalogLoaded => "catalog_loaded",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 审计日志条目（不可变）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Sequence number, starting at 1
    pub id: u64,
    pub timestamp: Timestamp,
    pub action: AuditAction,
    /// `quote`, `dependency_rule`, `catalog`
    pub resource_type: String,
    pub resource_id: String,
    pub operator_id: Option<String>,
    pub operator_name: Option<String>,
    /// Snapshot or diff (see [`create_snapshot`](super::create_snapshot) / [`create_diff`](super::create_diff))
    pub details: serde_json::Value,
    pub prev_hash: String,
    pub curr_hash: String,
}

/// Who performed an audited action (`None` for system events)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operator {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Operator {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }

    pub fn system() -> Self {
        Self::default()
    }
}

/// 审计链验证结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditChainVerification {
    pub total_entries: u64,
    pub chain_intact: bool,
    pub breaks: Vec<AuditChainBreak>,
}

/// 审计链断裂点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditChainBreak {
    pub entry_id: u64,
    pub reason: ChainBreakReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainBreakReason {
    /// `prev_hash` does not match the previous entry's `curr_hash`
    PrevHashMismatch { expected: String, actual: String },
    /// Entry content no longer matches its own `curr_hash`
    ContentModified { expected: String, actual: String },
}
