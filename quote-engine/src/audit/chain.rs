//! 审计哈希链
//!
//! Append-only, caller-owned. Persisting entries is up to the caller; a
//! reloaded trail can be checked with [`AuditTrail::verify_chain`].

use super::types::{
    AuditAction, AuditChainBreak, AuditChainVerification, AuditEntry, ChainBreakReason, Operator,
};
use serde_json::Value;
use sha2::{Digest, Sha256};
use shared::util::now_millis;

/// `prev_hash` of the first entry
pub const GENESIS_HASH: &str = "genesis";

#[derive(Debug, Clone, Default)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap entries loaded from storage. Call `verify_chain` before trusting them.
    pub fn from_entries(entries: Vec<AuditEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_hash(&self) -> &str {
        self.entries
            .last()
            .map(|e| e.curr_hash.as_str())
            .unwrap_or(GENESIS_HASH)
    }

    /// Append an entry and mirror it to the `audit` log target
    pub fn append(
        &mut self,
        action: AuditAction,
        resource_type: &str,
        resource_id: impl Into<String>,
        operator: &Operator,
        details: Value,
    ) -> &AuditEntry {
        let id = self.entries.last().map(|e| e.id + 1).unwrap_or(1);
        let prev_hash = self.last_hash().to_string();
        let mut entry = AuditEntry {
            id,
            timestamp: now_millis(),
            action,
            resource_type: resource_type.to_string(),
            resource_id: resource_id.into(),
            operator_id: operator.id.clone(),
            operator_name: operator.name.clone(),
            details,
            prev_hash,
            curr_hash: String::new(),
        };
        entry.curr_hash = compute_audit_hash(&entry);

        crate::audit_log!(
            entry.operator_id.as_deref().unwrap_or("system"),
            entry.action.as_str(),
            format!("{}:{}", entry.resource_type, entry.resource_id),
            entry.details.to_string()
        );

        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Entries for one resource, oldest first
    pub fn history<'a>(
        &'a self,
        resource_type: &'a str,
        resource_id: &'a str,
    ) -> impl Iterator<Item = &'a AuditEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.resource_type == resource_type && e.resource_id == resource_id)
    }

    /// Recompute every hash and check the links between entries
    pub fn verify_chain(&self) -> AuditChainVerification {
        let mut breaks = Vec::new();
        let mut expected_prev = GENESIS_HASH;

        for entry in &self.entries {
            if entry.prev_hash != expected_prev {
                breaks.push(AuditChainBreak {
                    entry_id: entry.id,
                    reason: ChainBreakReason::PrevHashMismatch {
                        expected: expected_prev.to_string(),
                        actual: entry.prev_hash.clone(),
                    },
                });
            }
            let recomputed = compute_audit_hash(entry);
            if recomputed != entry.curr_hash {
                breaks.push(AuditChainBreak {
                    entry_id: entry.id,
                    reason: ChainBreakReason::ContentModified {
                        expected: recomputed,
                        actual: entry.curr_hash.clone(),
                    },
                });
            }
            expected_prev = entry.curr_hash.as_str();
        }

        if !breaks.is_empty() {
            tracing::error!(target: "audit", breaks = breaks.len(), "Audit chain verification failed");
        }

        AuditChainVerification {
            total_entries: self.entries.len() as u64,
            chain_intact: breaks.is_empty(),
            breaks,
        }
    }
}

/// 规范化 JSON：整数值的浮点数转为整数，保证哈希稳定
fn normalize_json(value: &Value) -> Value {
    /// f64 可精确表示的最大整数绝对值 (2^53)
    const MAX_SAFE_INT: f64 = (1_i64 << 53) as f64;

    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64()
                && f.fract() == 0.0
                && f.abs() <= MAX_SAFE_INT
            {
                return Value::Number(serde_json::Number::from(f as i64));
            }
            value.clone()
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize_json(v)))
                .collect(),
        ),
        Value::Array(arr) => Value::Array(arr.iter().map(normalize_json).collect()),
        _ => value.clone(),
    }
}

/// SHA-256 over `prev_hash` and every entry field except `curr_hash`
fn compute_audit_hash(entry: &AuditEntry) -> String {
    let mut hasher = Sha256::new();

    hasher.update(entry.prev_hash.as_bytes());
    hasher.update(b"\x00");

    hasher.update(entry.id.to_le_bytes());
    hasher.update(entry.timestamp.to_le_bytes());

    hasher.update(entry.action.as_str().as_bytes());
    hasher.update(b"\x00");

    hasher.update(entry.resource_type.as_bytes());
    hasher.update(b"\x00");
    hasher.update(entry.resource_id.as_bytes());
    hasher.update(b"\x00");

    hash_optional(&mut hasher, entry.operator_id.as_deref());
    hash_optional(&mut hasher, entry.operator_name.as_deref());

    let details = serde_json::to_string(&normalize_json(&entry.details)).unwrap_or_default();
    hasher.update(details.as_bytes());
    hasher.update(b"\x00");

    hex::encode(hasher.finalize())
}

/// `\x00` = None, `\x01` + bytes = Some, then a separator
fn hash_optional(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(v) => {
            hasher.update(b"\x01");
            hasher.update(v.as_bytes());
        }
        None => hasher.update(b"\x00"),
    }
    hasher.update(b"\x00");
}
