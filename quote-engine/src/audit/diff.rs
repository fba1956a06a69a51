//! 审计 JSON diff
//!
//! Compares before/after JSON to produce field-level changes. Nested objects
//! are walked recursively; floats compare with a tolerance so a serialize
//! round trip never shows up as a price change.

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeSet;

/// 浮点数比较容差
const FLOAT_EPSILON: f64 = 1e-9;

static NULL: Value = Value::Null;

fn numbers_equal(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(fa), Some(fb)) => (fa - fb).abs() < FLOAT_EPSILON,
        _ => a == b,
    }
}

/// 递归比较两个 JSON 值是否相等（浮点数使用容差比较）
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(va, vb)| values_equal(va, vb))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, va)| b.get(key).is_some_and(|vb| values_equal(va, vb)))
        }
        _ => a == b,
    }
}

/// 字段变更记录
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct FieldChange {
    /// Dotted path, e.g. `breakdown.final_price`
    pub field: String,
    pub from: Value,
    pub to: Value,
}

/// Per-resource snapshot settings
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub exclude_fields: &'static [&'static str],
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            exclude_fields: &["id"],
        }
    }
}

/// 获取资源的审计配置
pub fn get_config(resource_type: &str) -> AuditConfig {
    match resource_type {
        // Revisions are their own history; timestamps change on every save
        "quote" => AuditConfig {
            exclude_fields: &["id", "revisions", "created_at", "updated_at"],
        },
        "quote_revision" => AuditConfig {
            exclude_fields: &["created_at"],
        },
        "dependency_rule" => AuditConfig {
            exclude_fields: &["id"],
        },
        _ => AuditConfig::default(),
    }
}

fn diff_json_recursive(from: &Value, to: &Value, path: &str, changes: &mut Vec<FieldChange>) {
    match (from, to) {
        (Value::Object(from_obj), Value::Object(to_obj)) => {
            // Sorted keys keep the change list stable
            let keys: BTreeSet<&String> = from_obj.keys().chain(to_obj.keys()).collect();
            for key in keys {
                let field_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                let f = from_obj.get(key).unwrap_or(&NULL);
                let t = to_obj.get(key).unwrap_or(&NULL);
                diff_json_recursive(f, t, &field_path, changes);
            }
        }
        (f, t) => {
            if !values_equal(f, t) {
                changes.push(FieldChange {
                    field: path.to_string(),
                    from: f.clone(),
                    to: t.clone(),
                });
            }
        }
    }
}

fn filter_fields(value: &mut Value, exclude: &[&str]) {
    if let Value::Object(obj) = value {
        for field in exclude {
            obj.remove(*field);
        }
    }
}

fn filtered_value<T: Serialize>(value: &T, resource_type: &str) -> Option<Value> {
    let config = get_config(resource_type);
    match serde_json::to_value(value) {
        Ok(mut json) => {
            filter_fields(&mut json, config.exclude_fields);
            Some(json)
        }
        Err(e) => {
            tracing::error!(resource_type, error = %e, "Failed to serialize audit value");
            None
        }
    }
}

/// Snapshot of a created resource, minus excluded fields
pub fn create_snapshot<T: Serialize>(value: &T, resource_type: &str) -> Value {
    filtered_value(value, resource_type).unwrap_or_else(|| json!({"error": "serialization_failed"}))
}

/// Changes between two versions of a resource.
///
/// Returns `{"changes": [{"field", "from", "to"}, ...]}`; identical inputs
/// give an empty list plus a `note`.
pub fn create_diff<T: Serialize>(from: &T, to: &T, resource_type: &str) -> Value {
    let (Some(from_json), Some(to_json)) = (
        filtered_value(from, resource_type),
        filtered_value(to, resource_type),
    ) else {
        return json!({"error": "serialization_failed"});
    };

    let mut changes = Vec::new();
    diff_json_recursive(&from_json, &to_json, "", &mut changes);

    if changes.is_empty() {
        json!({"changes": [], "note": "no_changes_detected"})
    } else {
        json!({ "changes": changes })
    }
}
