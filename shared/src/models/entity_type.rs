//! Business Entity Type Model

use super::id::deserialize_id;
use serde::{Deserialize, Serialize};

/// How an entity type modifier is applied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModifierType {
    #[default]
    Multiplier,
}

/// Client legal form (sole trader, LLC, partnership, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessEntityType {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub name: String,
    /// Applied to the subtotal after factor multipliers (1.0 = no change)
    #[serde(default = "default_modifier")]
    pub price_modifier: f64,
    #[serde(default)]
    pub modifier_type: ModifierType,
}

fn default_modifier() -> f64 {
    1.0
}
