//! Service Model

use super::id::deserialize_id;
use serde::{Deserialize, Serialize};

/// Billable accounting service (root of every price calculation)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Base price in currency units (must be finite and >= 0)
    pub base_price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
