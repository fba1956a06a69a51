//! Add-on Model

use super::id::{deserialize_id, deserialize_id_list};
use serde::{Deserialize, Serialize};

/// Optional extra billed on top of the computed service price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Addon {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Fixed price in currency units, always additive
    pub price: f64,
    /// Offered for every service
    #[serde(default)]
    pub is_global: bool,
    /// Services this add-on is offered for (ignored when `is_global`)
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub service_ids: Vec<i64>,
}

impl Addon {
    /// Whether the add-on may be offered for the given service
    pub fn is_available_for(&self, service_id: i64) -> bool {
        self.is_global || self.service_ids.contains(&service_id)
    }
}
