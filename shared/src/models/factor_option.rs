//! Factor Option Model

use super::id::deserialize_id;
use serde::{Deserialize, Serialize};

/// How a price impact participates in the pricing pipeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceImpactType {
    /// Added to the running total as a currency amount
    #[default]
    Fixed,
    /// Fraction of the service base price (0.2 = 20%)
    Percentage,
    /// Factor applied to the subtotal (1.2 = +20%)
    Multiplier,
}

impl PriceImpactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Percentage => "percentage",
            Self::Multiplier => "multiplier",
        }
    }
}

impl std::fmt::Display for PriceImpactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selectable option of a `select` pricing factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorOption {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub factor_id: i64,
    pub label: String,
    /// Amount, fraction or multiplier depending on `price_impact_type`
    pub price_impact: f64,
    #[serde(default)]
    pub price_impact_type: PriceImpactType,
    #[serde(default)]
    pub display_order: i32,
}
