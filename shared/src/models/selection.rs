//! Calculator selections (transient user input, never persisted by the engine)

use super::id::{deserialize_id, deserialize_opt_id};
use serde::{Deserialize, Serialize};

/// Value entered for a boolean or number factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FactorValue {
    Boolean(bool),
    Number(f64),
}

impl FactorValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Boolean(_) => None,
        }
    }
}

/// User selection for one pricing factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedFactor {
    #[serde(deserialize_with = "deserialize_id")]
    pub factor_id: i64,
    /// Chosen option (select factors)
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub option_id: Option<i64>,
    /// Entered value (boolean / number factors)
    #[serde(default)]
    pub value: Option<FactorValue>,
}

impl SelectedFactor {
    pub fn option(factor_id: i64, option_id: i64) -> Self {
        Self {
            factor_id,
            option_id: Some(option_id),
            value: None,
        }
    }

    pub fn boolean(factor_id: i64, value: bool) -> Self {
        Self {
            factor_id,
            option_id: None,
            value: Some(FactorValue::Boolean(value)),
        }
    }

    pub fn number(factor_id: i64, value: f64) -> Self {
        Self {
            factor_id,
            option_id: None,
            value: Some(FactorValue::Number(value)),
        }
    }
}
