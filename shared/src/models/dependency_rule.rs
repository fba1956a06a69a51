//! Factor Dependency Rule Model

use super::id::{deserialize_id, deserialize_id_list};
use serde::{Deserialize, Serialize};

/// Condition evaluated against the controlling factor's selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    /// Selected option is one of `condition_value`
    OptionSelected,
    /// Any option is selected
    AnySelected,
    /// Selected option is none of `condition_value`
    OptionNotSelected,
}

/// Conditional visibility rule between two factors of the same service
///
/// Edge direction: `factor_id` (dependent) → `depends_on_factor_id` (controlling).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorDependencyRule {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    /// Dependent (controlled) factor
    #[serde(deserialize_with = "deserialize_id")]
    pub factor_id: i64,
    /// Controlling factor
    #[serde(deserialize_with = "deserialize_id")]
    pub depends_on_factor_id: i64,
    pub condition_type: ConditionType,
    /// Controlling option ids (ignored for `any_selected`)
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub condition_value: Vec<i64>,
    #[serde(default)]
    pub description: Option<String>,
}
