//! Pricing Factor Model

use super::factor_option::PriceImpactType;
use super::id::{deserialize_id, deserialize_id_list, deserialize_opt_id};
use serde::{Deserialize, Serialize};

/// Factor input kind
///
/// `select` factors are priced through their `FactorOption` rows.
/// `boolean` and `number` factors carry their own impact directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "factor_type", rename_all = "snake_case")]
pub enum FactorKind {
    Select,
    /// Contributes `price_impact` when switched on
    Boolean {
        #[serde(default)]
        price_impact: f64,
        #[serde(default)]
        price_impact_type: PriceImpactType,
    },
    /// Contributes `value × unit_price`
    Number {
        #[serde(default)]
        unit_price: f64,
        #[serde(default)]
        price_impact_type: PriceImpactType,
    },
}

impl FactorKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Boolean { .. } => "boolean",
            Self::Number { .. } => "number",
        }
    }
}

/// Configurable pricing factor of a service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingFactor {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub service_id: i64,
    pub name: String,
    #[serde(flatten)]
    pub kind: FactorKind,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub display_order: i32,

    // 旧版单一依赖字段 (dependency rule 表存在时被覆盖)
    /// Legacy controlling factor id
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub depends_on_factor_id: Option<i64>,
    /// Legacy controlling option ids
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub depends_on_option_ids: Vec<i64>,
}

impl PricingFactor {
    pub fn is_select(&self) -> bool {
        matches!(self.kind, FactorKind::Select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_select_factor() {
        let f: PricingFactor = serde_json::from_str(
            r#"{"id": "3", "service_id": 1, "name": "Turnover", "factor_type": "select",
                "is_required": true, "display_order": 2}"#,
        )
        .unwrap();
        assert_eq!(f.id, 3);
        assert!(f.is_select());
        assert!(f.is_required);
        assert_eq!(f.depends_on_factor_id, None);
    }

    #[test]
    fn test_deserialize_number_factor() {
        let f: PricingFactor = serde_json::from_str(
            r#"{"id": 4, "service_id": 1, "name": "Employees", "factor_type": "number",
                "unit_price": 25, "price_impact_type": "fixed",
                "depends_on_factor_id": "3", "depends_on_option_ids": ["10", 11]}"#,
        )
        .unwrap();
        assert_eq!(
            f.kind,
            FactorKind::Number {
                unit_price: 25.0,
                price_impact_type: PriceImpactType::Fixed
            }
        );
        assert_eq!(f.depends_on_factor_id, Some(3));
        assert_eq!(f.depends_on_option_ids, vec![10, 11]);
        assert_eq!(f.kind.type_name(), "number");
    }

    #[test]
    fn test_serialize_keeps_factor_type_tag() {
        let f = PricingFactor {
            id: 1,
            service_id: 1,
            name: "VAT registered".to_string(),
            kind: FactorKind::Boolean {
                price_impact: 50.0,
                price_impact_type: PriceImpactType::Fixed,
            },
            is_required: false,
            display_order: 0,
            depends_on_factor_id: None,
            depends_on_option_ids: vec![],
        };
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["factor_type"], "boolean");
        assert_eq!(json["price_impact"], 50.0);
    }
}
