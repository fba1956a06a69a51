//! Catalog
//!
//! In-memory snapshot of the admin-managed tables: services, factors,
//! options, entity types, add-ons and dependency rules. Loaded once and
//! shared read-only by every calculation.

mod error;
mod loader;
mod validation;

pub use error::{CatalogError, CatalogIssue};

use serde::{Deserialize, Serialize};
use shared::models::{
    Addon, BusinessEntityType, FactorDependencyRule, FactorOption, PricingFactor, Service,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub factors: Vec<PricingFactor>,
    #[serde(default)]
    pub options: Vec<FactorOption>,
    #[serde(default)]
    pub entity_types: Vec<BusinessEntityType>,
    #[serde(default)]
    pub addons: Vec<Addon>,
    #[serde(default)]
    pub dependency_rules: Vec<FactorDependencyRule>,
}

impl Catalog {
    pub fn service(&self, id: i64) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn factor(&self, id: i64) -> Option<&PricingFactor> {
        self.factors.iter().find(|f| f.id == id)
    }

    /// Factors of a service in display order
    pub fn factors_for_service(&self, service_id: i64) -> Vec<&PricingFactor> {
        let mut factors: Vec<_> = self
            .factors
            .iter()
            .filter(|f| f.service_id == service_id)
            .collect();
        factors.sort_by_key(|f| (f.display_order, f.id));
        factors
    }

    /// Options of a factor in display order
    pub fn options_for_factor(&self, factor_id: i64) -> Vec<&FactorOption> {
        let mut options: Vec<_> = self
            .options
            .iter()
            .filter(|o| o.factor_id == factor_id)
            .collect();
        options.sort_by_key(|o| (o.display_order, o.id));
        options
    }

    /// Rules whose dependent factor belongs to the service
    pub fn rules_for_service(&self, service_id: i64) -> Vec<FactorDependencyRule> {
        self.dependency_rules
            .iter()
            .filter(|r| {
                self.factor(r.factor_id)
                    .is_some_and(|f| f.service_id == service_id)
            })
            .cloned()
            .collect()
    }

    pub fn entity_type(&self, id: i64) -> Option<&BusinessEntityType> {
        self.entity_types.iter().find(|e| e.id == id)
    }

    pub fn addon(&self, id: i64) -> Option<&Addon> {
        self.addons.iter().find(|a| a.id == id)
    }

    /// Add-ons offered for a service: global ones plus those listing it
    pub fn available_addons(&self, service_id: i64) -> Vec<&Addon> {
        self.addons
            .iter()
            .filter(|a| a.is_available_for(service_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ConditionType, FactorKind, PriceImpactType};

    fn factor(id: i64, service_id: i64, display_order: i32) -> PricingFactor {
        PricingFactor {
            id,
            service_id,
            name: format!("Factor {}", id),
            kind: FactorKind::Select,
            is_required: false,
            display_order,
            depends_on_factor_id: None,
            depends_on_option_ids: vec![],
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            factors: vec![factor(1, 1, 2), factor(2, 1, 1), factor(3, 2, 0), factor(4, 1, 1)],
            options: vec![
                FactorOption {
                    id: 11,
                    factor_id: 1,
                    label: "B".to_string(),
                    price_impact: 0.0,
                    price_impact_type: PriceImpactType::Fixed,
                    display_order: 1,
                },
                FactorOption {
                    id: 10,
                    factor_id: 1,
                    label: "A".to_string(),
                    price_impact: 0.0,
                    price_impact_type: PriceImpactType::Fixed,
                    display_order: 0,
                },
            ],
            addons: vec![
                Addon {
                    id: 1,
                    name: "Global".to_string(),
                    description: None,
                    price: 10.0,
                    is_global: true,
                    service_ids: vec![],
                },
                Addon {
                    id: 2,
                    name: "Scoped".to_string(),
                    description: None,
                    price: 20.0,
                    is_global: false,
                    service_ids: vec![2],
                },
            ],
            dependency_rules: vec![
                FactorDependencyRule {
                    id: 1,
                    factor_id: 1,
                    depends_on_factor_id: 2,
                    condition_type: ConditionType::AnySelected,
                    condition_value: vec![],
                    description: None,
                },
                FactorDependencyRule {
                    id: 2,
                    factor_id: 3,
                    depends_on_factor_id: 9,
                    condition_type: ConditionType::AnySelected,
                    condition_value: vec![],
                    description: None,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_factors_sorted_by_display_order_then_id() {
        let c = catalog();
        let ids: Vec<i64> = c.factors_for_service(1).iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[test]
    fn test_options_sorted() {
        let c = catalog();
        let labels: Vec<&str> = c.options_for_factor(1).iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert!(c.options_for_factor(2).is_empty());
    }

    #[test]
    fn test_rules_for_service() {
        let c = catalog();
        let rules = c.rules_for_service(1);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, 1);
    }

    #[test]
    fn test_available_addons() {
        let c = catalog();
        let ids: Vec<i64> = c.available_addons(1).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1]);
        let ids: Vec<i64> = c.available_addons(2).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
