//! Catalog validation
//!
//! The engine tolerates bad data at calculation time. This pass reports it
//! up front so administrators can fix the tables.

use super::Catalog;
use super::error::CatalogIssue;
use crate::dependency::validate_rule;
use crate::pricing::money::to_decimal;
use shared::models::{FactorDependencyRule, FactorKind, PriceImpactType, PricingFactor};
use std::collections::HashSet;

impl Catalog {
    /// Every issue found, in table order. Empty means valid.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        duplicates("services", self.services.iter().map(|s| s.id), &mut issues);
        duplicates("factors", self.factors.iter().map(|f| f.id), &mut issues);
        duplicates("options", self.options.iter().map(|o| o.id), &mut issues);
        duplicates("entity_types", self.entity_types.iter().map(|e| e.id), &mut issues);
        duplicates("addons", self.addons.iter().map(|a| a.id), &mut issues);
        duplicates(
            "dependency_rules",
            self.dependency_rules.iter().map(|r| r.id),
            &mut issues,
        );

        for service in &self.services {
            if to_decimal(service.base_price).is_none() || service.base_price < 0.0 {
                issues.push(CatalogIssue::new(
                    "services",
                    service.id,
                    format!("invalid base price {}", service.base_price),
                ));
            }
        }

        self.validate_factors(&mut issues);
        self.validate_options(&mut issues);

        for entity in &self.entity_types {
            if to_decimal(entity.price_modifier).is_none() {
                issues.push(CatalogIssue::new("entity_types", entity.id, "price modifier out of range"));
            } else if entity.price_modifier <= 0.0 {
                issues.push(CatalogIssue::new(
                    "entity_types",
                    entity.id,
                    format!("price modifier must be positive, got {}", entity.price_modifier),
                ));
            }
        }

        for addon in &self.addons {
            if to_decimal(addon.price).is_none() || addon.price < 0.0 {
                issues.push(CatalogIssue::new(
                    "addons",
                    addon.id,
                    format!("invalid price {}", addon.price),
                ));
            }
            if !addon.is_global {
                for service_id in &addon.service_ids {
                    if self.service(*service_id).is_none() {
                        issues.push(CatalogIssue::new(
                            "addons",
                            addon.id,
                            format!("unknown service {}", service_id),
                        ));
                    }
                }
            }
        }

        // Replay rules in stored order, as if inserted one by one. Legacy
        // fields of factors that have rows are overridden by the full table,
        // so only the remaining legacy edges take part.
        let factors: Vec<PricingFactor> = self
            .factors
            .iter()
            .map(|f| {
                let mut f = f.clone();
                if self.dependency_rules.iter().any(|r| r.factor_id == f.id) {
                    f.depends_on_factor_id = None;
                }
                f
            })
            .collect();
        let mut accepted: Vec<FactorDependencyRule> = Vec::with_capacity(self.dependency_rules.len());
        for rule in &self.dependency_rules {
            match validate_rule(rule, &accepted, &factors) {
                Ok(()) => accepted.push(rule.clone()),
                Err(e) => issues.push(CatalogIssue::new("dependency_rules", rule.id, e.to_string())),
            }
        }

        if !issues.is_empty() {
            tracing::warn!(count = issues.len(), "Catalog validation found issues");
        }
        issues
    }

    fn validate_factors(&self, issues: &mut Vec<CatalogIssue>) {
        for factor in &self.factors {
            if self.service(factor.service_id).is_none() {
                issues.push(CatalogIssue::new(
                    "factors",
                    factor.id,
                    format!("unknown service {}", factor.service_id),
                ));
            }

            let (amount, impact_type) = match factor.kind {
                FactorKind::Select => {
                    if self.options.iter().all(|o| o.factor_id != factor.id) {
                        issues.push(CatalogIssue::new("factors", factor.id, "select factor has no options"));
                    }
                    (0.0, PriceImpactType::Fixed)
                }
                FactorKind::Boolean {
                    price_impact,
                    price_impact_type,
                } => (price_impact, price_impact_type),
                FactorKind::Number {
                    unit_price,
                    price_impact_type,
                } => (unit_price, price_impact_type),
            };
            if to_decimal(amount).is_none() {
                issues.push(CatalogIssue::new("factors", factor.id, "price impact out of range"));
            }
            if impact_type != PriceImpactType::Fixed {
                issues.push(CatalogIssue::new(
                    "factors",
                    factor.id,
                    format!(
                        "{} factor cannot use a {} impact",
                        factor.kind.type_name(),
                        impact_type
                    ),
                ));
            }

            if let Some(controlling) = factor.depends_on_factor_id {
                match self.factor(controlling) {
                    None => issues.push(CatalogIssue::new(
                        "factors",
                        factor.id,
                        format!("legacy dependency on unknown factor {}", controlling),
                    )),
                    Some(c) if c.service_id != factor.service_id => {
                        issues.push(CatalogIssue::new(
                            "factors",
                            factor.id,
                            format!("legacy dependency on factor {} of another service", controlling),
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
    }

    fn validate_options(&self, issues: &mut Vec<CatalogIssue>) {
        for option in &self.options {
            match self.factor(option.factor_id) {
                None => issues.push(CatalogIssue::new(
                    "options",
                    option.id,
                    format!("unknown factor {}", option.factor_id),
                )),
                Some(f) if !f.is_select() => issues.push(CatalogIssue::new(
                    "options",
                    option.id,
                    format!("factor {} is a {} factor", f.id, f.kind.type_name()),
                )),
                Some(_) => {}
            }
            if to_decimal(option.price_impact).is_none() {
                issues.push(CatalogIssue::new("options", option.id, "price impact out of range"));
            }
        }
    }
}

fn duplicates(table: &str, ids: impl Iterator<Item = i64>, issues: &mut Vec<CatalogIssue>) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(CatalogIssue::new(table, id, "duplicate id"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_every_issue() {
        let catalog = Catalog::from_json_str(
            r#"{
                "services": [
                    {"id": 1, "name": "Payroll", "base_price": 100},
                    {"id": 1, "name": "Payroll copy", "base_price": 100}
                ],
                "factors": [
                    {"id": 1, "service_id": 1, "name": "Employees", "factor_type": "select"},
                    {"id": 2, "service_id": 1, "name": "Rush", "factor_type": "boolean",
                     "price_impact": 1.5, "price_impact_type": "multiplier"},
                    {"id": 3, "service_id": 7, "name": "Orphan", "factor_type": "number", "unit_price": 3}
                ],
                "options": [
                    {"id": 1, "factor_id": 1, "label": "1-5", "price_impact": 10},
                    {"id": 2, "factor_id": 2, "label": "Yes", "price_impact": 10}
                ],
                "entity_types": [{"id": 1, "name": "Ltd", "price_modifier": 0}],
                "addons": [{"id": 1, "name": "Filing", "price": 50, "service_ids": [9]}],
                "dependency_rules": [
                    {"id": 1, "factor_id": 1, "depends_on_factor_id": 1, "condition_type": "any_selected"}
                ]
            }"#,
        )
        .unwrap();

        let issues = catalog.validate();
        let summary: Vec<String> = issues.iter().map(ToString::to_string).collect();
        assert_eq!(
            summary,
            vec![
                "services#1: duplicate id",
                "factors#2: boolean factor cannot use a multiplier impact",
                "factors#3: unknown service 7",
                "options#2: factor 2 is a boolean factor",
                "entity_types#1: price modifier must be positive, got 0",
                "addons#1: unknown service 9",
                "dependency_rules#1: Factor 1 cannot depend on itself",
            ]
        );
    }

    #[test]
    fn test_rule_replay_catches_cycle() {
        let catalog = Catalog::from_json_str(
            r#"{
                "services": [{"id": 1, "name": "Tax return", "base_price": 300}],
                "factors": [
                    {"id": 1, "service_id": 1, "name": "A", "factor_type": "number"},
                    {"id": 2, "service_id": 1, "name": "B", "factor_type": "number"}
                ],
                "dependency_rules": [
                    {"id": 1, "factor_id": 2, "depends_on_factor_id": 1, "condition_type": "any_selected"},
                    {"id": 2, "factor_id": 1, "depends_on_factor_id": 2, "condition_type": "any_selected"}
                ]
            }"#,
        )
        .unwrap();

        let issues = catalog.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, 2);
        assert!(issues[0].message.contains("circular"));
    }

    #[test]
    fn test_rule_replay_sees_legacy_edges() {
        let catalog = Catalog::from_json_str(
            r#"{
                "services": [{"id": 1, "name": "Payroll", "base_price": 0}],
                "factors": [
                    {"id": 1, "service_id": 1, "name": "Pension provider", "factor_type": "boolean",
                     "depends_on_factor_id": 2},
                    {"id": 2, "service_id": 1, "name": "Auto-enrolment", "factor_type": "boolean"},
                    {"id": 3, "service_id": 1, "name": "Pension review", "factor_type": "boolean",
                     "depends_on_factor_id": 2},
                    {"id": 4, "service_id": 1, "name": "Directors", "factor_type": "boolean"}
                ],
                "dependency_rules": [
                    {"id": 1, "factor_id": 2, "depends_on_factor_id": 1, "condition_type": "any_selected"},
                    {"id": 2, "factor_id": 2, "depends_on_factor_id": 3, "condition_type": "any_selected"},
                    {"id": 3, "factor_id": 3, "depends_on_factor_id": 4, "condition_type": "any_selected"}
                ]
            }"#,
        )
        .unwrap();

        let issues = catalog.validate();
        let summary: Vec<String> = issues.iter().map(ToString::to_string).collect();
        // Rule 1 closes 2 → 1 → 2 through factor 1's legacy field. Rule 3
        // replaces factor 3's legacy edge, so rule 2 stays acyclic.
        assert_eq!(
            summary,
            vec!["dependency_rules#1: Rule would create a circular dependency: 2 → 1 → 2"]
        );
    }

    #[test]
    fn test_out_of_range_amounts() {
        let catalog = Catalog::from_json_str(
            r#"{
                "services": [{"id": 1, "name": "Audit", "base_price": 1e29}],
                "factors": [
                    {"id": 1, "service_id": 1, "name": "Size", "factor_type": "select"},
                    {"id": 2, "service_id": 1, "name": "Staff", "factor_type": "number", "unit_price": 1e30}
                ],
                "options": [{"id": 1, "factor_id": 1, "label": "Huge", "price_impact": -1e30}],
                "entity_types": [{"id": 1, "name": "Plc", "price_modifier": 1e30}],
                "addons": [{"id": 1, "name": "Filing", "price": 1e30, "is_global": true}]
            }"#,
        )
        .unwrap();

        let summary: Vec<String> = catalog.validate().iter().map(ToString::to_string).collect();
        assert_eq!(
            summary,
            vec![
                "services#1: invalid base price 100000000000000000000000000000",
                "factors#2: price impact out of range",
                "options#1: price impact out of range",
                "entity_types#1: price modifier out of range",
                "addons#1: invalid price 1000000000000000000000000000000",
            ]
        );
    }
}
