//! Dependency rule validation
//!
//! Runs before a rule is stored. Rejected rules never reach the table, which
//! keeps the graph acyclic and within one service.

use super::cycle::detect_cycle;
use super::error::DependencyError;
use super::resolver::effective_rule_set;
use serde::{Deserialize, Serialize};
use shared::models::{FactorDependencyRule, PricingFactor};

/// Serializable outcome for admin callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<(), DependencyError>> for RuleValidation {
    fn from(result: Result<(), DependencyError>) -> Self {
        match result {
            Ok(()) => Self {
                is_valid: true,
                error: None,
            },
            Err(e) => Self {
                is_valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Check a candidate rule against the factors and the rules already stored.
///
/// An existing rule with the candidate's id is treated as the version being
/// replaced. Legacy single-dependency fields of factors without rule rows
/// count as edges.
pub fn validate_rule(
    candidate: &FactorDependencyRule,
    existing_rules: &[FactorDependencyRule],
    factors: &[PricingFactor],
) -> Result<(), DependencyError> {
    let dependent = factors
        .iter()
        .find(|f| f.id == candidate.factor_id)
        .ok_or(DependencyError::FactorNotFound(candidate.factor_id))?;
    let controlling = factors
        .iter()
        .find(|f| f.id == candidate.depends_on_factor_id)
        .ok_or(DependencyError::ControllingFactorNotFound(
            candidate.depends_on_factor_id,
        ))?;

    if dependent.service_id != controlling.service_id {
        return Err(DependencyError::CrossService {
            factor_id: dependent.id,
            factor_service: dependent.service_id,
            depends_on_factor_id: controlling.id,
            controlling_service: controlling.service_id,
        });
    }

    if candidate.factor_id == candidate.depends_on_factor_id {
        return Err(DependencyError::SelfReference(candidate.factor_id));
    }

    let mut rules: Vec<FactorDependencyRule> = existing_rules
        .iter()
        .filter(|r| r.id != candidate.id)
        .cloned()
        .collect();
    rules.push(candidate.clone());

    // Legacy edges hide factors just like rows do, so they close cycles too
    let report = detect_cycle(&effective_rule_set(factors, &rules), candidate.factor_id);
    if report.has_cycle {
        return Err(DependencyError::Cycle { path: report.path });
    }

    Ok(())
}

/// [`validate_rule`] in data form, logging rejections
pub fn check_rule(
    candidate: &FactorDependencyRule,
    existing_rules: &[FactorDependencyRule],
    factors: &[PricingFactor],
) -> RuleValidation {
    let result = validate_rule(candidate, existing_rules, factors);
    if let Err(e) = &result {
        tracing::warn!(
            rule_id = candidate.id,
            factor_id = candidate.factor_id,
            depends_on_factor_id = candidate.depends_on_factor_id,
            error = %e,
            "Dependency rule rejected"
        );
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ConditionType, FactorKind};

    fn factor(id: i64, service_id: i64) -> PricingFactor {
        PricingFactor {
            id,
            service_id,
            name: format!("Factor {}", id),
            kind: FactorKind::Select,
            is_required: false,
            display_order: 0,
            depends_on_factor_id: None,
            depends_on_option_ids: vec![],
        }
    }

    fn rule(id: i64, factor_id: i64, depends_on: i64) -> FactorDependencyRule {
        FactorDependencyRule {
            id,
            factor_id,
            depends_on_factor_id: depends_on,
            condition_type: ConditionType::OptionSelected,
            condition_value: vec![1],
            description: None,
        }
    }

    fn factors() -> Vec<PricingFactor> {
        vec![factor(1, 1), factor(2, 1), factor(3, 1), factor(4, 2)]
    }

    #[test]
    fn test_accepts_valid_rule() {
        assert_eq!(validate_rule(&rule(1, 2, 1), &[], &factors()), Ok(()));
    }

    #[test]
    fn test_rejects_unknown_factors() {
        assert_eq!(
            validate_rule(&rule(1, 9, 1), &[], &factors()),
            Err(DependencyError::FactorNotFound(9))
        );
        assert_eq!(
            validate_rule(&rule(1, 1, 9), &[], &factors()),
            Err(DependencyError::ControllingFactorNotFound(9))
        );
    }

    #[test]
    fn test_rejects_self_reference() {
        assert_eq!(
            validate_rule(&rule(1, 2, 2), &[], &factors()),
            Err(DependencyError::SelfReference(2))
        );
    }

    #[test]
    fn test_rejects_cross_service() {
        let err = validate_rule(&rule(1, 4, 1), &[], &factors()).unwrap_err();
        assert!(matches!(err, DependencyError::CrossService { factor_service: 2, controlling_service: 1, .. }));
    }

    #[test]
    fn test_rejects_closing_cycle() {
        let existing = vec![rule(1, 1, 2), rule(2, 2, 3)];
        let err = validate_rule(&rule(3, 3, 1), &existing, &factors()).unwrap_err();
        match err {
            DependencyError::Cycle { path } => {
                assert_eq!(path, vec![3, 1, 2, 3]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_update_replaces_existing_rule() {
        let existing = vec![rule(1, 2, 1), rule(2, 3, 2)];
        assert_eq!(validate_rule(&rule(2, 3, 1), &existing, &factors()), Ok(()));

        // Reversing rule 1 in place: the old 2 → 1 edge is gone
        assert_eq!(validate_rule(&rule(1, 1, 2), &existing, &factors()), Ok(()));
        // As a new rule it would close 1 → 2 → 1
        assert!(validate_rule(&rule(9, 1, 2), &existing, &factors()).is_err());
    }

    #[test]
    fn test_check_rule_data_form() {
        let ok = check_rule(&rule(1, 2, 1), &[], &factors());
        assert!(ok.is_valid);
        assert!(ok.error.is_none());

        let bad = check_rule(&rule(1, 2, 2), &[], &factors());
        assert!(!bad.is_valid);
        assert_eq!(bad.error.as_deref(), Some("Factor 2 cannot depend on itself"));
    }
}
