//! Factor visibility
//!
//! A factor is visible when every dependency rule targeting it holds for the
//! current selections. Visibility is recomputed on every call.

use shared::models::{ConditionType, FactorDependencyRule, PricingFactor, SelectedFactor};
use std::borrow::Cow;
use std::collections::HashMap;

/// Controlling factor id → selected option id
pub type SelectionMap = HashMap<i64, i64>;

/// Build the controlling-selection map from calculator selections.
///
/// Only selections carrying an option id take part. The first selection of a
/// factor wins, matching the pricing pipeline.
pub fn selection_map(selected_factors: &[SelectedFactor]) -> SelectionMap {
    let mut map = SelectionMap::with_capacity(selected_factors.len());
    for s in selected_factors {
        if let Some(option_id) = s.option_id {
            map.entry(s.factor_id).or_insert(option_id);
        }
    }
    map
}

/// Convert a factor's legacy single dependency into a rule.
///
/// The synthesized rule carries the negated factor id so it never collides
/// with a stored rule id.
pub fn legacy_rule(factor: &PricingFactor) -> Option<FactorDependencyRule> {
    let controlling = factor.depends_on_factor_id?;
    let condition_type = if factor.depends_on_option_ids.is_empty() {
        ConditionType::AnySelected
    } else {
        ConditionType::OptionSelected
    };
    Some(FactorDependencyRule {
        id: -factor.id,
        factor_id: factor.id,
        depends_on_factor_id: controlling,
        condition_type,
        condition_value: factor.depends_on_option_ids.clone(),
        description: Some("legacy dependency".to_string()),
    })
}

/// Rules that decide a factor's visibility.
///
/// Rows from the rule table win; the legacy fields only apply to factors
/// without any row.
pub fn effective_rules<'a>(
    factor: &PricingFactor,
    rules: &'a [FactorDependencyRule],
) -> Vec<Cow<'a, FactorDependencyRule>> {
    let table: Vec<_> = rules
        .iter()
        .filter(|r| r.factor_id == factor.id)
        .map(Cow::Borrowed)
        .collect();
    if !table.is_empty() {
        return table;
    }
    legacy_rule(factor).map(Cow::Owned).into_iter().collect()
}

/// The full edge set visibility runs on: every table row plus the legacy
/// rule of each factor that has no row.
pub fn effective_rule_set(
    factors: &[PricingFactor],
    rules: &[FactorDependencyRule],
) -> Vec<FactorDependencyRule> {
    let mut all = rules.to_vec();
    all.extend(
        factors
            .iter()
            .filter(|f| rules.iter().all(|r| r.factor_id != f.id))
            .filter_map(legacy_rule),
    );
    all
}

/// Whether one rule holds for the current selections
pub fn rule_holds(rule: &FactorDependencyRule, current_selections: &SelectionMap) -> bool {
    // Unselected controller fails every condition type
    let Some(selected) = current_selections.get(&rule.depends_on_factor_id) else {
        return false;
    };
    match rule.condition_type {
        ConditionType::OptionSelected => rule.condition_value.contains(selected),
        ConditionType::AnySelected => true,
        ConditionType::OptionNotSelected => !rule.condition_value.contains(selected),
    }
}

/// Whether the factor should be shown given the current selections
pub fn is_visible(
    factor: &PricingFactor,
    rules: &[FactorDependencyRule],
    current_selections: &SelectionMap,
) -> bool {
    effective_rules(factor, rules)
        .iter()
        .all(|rule| rule_holds(rule, current_selections))
}

/// Visible factors, in input order
pub fn get_visible_factors<'a, I>(
    factors: I,
    rules: &[FactorDependencyRule],
    current_selections: &SelectionMap,
) -> Vec<&'a PricingFactor>
where
    I: IntoIterator<Item = &'a PricingFactor>,
{
    factors
        .into_iter()
        .filter(|f| is_visible(f, rules, current_selections))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::FactorKind;

    fn factor(id: i64) -> PricingFactor {
        PricingFactor {
            id,
            service_id: 1,
            name: format!("Factor {}", id),
            kind: FactorKind::Select,
            is_required: false,
            display_order: 0,
            depends_on_factor_id: None,
            depends_on_option_ids: vec![],
        }
    }

    fn rule(id: i64, factor_id: i64, depends_on: i64, condition: ConditionType, values: Vec<i64>) -> FactorDependencyRule {
        FactorDependencyRule {
            id,
            factor_id,
            depends_on_factor_id: depends_on,
            condition_type: condition,
            condition_value: values,
            description: None,
        }
    }

    fn selections(pairs: &[(i64, i64)]) -> SelectionMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_no_rules_is_visible() {
        assert!(is_visible(&factor(1), &[], &SelectionMap::new()));
    }

    #[test]
    fn test_option_selected() {
        let rules = vec![rule(1, 2, 1, ConditionType::OptionSelected, vec![10, 11])];
        assert!(is_visible(&factor(2), &rules, &selections(&[(1, 11)])));
        assert!(!is_visible(&factor(2), &rules, &selections(&[(1, 12)])));
    }

    #[test]
    fn test_option_not_selected() {
        let rules = vec![rule(1, 2, 1, ConditionType::OptionNotSelected, vec![10])];
        assert!(is_visible(&factor(2), &rules, &selections(&[(1, 11)])));
        assert!(!is_visible(&factor(2), &rules, &selections(&[(1, 10)])));
    }

    #[test]
    fn test_any_selected() {
        let rules = vec![rule(1, 2, 1, ConditionType::AnySelected, vec![])];
        assert!(is_visible(&factor(2), &rules, &selections(&[(1, 99)])));
    }

    #[test]
    fn test_unselected_controller_hides_for_every_condition() {
        for condition in [
            ConditionType::OptionSelected,
            ConditionType::AnySelected,
            ConditionType::OptionNotSelected,
        ] {
            let rules = vec![rule(1, 2, 1, condition, vec![10])];
            assert!(
                !is_visible(&factor(2), &rules, &SelectionMap::new()),
                "{:?} should hide when controller is unselected",
                condition
            );
        }
    }

    #[test]
    fn test_all_rules_must_hold() {
        let rules = vec![
            rule(1, 3, 1, ConditionType::AnySelected, vec![]),
            rule(2, 3, 2, ConditionType::OptionSelected, vec![20]),
        ];
        assert!(!is_visible(&factor(3), &rules, &selections(&[(1, 10)])));
        assert!(!is_visible(&factor(3), &rules, &selections(&[(1, 10), (2, 21)])));
        assert!(is_visible(&factor(3), &rules, &selections(&[(1, 10), (2, 20)])));
    }

    #[test]
    fn test_legacy_dependency() {
        let mut f = factor(2);
        f.depends_on_factor_id = Some(1);
        f.depends_on_option_ids = vec![10];
        assert!(is_visible(&f, &[], &selections(&[(1, 10)])));
        assert!(!is_visible(&f, &[], &selections(&[(1, 11)])));

        f.depends_on_option_ids = vec![];
        assert!(is_visible(&f, &[], &selections(&[(1, 11)])));
        assert!(!is_visible(&f, &[], &SelectionMap::new()));
    }

    #[test]
    fn test_rule_table_overrides_legacy() {
        let mut f = factor(2);
        f.depends_on_factor_id = Some(1);
        f.depends_on_option_ids = vec![10];
        let rules = vec![rule(1, 2, 5, ConditionType::AnySelected, vec![])];

        let effective = effective_rules(&f, &rules);
        assert_eq!(effective.len(), 1);
        assert_eq!(effective[0].depends_on_factor_id, 5);
        assert!(is_visible(&f, &rules, &selections(&[(5, 50)])));
    }

    #[test]
    fn test_get_visible_factors_keeps_order() {
        let factors = vec![factor(3), factor(1), factor(2)];
        let rules = vec![rule(1, 2, 1, ConditionType::OptionSelected, vec![10])];
        let current = selections(&[(1, 11)]);

        let first: Vec<i64> = get_visible_factors(&factors, &rules, &current).iter().map(|f| f.id).collect();
        let second: Vec<i64> = get_visible_factors(&factors, &rules, &current).iter().map(|f| f.id).collect();
        assert_eq!(first, vec![3, 1]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_selection_map_first_wins() {
        let map = selection_map(&[
            SelectedFactor::option(1, 10),
            SelectedFactor::boolean(2, true),
            SelectedFactor::option(1, 11),
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&10));
    }
}
