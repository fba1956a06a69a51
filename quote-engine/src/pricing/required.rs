//! Required factor check

use super::breakdown::RequiredFactorsCheck;
use shared::models::{FactorKind, FactorValue, PricingFactor, SelectedFactor};

/// Report every required visible factor that has no usable selection.
///
/// Names are listed in `visible_factors` order. Hidden factors must already
/// be filtered out by the caller.
pub fn validate_required_factors(
    visible_factors: &[&PricingFactor],
    selected_factors: &[SelectedFactor],
) -> RequiredFactorsCheck {
    let missing_factor_names: Vec<String> = visible_factors
        .iter()
        .filter(|f| f.is_required)
        .filter(|f| {
            !selected_factors
                .iter()
                .any(|s| s.factor_id == f.id && is_answered(f, s))
        })
        .map(|f| f.name.clone())
        .collect();

    RequiredFactorsCheck {
        is_valid: missing_factor_names.is_empty(),
        missing_factor_names,
    }
}

fn is_answered(factor: &PricingFactor, selection: &SelectedFactor) -> bool {
    match factor.kind {
        FactorKind::Select => selection.option_id.is_some(),
        // false is an answer
        FactorKind::Boolean { .. } => matches!(selection.value, Some(FactorValue::Boolean(_))),
        FactorKind::Number { .. } => {
            matches!(selection.value, Some(FactorValue::Number(n)) if n.is_finite())
        }
    }
}
