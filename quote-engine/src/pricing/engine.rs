//! Pricing Engine
//!
//! Turns a service's base price plus the user's selections into an itemized
//! breakdown. The pipeline order is fixed:
//!
//! 1. base price
//! 2. fixed impacts (select options, boolean flags, number × unit price)
//! 3. percentage impacts, always of the base price
//! 4. factor multipliers, compounded then rounded to 3 dp
//! 5. entity type modifier
//! 6. add-ons, always additive
//!
//! Uses rust_decimal for precision calculations. Money is rounded to cents
//! after every stage.

use super::breakdown::{AddonDetail, CalculationResult, FactorDetail, PriceBreakdown};
use super::error::PricingError;
use super::money::{round_money, round_multiplier, to_decimal, to_f64, to_f64_exact};
use rust_decimal::prelude::*;
use shared::models::{
    Addon, BusinessEntityType, FactorKind, FactorOption, FactorValue, PriceImpactType,
    PricingFactor, SelectedFactor, Service,
};
use std::collections::HashSet;

/// A selection resolved against the catalog, ready for its stage
struct ResolvedImpact<'a> {
    factor: &'a PricingFactor,
    label: String,
    impact_type: PriceImpactType,
    impact: Decimal,
    /// Units entered on a number factor
    units: Option<Decimal>,
}

/// Calculate the price for one service configuration.
///
/// Never fails: an invalid service yields `is_valid = false`, a zero total
/// and an empty breakdown. Selections pointing at unknown factors or options
/// are skipped without error.
pub fn calculate_price(
    service: Option<&Service>,
    selected_factors: &[SelectedFactor],
    factor_options: &[FactorOption],
    pricing_factors: &[PricingFactor],
    entity_type: Option<&BusinessEntityType>,
    selected_addons: &[Addon],
) -> CalculationResult {
    match price_breakdown(
        service,
        selected_factors,
        factor_options,
        pricing_factors,
        entity_type,
        selected_addons,
    ) {
        Ok((breakdown, warnings)) => CalculationResult {
            total_price: breakdown.final_price,
            breakdown,
            is_valid: true,
            errors: vec![],
            warnings,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Price calculation rejected");
            CalculationResult::invalid(e.to_string())
        }
    }
}

/// Result-returning form of [`calculate_price`]: the breakdown plus warnings.
pub fn price_breakdown(
    service: Option<&Service>,
    selected_factors: &[SelectedFactor],
    factor_options: &[FactorOption],
    pricing_factors: &[PricingFactor],
    entity_type: Option<&BusinessEntityType>,
    selected_addons: &[Addon],
) -> Result<(PriceBreakdown, Vec<String>), PricingError> {
    let mut warnings = Vec::new();

    // Step 1: Base price
    let service = service.ok_or(PricingError::ServiceNotFound)?;
    let base = to_decimal(service.base_price)
        .filter(|b| !b.is_sign_negative() || b.is_zero())
        .map(round_money)
        .ok_or_else(|| PricingError::InvalidBasePrice {
            service: service.name.clone(),
            base_price: service.base_price,
        })?;
    if !service.is_active {
        warnings.push(format!("Service '{}' is not active", service.name));
    }

    let resolved = resolve_selections(
        selected_factors,
        factor_options,
        pricing_factors,
        &mut warnings,
    );

    let mut factor_details = Vec::with_capacity(resolved.len());

    // Step 2: Fixed impacts
    let mut fixed_acc = Decimal::ZERO;
    for r in resolved
        .iter()
        .filter(|r| r.impact_type == PriceImpactType::Fixed)
    {
        let Some((amount, acc)) = r
            .impact
            .checked_mul(r.units.unwrap_or(Decimal::ONE))
            .and_then(|amount| Some((amount, fixed_acc.checked_add(amount)?)))
        else {
            warnings.push(overflow_warning(r));
            continue;
        };
        fixed_acc = acc;
        let description = match r.units {
            Some(units) => format!(
                "{}: {} × {} ({})",
                r.factor.name,
                units.normalize(),
                signed(r.impact).trim_start_matches('+'),
                signed(amount)
            ),
            None => format!("{}: {} ({})", r.factor.name, r.label, signed(amount)),
        };
        factor_details.push(detail(r, amount, description));
    }
    let fixed_total = round_money(fixed_acc);
    tracing::debug!(service_id = service.id, fixed_total = %fixed_total, "Fixed impacts applied");

    // Step 3: Percentage impacts (of the base price, never compounded)
    let mut pct_acc = Decimal::ZERO;
    for r in resolved
        .iter()
        .filter(|r| r.impact_type == PriceImpactType::Percentage)
    {
        let Some((amount, acc, percent)) = base.checked_mul(r.impact).and_then(|amount| {
            Some((
                amount,
                pct_acc.checked_add(amount)?,
                r.impact.checked_mul(Decimal::ONE_HUNDRED)?,
            ))
        }) else {
            warnings.push(overflow_warning(r));
            continue;
        };
        pct_acc = acc;
        let description = format!(
            "{}: {} ({}% of base price, {})",
            r.factor.name,
            r.label,
            percent.normalize(),
            signed(amount)
        );
        factor_details.push(detail(r, amount, description));
    }
    let percentage_total = round_money(pct_acc);
    let subtotal_before = base
        .checked_add(fixed_total)
        .and_then(|s| s.checked_add(percentage_total))
        .map(round_money)
        .ok_or(PricingError::Overflow { stage: "percentage" })?;
    tracing::debug!(
        service_id = service.id,
        percentage_total = %percentage_total,
        subtotal_before = %subtotal_before,
        "Percentage impacts applied"
    );

    // Step 4: Multipliers
    let mut combined = Decimal::ONE;
    for r in resolved
        .iter()
        .filter(|r| r.impact_type == PriceImpactType::Multiplier)
    {
        let Some(next) = combined.checked_mul(r.impact) else {
            warnings.push(overflow_warning(r));
            continue;
        };
        combined = next;
        let description = format!(
            "{}: {} (×{})",
            r.factor.name,
            r.label,
            r.impact.normalize()
        );
        factor_details.push(detail(r, Decimal::ZERO, description));
    }
    let combined = round_multiplier(combined);
    let subtotal_after_multipliers = subtotal_before
        .checked_mul(combined)
        .map(round_money)
        .ok_or(PricingError::Overflow { stage: "multiplier" })?;
    tracing::debug!(
        service_id = service.id,
        multiplier = %combined,
        subtotal_after_multipliers = %subtotal_after_multipliers,
        "Multipliers applied"
    );

    // Step 5: Entity type modifier
    let entity_multiplier = match entity_type {
        Some(entity) => match to_decimal(entity.price_modifier)
            .filter(|m| m.is_sign_positive() && !m.is_zero())
        {
            Some(modifier) => modifier,
            None => {
                warnings.push(format!(
                    "Entity type '{}' has an invalid price modifier ({}); ignored",
                    entity.name, entity.price_modifier
                ));
                Decimal::ONE
            }
        },
        None => Decimal::ONE,
    };
    let subtotal_after_entity = subtotal_after_multipliers
        .checked_mul(entity_multiplier)
        .map(round_money)
        .ok_or(PricingError::Overflow {
            stage: "entity type",
        })?;

    // Step 6: Add-ons
    let mut addons_acc = Decimal::ZERO;
    let mut addon_details = Vec::with_capacity(selected_addons.len());
    for addon in selected_addons {
        let Some(price) = to_decimal(addon.price).filter(|p| !p.is_sign_negative() || p.is_zero())
        else {
            warnings.push(format!(
                "Add-on '{}' has an invalid price ({}); skipped",
                addon.name, addon.price
            ));
            continue;
        };
        let Some(acc) = addons_acc.checked_add(price) else {
            warnings.push(format!("Add-on '{}' is too large to price; skipped", addon.name));
            continue;
        };
        addons_acc = acc;
        addon_details.push(AddonDetail {
            addon_id: addon.id,
            name: addon.name.clone(),
            price: to_f64(price),
        });
    }
    let addons_total = round_money(addons_acc);
    let final_price = subtotal_after_entity
        .checked_add(addons_total)
        .map(round_money)
        .ok_or(PricingError::Overflow { stage: "add-on" })?;

    tracing::debug!(
        service_id = service.id,
        entity_multiplier = %entity_multiplier,
        addons_total = %addons_total,
        final_price = %final_price,
        "Price calculated"
    );

    let breakdown = PriceBreakdown {
        base_price: to_f64(base),
        fixed_impacts_total: to_f64(fixed_total),
        percentage_impacts_total: to_f64(percentage_total),
        subtotal_before_multipliers: to_f64(subtotal_before),
        multiplier_effect: to_f64_exact(combined),
        subtotal_after_multipliers: to_f64(subtotal_after_multipliers),
        entity_type_multiplier: to_f64_exact(entity_multiplier),
        subtotal_after_entity_type: to_f64(subtotal_after_entity),
        addons_total: to_f64(addons_total),
        final_price: to_f64(final_price),
        factor_details,
        addon_details,
    };

    Ok((breakdown, warnings))
}

/// Resolve selections against the catalog, in input order.
///
/// Stale references are dropped silently. Only the first selection of a
/// factor counts.
fn resolve_selections<'a>(
    selected_factors: &[SelectedFactor],
    factor_options: &'a [FactorOption],
    pricing_factors: &'a [PricingFactor],
    warnings: &mut Vec<String>,
) -> Vec<ResolvedImpact<'a>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(selected_factors.len());

    for selection in selected_factors {
        let Some(factor) = pricing_factors.iter().find(|f| f.id == selection.factor_id) else {
            tracing::debug!(factor_id = selection.factor_id, "Skipping selection for unknown factor");
            continue;
        };
        if !seen.insert(factor.id) {
            warnings.push(format!(
                "Factor '{}' was selected more than once; only the first selection counts",
                factor.name
            ));
            continue;
        }

        match &factor.kind {
            FactorKind::Select => {
                let Some(option_id) = selection.option_id else {
                    continue;
                };
                let Some(option) = factor_options
                    .iter()
                    .find(|o| o.id == option_id && o.factor_id == factor.id)
                else {
                    tracing::debug!(
                        factor_id = factor.id,
                        option_id,
                        "Skipping selection for unknown option"
                    );
                    continue;
                };
                let Some(impact) = to_decimal(option.price_impact) else {
                    warnings.push(format!(
                        "Option '{}' of '{}' has an invalid price impact; skipped",
                        option.label, factor.name
                    ));
                    continue;
                };
                resolved.push(ResolvedImpact {
                    factor,
                    label: option.label.clone(),
                    impact_type: option.price_impact_type,
                    impact,
                    units: None,
                });
            }
            FactorKind::Boolean {
                price_impact,
                price_impact_type,
            } => {
                if selection.value.and_then(|v| v.as_bool()) != Some(true) {
                    continue;
                }
                if !fixed_only(factor, *price_impact_type, warnings) {
                    continue;
                }
                let Some(impact) = to_decimal(*price_impact) else {
                    warnings.push(invalid_impact_warning(factor));
                    continue;
                };
                resolved.push(ResolvedImpact {
                    factor,
                    label: "Enabled".to_string(),
                    impact_type: PriceImpactType::Fixed,
                    impact,
                    units: None,
                });
            }
            FactorKind::Number {
                unit_price,
                price_impact_type,
            } => {
                let units = match selection.value {
                    Some(FactorValue::Number(n)) => match to_decimal(n) {
                        Some(units) => units,
                        None => {
                            warnings.push(format!(
                                "Factor '{}' has an unusable value ({}); skipped",
                                factor.name, n
                            ));
                            continue;
                        }
                    },
                    _ => continue,
                };
                if units.is_zero() || !fixed_only(factor, *price_impact_type, warnings) {
                    continue;
                }
                let Some(impact) = to_decimal(*unit_price) else {
                    warnings.push(invalid_impact_warning(factor));
                    continue;
                };
                resolved.push(ResolvedImpact {
                    factor,
                    label: units.normalize().to_string(),
                    impact_type: PriceImpactType::Fixed,
                    impact,
                    units: Some(units),
                });
            }
        }
    }

    resolved
}

/// Boolean and number factors only take part in the fixed stage.
fn fixed_only(
    factor: &PricingFactor,
    impact_type: PriceImpactType,
    warnings: &mut Vec<String>,
) -> bool {
    if impact_type == PriceImpactType::Fixed {
        return true;
    }
    warnings.push(format!(
        "Factor '{}' is a {} factor with a {} impact; only select factors support it",
        factor.name,
        factor.kind.type_name(),
        impact_type
    ));
    false
}

fn invalid_impact_warning(factor: &PricingFactor) -> String {
    format!("Factor '{}' has an invalid price impact; skipped", factor.name)
}

fn overflow_warning(r: &ResolvedImpact<'_>) -> String {
    format!(
        "'{}: {}' is too large to price; skipped",
        r.factor.name, r.label
    )
}

fn detail(r: &ResolvedImpact<'_>, amount: Decimal, description: String) -> FactorDetail {
    FactorDetail {
        factor_id: r.factor.id,
        factor_name: r.factor.name.clone(),
        option_label: r.label.clone(),
        stage: r.impact_type,
        impact: to_f64_exact(r.impact),
        amount: to_f64(amount),
        description,
    }
}

/// `+300.00` / `-12.50`
fn signed(amount: Decimal) -> String {
    let mut rounded = round_money(amount);
    rounded.rescale(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", rounded.abs())
    } else {
        format!("+{}", rounded.abs())
    }
}
