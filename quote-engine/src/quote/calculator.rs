//! Quote calculation
//!
//! Runs the full control flow against a catalog: resolve visible factors,
//! restrict selections to them, check required factors, price.

use crate::catalog::Catalog;
use crate::dependency::{get_visible_factors, selection_map};
use crate::pricing::{
    CalculationResult, RequiredFactorsCheck, calculate_price, validate_required_factors,
};
use serde::{Deserialize, Serialize};
use shared::models::id::{deserialize_id, deserialize_id_list, deserialize_opt_id};
use shared::models::{Addon, FactorKind, SelectedFactor};
use std::collections::HashSet;

/// What the calculator form submits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub service_id: i64,
    #[serde(default)]
    pub selected_factors: Vec<SelectedFactor>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub entity_type_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_id_list")]
    pub addon_ids: Vec<i64>,
}

impl QuoteRequest {
    pub fn new(service_id: i64) -> Self {
        Self {
            service_id,
            selected_factors: vec![],
            entity_type_id: None,
            addon_ids: vec![],
        }
    }
}

/// Priced request, with the selections that were actually applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteCalculation {
    /// Request as priced: hidden and stale selections removed
    pub request: QuoteRequest,
    pub visible_factor_ids: Vec<i64>,
    pub required: RequiredFactorsCheck,
    pub result: CalculationResult,
}

impl QuoteCalculation {
    /// Priced and every required visible factor answered
    pub fn is_ready(&self) -> bool {
        self.result.is_valid && self.required.is_valid
    }

    pub fn total_price(&self) -> f64 {
        self.result.total_price
    }
}

/// Price a request against the catalog.
///
/// Unknown entity types and unknown or unavailable add-ons are dropped with
/// a warning in `result.warnings`.
pub fn calculate_quote(catalog: &Catalog, request: &QuoteRequest) -> QuoteCalculation {
    let mut warnings = Vec::new();
    let service = catalog.service(request.service_id);
    let factors = catalog.factors_for_service(request.service_id);
    let rules = catalog.rules_for_service(request.service_id);

    // Drop selections for other services' factors and for options that no longer exist
    let mut selections: Vec<SelectedFactor> = request
        .selected_factors
        .iter()
        .filter(|s| {
            let Some(factor) = factors.iter().find(|f| f.id == s.factor_id) else {
                tracing::debug!(factor_id = s.factor_id, "Dropping selection for unknown factor");
                return false;
            };
            match (&factor.kind, s.option_id) {
                (FactorKind::Select, Some(option_id)) => catalog
                    .options
                    .iter()
                    .any(|o| o.id == option_id && o.factor_id == factor.id),
                _ => true,
            }
        })
        .cloned()
        .collect();

    // Hiding a controller can hide its dependents, so repeat until stable
    let visible = loop {
        let current = selection_map(&selections);
        let visible = get_visible_factors(factors.iter().copied(), &rules, &current);
        let before = selections.len();
        selections.retain(|s| visible.iter().any(|f| f.id == s.factor_id));
        if selections.len() == before {
            break visible;
        }
    };

    let required = validate_required_factors(&visible, &selections);

    let entity_type = request.entity_type_id.and_then(|id| {
        let found = catalog.entity_type(id);
        if found.is_none() {
            warnings.push(format!("Entity type {} not found; no modifier applied", id));
        }
        found
    });

    let mut seen = HashSet::new();
    let mut addons: Vec<Addon> = Vec::with_capacity(request.addon_ids.len());
    let mut addon_ids = Vec::with_capacity(request.addon_ids.len());
    for &id in &request.addon_ids {
        if !seen.insert(id) {
            continue;
        }
        match catalog.addon(id) {
            None => warnings.push(format!("Add-on {} not found; skipped", id)),
            Some(addon) if !addon.is_available_for(request.service_id) => warnings.push(format!(
                "Add-on '{}' is not offered for this service; skipped",
                addon.name
            )),
            Some(addon) => {
                addons.push(addon.clone());
                addon_ids.push(id);
            }
        }
    }

    let mut result = calculate_price(
        service,
        &selections,
        &catalog.options,
        &catalog.factors,
        entity_type,
        &addons,
    );
    if !warnings.is_empty() {
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
    }

    tracing::debug!(
        service_id = request.service_id,
        visible = visible.len(),
        applied = selections.len(),
        total = result.total_price,
        ready = result.is_valid && required.is_valid,
        "Quote calculated"
    );

    QuoteCalculation {
        request: QuoteRequest {
            service_id: request.service_id,
            selected_factors: selections,
            entity_type_id: entity_type.map(|e| e.id),
            addon_ids,
        },
        visible_factor_ids: visible.iter().map(|f| f.id).collect(),
        required,
        result,
    }
}
