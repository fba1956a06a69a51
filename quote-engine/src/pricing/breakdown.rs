//! Calculation result types
//!
//! The breakdown is rendered verbatim by saved quotes, audit entries and
//! exports, so every line item carries its own human-readable description.

use serde::{Deserialize, Serialize};
use shared::models::PriceImpactType;

/// Pipeline stage a factor contributed to
pub type ImpactStage = PriceImpactType;

/// One contributing factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorDetail {
    pub factor_id: i64,
    pub factor_name: String,
    /// Option label, "Enabled" for boolean factors, "<n> × unit" for number factors
    pub option_label: String,
    pub stage: ImpactStage,
    /// Raw configured impact (amount, fraction or multiplier)
    pub impact: f64,
    /// Money contributed by this line (0 for multipliers)
    pub amount: f64,
    pub description: String,
}

/// One selected add-on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddonDetail {
    pub addon_id: i64,
    pub name: String,
    pub price: f64,
}

/// Itemized price breakdown (价格明细)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub fixed_impacts_total: f64,
    pub percentage_impacts_total: f64,
    pub subtotal_before_multipliers: f64,
    /// Combined factor multiplier (3 dp)
    pub multiplier_effect: f64,
    pub subtotal_after_multipliers: f64,
    pub entity_type_multiplier: f64,
    pub subtotal_after_entity_type: f64,
    pub addons_total: f64,
    pub final_price: f64,
    pub factor_details: Vec<FactorDetail>,
    pub addon_details: Vec<AddonDetail>,
}

impl Default for PriceBreakdown {
    fn default() -> Self {
        Self {
            base_price: 0.0,
            fixed_impacts_total: 0.0,
            percentage_impacts_total: 0.0,
            subtotal_before_multipliers: 0.0,
            multiplier_effect: 1.0,
            subtotal_after_multipliers: 0.0,
            entity_type_multiplier: 1.0,
            subtotal_after_entity_type: 0.0,
            addons_total: 0.0,
            final_price: 0.0,
            factor_details: vec![],
            addon_details: vec![],
        }
    }
}

impl PriceBreakdown {
    /// Factor lines of one stage, in contribution order
    pub fn details_for(&self, stage: ImpactStage) -> impl Iterator<Item = &FactorDetail> {
        self.factor_details.iter().filter(move |d| d.stage == stage)
    }
}

/// Result of [`calculate_price`](super::calculate_price)
///
/// Failures are data: `is_valid = false` with messages in `errors`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub total_price: f64,
    pub breakdown: PriceBreakdown,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CalculationResult {
    /// Zeroed, invalid result carrying one error
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            total_price: 0.0,
            breakdown: PriceBreakdown::default(),
            is_valid: false,
            errors: vec![error.into()],
            warnings: vec![],
        }
    }
}

/// Result of [`validate_required_factors`](super::validate_required_factors)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequiredFactorsCheck {
    pub is_valid: bool,
    pub missing_factor_names: Vec<String>,
}
