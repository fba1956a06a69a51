//! Pricing Engine
//!
//! - `engine`: six-stage price pipeline
//! - `required`: required factor check
//! - `money`: Decimal conversion, rounding and formatting

mod breakdown;
mod engine;
mod error;
pub mod money;
mod required;

pub use breakdown::{
    AddonDetail, CalculationResult, FactorDetail, ImpactStage, PriceBreakdown,
    RequiredFactorsCheck,
};
pub use engine::{calculate_price, price_breakdown};
pub use error::PricingError;
pub use required::validate_required_factors;
