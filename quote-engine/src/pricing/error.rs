//! Pricing errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Ways the pricing pipeline itself can fail
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Service not found")]
    ServiceNotFound,

    #[error("Invalid base price for service '{service}': {base_price}")]
    InvalidBasePrice { service: String, base_price: f64 },

    #[error("Price overflowed at the {stage} stage")]
    Overflow { stage: &'static str },
}

impl PricingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ServiceNotFound => ErrorCode::ServiceNotFound,
            Self::InvalidBasePrice { .. } => ErrorCode::InvalidBasePrice,
            Self::Overflow { .. } => ErrorCode::PriceOverflow,
        }
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        let code = err.code();
        let app = AppError::with_message(code, err.to_string());
        match err {
            PricingError::InvalidBasePrice { base_price, .. } => {
                app.with_detail("base_price", base_price.to_string())
            }
            PricingError::Overflow { stage } => app.with_detail("stage", stage),
            PricingError::ServiceNotFound => app,
        }
    }
}
