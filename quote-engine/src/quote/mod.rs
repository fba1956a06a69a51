//! Quotes
//!
//! - `calculator`: request → visible factors → price
//! - `types`: saved quotes, status lifecycle, revision history
//! - `render`: plain-text line items

mod calculator;
mod render;
mod types;

pub use calculator::{QuoteCalculation, QuoteRequest, calculate_quote};
pub use render::{render_breakdown, render_quote};
pub use types::{Quote, QuoteError, QuoteRevision, QuoteStatus};
