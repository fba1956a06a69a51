//! Dependency Resolver
//!
//! Conditional factor visibility and rule validation.
//!
//! - `resolver`: visibility of factors for the current selections
//! - `cycle`: cycle detection over `factor_id → depends_on_factor_id` edges
//! - `validation`: pre-insert checks for new or edited rules

mod cycle;
mod error;
mod resolver;
mod validation;

pub use cycle::{CycleReport, detect_cycle, find_all_cycles};
pub use error::DependencyError;
pub use resolver::{
    SelectionMap, effective_rule_set, effective_rules, get_visible_factors, is_visible,
    legacy_rule, rule_holds, selection_map,
};
pub use validation::{RuleValidation, check_rule, validate_rule};
