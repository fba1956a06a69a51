//! Quote Engine - 会计服务报价引擎
//!
//! # 架构概述
//!
//! Prices accounting services from a configurable catalog:
//!
//! - **依赖解析** (`dependency`): conditional factor visibility, rule validation, cycle detection
//! - **定价** (`pricing`): six-stage price pipeline with itemized breakdown
//! - **目录** (`catalog`): catalog loading, lookups and validation
//! - **报价** (`quote`): end-to-end calculation, saved quotes and revisions
//! - **审计** (`audit`): hash-chained audit trail
//!
//! # 模块结构
//!
//! ```text
//! quote-engine/src/
//! ├── core/          # 配置
//! ├── common/        # 日志
//! ├── dependency/    # 依赖规则
//! ├── pricing/       # 价格计算
//! ├── catalog/       # 目录
//! ├── quote/         # 报价
//! └── audit/         # 审计
//! ```

pub mod audit;
pub mod catalog;
pub mod common;
pub mod core;
pub mod dependency;
pub mod pricing;
pub mod quote;

// Re-export 公共类型
pub use catalog::{Catalog, CatalogError, CatalogIssue};
pub use crate::core::Config;
pub use dependency::{DependencyError, detect_cycle, get_visible_factors, is_visible, validate_rule};
pub use pricing::{CalculationResult, PriceBreakdown, PricingError, calculate_price};
pub use quote::{Quote, QuoteCalculation, QuoteError, QuoteRequest, calculate_quote};

// Re-export logger functions
pub use common::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 设置运行环境 (日志)
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())
}
