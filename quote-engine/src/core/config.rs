//! 配置 - 报价引擎的所有配置项
//!
//! # 环境变量
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | ENVIRONMENT | development | 运行环境 |
//! | LOG_LEVEL | info | 日志级别 |
//! | LOG_JSON | false (production: true) | JSON 日志 |
//! | LOG_DIR | (unset) | 日志目录，未设置时只输出到控制台 |
//! | CATALOG_PATH | ./catalog.json | 目录文件 |
//! | CURRENCY_SYMBOL | $ | 货币符号 |
//! | STRICT_CATALOG | false (production: true) | 目录校验失败时拒绝运行 |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub catalog_path: PathBuf,
    pub currency_symbol: String,
    /// Refuse to price against a catalog with validation issues
    pub strict_catalog: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let production = environment == "production";

        Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(production),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            catalog_path: std::env::var("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./catalog.json")),
            currency_symbol: std::env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "$".into()),
            strict_catalog: std::env::var("STRICT_CATALOG")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(production),
            environment,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
