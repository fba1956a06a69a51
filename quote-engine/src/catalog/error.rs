//! Catalog errors

use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One problem found by [`Catalog::validate`](super::Catalog::validate)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIssue {
    /// Table the offending record lives in (`services`, `factors`, ...)
    pub table: String,
    pub id: i64,
    pub message: String,
}

impl CatalogIssue {
    pub fn new(table: &str, id: i64, message: impl Into<String>) -> Self {
        Self {
            table: table.to_string(),
            id,
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}: {}", self.table, self.id, self.message)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog has {} issue(s), first: {}", .0.len(), first_issue(.0))]
    Invalid(Vec<CatalogIssue>),
}

fn first_issue(issues: &[CatalogIssue]) -> String {
    issues
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::CatalogReadFailed,
            Self::Parse(_) => ErrorCode::CatalogParseFailed,
            Self::Invalid(_) => ErrorCode::CatalogInvalid,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            CatalogError::Io { path, .. } => app.with_detail("path", path.display().to_string()),
            CatalogError::Invalid(issues) => app.with_detail(
                "issues",
                issues.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ),
            CatalogError::Parse(_) => app,
        }
    }
}
