//! Saved quotes and their revision history

use super::calculator::{QuoteCalculation, QuoteRequest};
use crate::pricing::PriceBreakdown;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::types::Timestamp;
use shared::util::{now_millis, snowflake_id};
use std::fmt;
use thiserror::Error;

/// Quote lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }

    /// Draft → Sent → Accepted / Rejected; any open quote may expire
    pub fn can_transition_to(self, next: QuoteStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Sent)
                | (Self::Draft, Self::Expired)
                | (Self::Sent, Self::Accepted)
                | (Self::Sent, Self::Rejected)
                | (Self::Sent, Self::Expired)
        )
    }

    /// Whether the quote may still be re-priced
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Sent)
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("Calculation is not valid: {}", .0.join("; "))]
    NotPriced(Vec<String>),

    #[error("Required factors missing: {}", .0.join(", "))]
    RequiredFactorsMissing(Vec<String>),

    #[error("Quote is {0} and can no longer be revised")]
    NotEditable(QuoteStatus),

    #[error("Cannot change quote status from {from} to {to}")]
    InvalidTransition { from: QuoteStatus, to: QuoteStatus },

    #[error("Revision {0} not found")]
    RevisionNotFound(u32),
}

impl QuoteError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotPriced(_) => ErrorCode::QuoteNotPriced,
            Self::RequiredFactorsMissing(_) => ErrorCode::RequiredFactorMissing,
            Self::NotEditable(_) => ErrorCode::QuoteNotEditable,
            Self::InvalidTransition { .. } => ErrorCode::QuoteInvalidTransition,
            Self::RevisionNotFound(_) => ErrorCode::QuoteRevisionNotFound,
        }
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            QuoteError::RequiredFactorsMissing(names) => app.with_detail("missing", names),
            QuoteError::NotPriced(errors) => app.with_detail("errors", errors),
            QuoteError::InvalidTransition { from, to } => app
                .with_detail("from", from.as_str())
                .with_detail("to", to.as_str()),
            QuoteError::NotEditable(status) => app.with_detail("status", status.as_str()),
            QuoteError::RevisionNotFound(version) => app.with_detail("version", version),
        }
    }
}

/// Frozen copy of one priced version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRevision {
    pub version: u32,
    pub created_at: Timestamp,
    pub request: QuoteRequest,
    pub breakdown: PriceBreakdown,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl QuoteRevision {
    fn from_calculation(version: u32, calc: &QuoteCalculation, note: Option<String>) -> Self {
        Self {
            version,
            created_at: now_millis(),
            request: calc.request.clone(),
            breakdown: calc.result.breakdown.clone(),
            total_price: calc.result.total_price,
            note,
        }
    }
}

/// Saved quote
///
/// The current version is always the last entry of `revisions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    /// Display number: `QT{YYYYMMDD}{sequence}`
    pub quote_number: String,
    pub client_name: String,
    pub service_id: i64,
    pub service_name: String,
    pub status: QuoteStatus,
    pub version: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub revisions: Vec<QuoteRevision>,
}

fn ensure_priced(calc: &QuoteCalculation) -> Result<(), QuoteError> {
    if !calc.result.is_valid {
        return Err(QuoteError::NotPriced(calc.result.errors.clone()));
    }
    if !calc.required.is_valid {
        return Err(QuoteError::RequiredFactorsMissing(
            calc.required.missing_factor_names.clone(),
        ));
    }
    Ok(())
}

impl Quote {
    /// Save a ready calculation as version 1.
    ///
    /// `sequence` is the caller's running quote counter.
    pub fn create(
        client_name: impl Into<String>,
        service_name: impl Into<String>,
        calc: &QuoteCalculation,
        sequence: u64,
    ) -> Result<Self, QuoteError> {
        ensure_priced(calc)?;
        let now = now_millis();
        let date_str = chrono::Utc::now().format("%Y%m%d").to_string();
        let quote = Self {
            id: snowflake_id(),
            quote_number: format!("QT{}{}", date_str, 10000 + sequence),
            client_name: client_name.into(),
            service_id: calc.request.service_id,
            service_name: service_name.into(),
            status: QuoteStatus::Draft,
            version: 1,
            created_at: now,
            updated_at: now,
            revisions: vec![QuoteRevision::from_calculation(1, calc, None)],
        };
        tracing::info!(
            quote_id = quote.id,
            quote_number = %quote.quote_number,
            total = calc.result.total_price,
            "Quote created"
        );
        Ok(quote)
    }

    /// Current revision
    pub fn current(&self) -> Option<&QuoteRevision> {
        self.revisions.last()
    }

    pub fn total_price(&self) -> f64 {
        self.current().map(|r| r.total_price).unwrap_or_default()
    }

    pub fn revision(&self, version: u32) -> Result<&QuoteRevision, QuoteError> {
        self.revisions
            .iter()
            .find(|r| r.version == version)
            .ok_or(QuoteError::RevisionNotFound(version))
    }

    /// Re-price the quote as a new version. Earlier versions are kept.
    ///
    /// `service_name` names the calculation's service, which may differ from
    /// the one quoted so far.
    pub fn revise(
        &mut self,
        calc: &QuoteCalculation,
        service_name: impl Into<String>,
        note: Option<String>,
    ) -> Result<&QuoteRevision, QuoteError> {
        if !self.status.is_editable() {
            return Err(QuoteError::NotEditable(self.status));
        }
        ensure_priced(calc)?;

        let previous_total = self.total_price();
        self.version += 1;
        self.service_id = calc.request.service_id;
        self.service_name = service_name.into();
        let revision = QuoteRevision::from_calculation(self.version, calc, note);
        self.updated_at = revision.created_at;
        self.revisions.push(revision);

        tracing::info!(
            quote_id = self.id,
            version = self.version,
            service_id = self.service_id,
            previous_total,
            total = calc.result.total_price,
            "Quote revised"
        );
        self.revision(self.version)
    }

    pub fn transition(&mut self, next: QuoteStatus) -> Result<(), QuoteError> {
        if !self.status.can_transition_to(next) {
            return Err(QuoteError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        tracing::info!(quote_id = self.id, from = %self.status, to = %next, "Quote status changed");
        self.status = next;
        self.updated_at = now_millis();
        Ok(())
    }
}
