//! Dependency rule errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    #[error("Factor {0} not found")]
    FactorNotFound(i64),

    #[error("Controlling factor {0} not found")]
    ControllingFactorNotFound(i64),

    #[error(
        "Factor {factor_id} (service {factor_service}) cannot depend on factor {depends_on_factor_id} of service {controlling_service}"
    )]
    CrossService {
        factor_id: i64,
        factor_service: i64,
        depends_on_factor_id: i64,
        controlling_service: i64,
    },

    #[error("Factor {0} cannot depend on itself")]
    SelfReference(i64),

    #[error("Rule would create a circular dependency: {}", join_path(.path))]
    Cycle { path: Vec<i64> },
}

fn join_path(path: &[i64]) -> String {
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

impl DependencyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FactorNotFound(_) => ErrorCode::DependencyFactorNotFound,
            Self::ControllingFactorNotFound(_) => ErrorCode::ControllingFactorNotFound,
            Self::CrossService { .. } => ErrorCode::DependencyCrossService,
            Self::SelfReference(_) => ErrorCode::DependencySelfReference,
            Self::Cycle { .. } => ErrorCode::DependencyCycle,
        }
    }
}

impl From<DependencyError> for AppError {
    fn from(err: DependencyError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            DependencyError::FactorNotFound(id) => app.with_detail("factor_id", id),
            DependencyError::ControllingFactorNotFound(id) => {
                app.with_detail("depends_on_factor_id", id)
            }
            DependencyError::CrossService {
                factor_service,
                controlling_service,
                ..
            } => app
                .with_detail("factor_service", factor_service)
                .with_detail("controlling_service", controlling_service),
            DependencyError::SelfReference(id) => app.with_detail("factor_id", id),
            DependencyError::Cycle { path } => app.with_detail("path", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_and_details() {
        let err = DependencyError::Cycle {
            path: vec![1, 2, 3, 1],
        };
        assert_eq!(
            err.to_string(),
            "Rule would create a circular dependency: 1 → 2 → 3 → 1"
        );

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::DependencyCycle);
        let details = app.details.unwrap();
        assert_eq!(details["path"], serde_json::json!([1, 2, 3, 1]));
    }
}
