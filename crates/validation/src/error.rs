use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A single field that failed its declared constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Why a candidate write was refused.
///
/// Callers fix the payload on `Structural`, correct the request on
/// `BusinessRule`, and reload then retry on `Conflict`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid fields: {}", join_violations(.0))]
    Structural(Vec<FieldViolation>),

    #[error("invalid operation: {0}")]
    BusinessRule(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl ValidationError {
    pub fn rule(reason: impl Into<String>) -> Self {
        Self::BusinessRule(reason.into())
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict(reason.into())
    }

    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Structural(vec![FieldViolation {
            field,
            message: message.into(),
        }])
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }

    pub fn is_business_rule(&self) -> bool {
        matches!(self, Self::BusinessRule(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// The offending field names of a structural failure
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::Structural(violations) => violations.iter().map(|v| v.field).collect(),
            _ => vec![],
        }
    }
}
