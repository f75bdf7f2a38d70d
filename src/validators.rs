use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod movie;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    InvalidType,
    Required,
    TooSmall,
    TooBig,
    InvalidEnumValue,
    InvalidUrl,
}

/// One field-level problem in a request body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: String,
    pub code: ViolationCode,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            code,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} field violation(s)", violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

#[cfg(test)]
impl ValidationError {
    pub fn has_violation(&self, field: &str, code: ViolationCode) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.field == field && violation.code == code)
    }
}
