use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinancingError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FinancingError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FinancingError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the input that failed validation, if this is a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            FinancingError::InvalidInput { field, .. } => Some(field),
            FinancingError::Serialization(_) => None,
        }
    }
}

impl From<serde_json::Error> for FinancingError {
    fn from(e: serde_json::Error) -> Self {
        FinancingError::Serialization(e.to_string())
    }
}
