use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkshopError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Keychain error: {0}")]
    Keychain(String),
}

impl WorkshopError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<WorkshopError> for String {
    fn from(err: WorkshopError) -> Self {
        err.to_string()
    }
}

/// Failure modes of the external serviceability calculation.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("Invalid calculation endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Application rejected by calculation service: {0}")]
    Validation(String),

    #[error("Calculation service timed out after {0}s")]
    Timeout(u64),

    #[error("Calculation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Calculation request failed: {0}")]
    Transport(String),

    #[error("Failed to decode calculation result: {0}")]
    Decode(String),
}
