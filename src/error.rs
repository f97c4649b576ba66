use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Stored value is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] reqwest::Error),

    #[error("No product found for barcode '{code}'")]
    ProductNotFound { code: String },
}

impl AppError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the error came from user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
