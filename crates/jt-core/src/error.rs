use thiserror::Error;

#[derive(Error, Debug)]
pub enum TruncateError {
    #[error("Invalid configuration: {field} {reason}")]
    Configuration { field: &'static str, reason: String },
    #[error("Encoding error: {cause}")]
    Encoding { cause: String },
    #[error("Nesting deeper than {limit} levels")]
    DepthExceeded { limit: usize },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TruncateError {
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration { field, reason: reason.into() }
    }

    pub fn encoding(cause: impl Into<String>) -> Self {
        Self::Encoding { cause: cause.into() }
    }

    /// The configuration field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Configuration { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TruncateError>;
