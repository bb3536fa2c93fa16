use thiserror::Error;

#[derive(Debug, Error)]
pub enum DoraError {
    #[error("invalid {field} '{value}': must be one of {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DoraError>;
