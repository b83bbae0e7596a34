use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MotpError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid timestamp {0}: unix seconds must be non-negative")]
    InvalidTimestamp(i64),
}

pub type Result<T> = std::result::Result<T, MotpError>;
