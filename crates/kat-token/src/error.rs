use thiserror::Error;

/// Token encoding and unit conversion errors.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}
