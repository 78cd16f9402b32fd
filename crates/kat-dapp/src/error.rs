use kat_token::error::TokenError;
use thiserror::Error;

use crate::provider::{ProviderError, FALLBACK_FAILURE_MESSAGE};

/// Errors produced by dapp actions before they are mapped to notifications.
#[derive(Debug, Error)]
pub enum DappError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Token(#[from] TokenError),

    /// The transaction was mined but its execution failed, and the receipt
    /// carries no reason.
    #[error("transaction {0} reverted")]
    Reverted(String),
}

impl DappError {
    /// Returns the best available human-readable failure message, following
    /// the same priority as [`ProviderError::user_message`].
    pub fn user_message(&self) -> String {
        match self {
            DappError::Provider(err) => err.user_message(),
            DappError::Token(err) => err.to_string(),
            DappError::Reverted(_) => FALLBACK_FAILURE_MESSAGE.to_string(),
        }
    }
}
