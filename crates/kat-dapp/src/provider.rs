//! The wallet provider boundary.
//!
//! Everything the dapp needs from the outside world goes through
//! [`WalletProvider`]: account authorization, read-only contract calls,
//! transaction submission, and account/network change notifications.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Fixed fallback shown when no better failure message is available.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Transaction failed. Please try again.";

/// A change notification pushed by the wallet provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// The authorized account list changed; the first entry is the new
    /// active account.
    AccountsChanged(Vec<String>),
    /// The wallet switched to a different network.
    ChainChanged(String),
}

/// Receiving end of a provider event subscription.
pub type EventReceiver = mpsc::UnboundedReceiver<WalletEvent>;

/// The observed fields of a mined transaction receipt.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub tx_hash: String,
    /// `true` if the transaction executed successfully.
    pub status: bool,
    /// Set only for contract creation transactions.
    pub contract_address: Option<String>,
}

/// A structured provider error object, as delivered by JSON-RPC error
/// responses and wallet extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpcErrorObject {
    pub code: i64,
    /// The generic error message.
    pub message: Option<String>,
    /// A more specific message nested under the error's `data` field.
    pub data_message: Option<String>,
    /// A contract revert reason, when one could be decoded.
    pub reason: Option<String>,
}

impl fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same priority as `ProviderError::user_message`, so logs and
        // notifications tell the same story.
        let msg = self
            .data_message
            .as_deref()
            .or(self.message.as_deref())
            .or(self.reason.as_deref())
            .unwrap_or("unknown error");
        write!(f, "code {}: {}", self.code, msg)
    }
}

/// Wallet provider operation errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The user rejected the authorization prompt, or no account was made
    /// available.
    #[error("wallet authorization denied")]
    AuthorizationDenied,

    /// The provider could not be reached or returned an unreadable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a structured error object.
    #[error("rpc error: {0}")]
    Rpc(RpcErrorObject),
}

impl ProviderError {
    /// Returns the best available human-readable failure message.
    ///
    /// For structured errors the priority is: the nested data message, then
    /// the generic message, then the revert reason, then
    /// [`FALLBACK_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::Rpc(err) => err
                .data_message
                .clone()
                .or_else(|| err.message.clone())
                .or_else(|| err.reason.clone())
                .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string()),
            other => other.to_string(),
        }
    }
}

/// The external wallet/network boundary.
///
/// Implementations delegate all heavy lifting (key management, signing,
/// chain state) to a wallet extension or node; the dapp core only issues
/// requests and awaits their settlement. No timeouts are applied here: a
/// hung provider call hangs the affected action.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Requests account authorization, prompting the user if needed.
    /// Idempotent once authorized.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Executes a read-only contract call and returns the raw return data.
    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ProviderError>;

    /// Asks the provider to sign and broadcast a transaction from the
    /// authorized account. `to: None` denotes contract creation. Returns the
    /// transaction hash.
    async fn send_transaction(
        &self,
        from: &str,
        to: Option<&str>,
        data: Vec<u8>,
    ) -> Result<String, ProviderError>;

    /// Blocks until the transaction has exactly one confirmation and returns
    /// its receipt.
    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<TxReceipt, ProviderError>;

    /// Registers a listener for account and network change notifications.
    fn subscribe(&self) -> EventReceiver;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc_err(
        message: Option<&str>,
        data_message: Option<&str>,
        reason: Option<&str>,
    ) -> ProviderError {
        ProviderError::Rpc(RpcErrorObject {
            code: -32000,
            message: message.map(String::from),
            data_message: data_message.map(String::from),
            reason: reason.map(String::from),
        })
    }

    #[test]
    fn user_message_prefers_data_message() {
        let err = rpc_err(Some("generic"), Some("structured"), Some("reverted"));
        assert_eq!(err.user_message(), "structured");
    }

    #[test]
    fn user_message_falls_back_to_generic_message() {
        let err = rpc_err(Some("generic"), None, Some("reverted"));
        assert_eq!(err.user_message(), "generic");
    }

    #[test]
    fn user_message_falls_back_to_revert_reason() {
        let err = rpc_err(None, None, Some("reverted"));
        assert_eq!(err.user_message(), "reverted");
    }

    #[test]
    fn user_message_falls_back_to_fixed_string() {
        let err = rpc_err(None, None, None);
        assert_eq!(err.user_message(), FALLBACK_FAILURE_MESSAGE);
    }

    #[test]
    fn display_follows_the_same_priority_as_user_message() {
        let err = rpc_err(Some("generic"), Some("structured"), Some("reverted"));
        assert_eq!(err.to_string(), "rpc error: code -32000: structured");

        let err = rpc_err(Some("generic"), None, None);
        assert_eq!(err.to_string(), "rpc error: code -32000: generic");

        let err = rpc_err(None, None, None);
        assert_eq!(err.to_string(), "rpc error: code -32000: unknown error");
    }

    #[test]
    fn user_message_for_denied_authorization() {
        let err = ProviderError::AuthorizationDenied;
        assert_eq!(err.user_message(), "wallet authorization denied");
    }

    #[test]
    fn user_message_for_transport_error() {
        let err = ProviderError::Transport("connection refused".into());
        assert_eq!(err.user_message(), "transport error: connection refused");
    }
}
