//! User-visible notifications.
//!
//! Every terminal outcome of a user action produces exactly one
//! [`Notification`]; the host UI decides how to render them (toasts, console,
//! test recorder).

use std::sync::{Mutex, PoisonError};

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// No wallet provider is available; the user must install one.
    WalletMissing,
    /// Resolving the account or balance failed.
    LoadFailed(String),
    /// Local validation of a transfer request failed; nothing was submitted.
    InvalidTransfer(String),
    /// A transfer was mined successfully.
    TransferSubmitted { tx_hash: String },
    /// A transfer failed, with the best available reason.
    TransferFailed(String),
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn push(&self, notification: Notification);
}

/// Notifier that emits through `tracing`, for hosts without a toast surface.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn push(&self, notification: Notification) {
        match &notification {
            Notification::TransferSubmitted { tx_hash } => {
                tracing::info!(%tx_hash, "transaction successful");
            }
            Notification::WalletMissing => {
                tracing::error!("no wallet provider available, please install one");
            }
            Notification::LoadFailed(reason) => {
                tracing::error!(%reason, "failed to load blockchain data");
            }
            Notification::InvalidTransfer(reason) => {
                tracing::warn!(%reason, "transfer request rejected");
            }
            Notification::TransferFailed(reason) => {
                tracing::error!(%reason, "transaction failed");
            }
        }
    }
}

/// Notifier that records everything it receives, in order.
///
/// Used by tests and by embedders that drain notifications into their own UI.
#[derive(Default)]
pub struct MemoryNotifier {
    inner: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all notifications pushed so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns all recorded notifications.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for MemoryNotifier {
    fn push(&self, notification: Notification) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
