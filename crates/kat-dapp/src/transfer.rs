//! Transfer submission: local validation, a single in-flight request, and
//! failure-to-notification mapping.

use std::sync::Arc;

use kat_token::{erc20, units};

use crate::config::DappConfig;
use crate::error::DappError;
use crate::notify::{Notification, Notifier};
use crate::provider::{ProviderError, WalletProvider};

/// Submits ERC-20 transfers through the wallet provider.
///
/// At most one submission is in flight at a time; the in-flight flag exists
/// to disable the submit control during one outstanding request and is
/// cleared on every terminal outcome.
pub struct TransferSubmitter {
    provider: Option<Arc<dyn WalletProvider>>,
    config: DappConfig,
    notifier: Arc<dyn Notifier>,
    in_flight: bool,
}

impl TransferSubmitter {
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        config: DappConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            config,
            notifier,
            in_flight: false,
        }
    }

    /// `true` while a submission is awaiting its confirmation.
    pub fn is_processing(&self) -> bool {
        self.in_flight
    }

    /// Validates and submits one transfer, awaiting exactly one
    /// confirmation.
    ///
    /// Empty recipient or amount is rejected locally with a validation
    /// notification and no provider calls. Every terminal outcome produces
    /// exactly one notification: success carries the transaction hash,
    /// failure carries the best available reason.
    pub async fn submit(&mut self, recipient: &str, amount: &str) {
        if self.in_flight {
            return;
        }

        if recipient.trim().is_empty() || amount.trim().is_empty() {
            self.notifier.push(Notification::InvalidTransfer(
                "Please provide both recipient address and amount.".to_string(),
            ));
            return;
        }

        let Some(provider) = self.provider.clone() else {
            self.notifier.push(Notification::WalletMissing);
            return;
        };

        self.in_flight = true;
        let result = self.send(provider.as_ref(), recipient, amount).await;
        self.in_flight = false;

        match result {
            Ok(tx_hash) => {
                self.notifier.push(Notification::TransferSubmitted { tx_hash });
            }
            Err(err) => {
                tracing::error!(error = %err, "transaction failed");
                self.notifier
                    .push(Notification::TransferFailed(err.user_message()));
            }
        }
    }

    async fn send(
        &self,
        provider: &dyn WalletProvider,
        recipient: &str,
        amount: &str,
    ) -> Result<String, DappError> {
        // Re-request authorization; idempotent if already granted.
        let accounts = provider.request_accounts().await?;
        let from = accounts
            .into_iter()
            .next()
            .ok_or(ProviderError::AuthorizationDenied)?;

        let base_units = units::parse_units(amount, self.config.decimals)?;
        let calldata = erc20::encode_transfer(recipient, base_units)?;

        let tx_hash = provider
            .send_transaction(&from, Some(&self.config.token_address), calldata)
            .await?;

        let receipt = provider.wait_for_receipt(&tx_hash).await?;
        if !receipt.status {
            return Err(DappError::Reverted(receipt.tx_hash));
        }

        Ok(tx_hash)
    }
}
