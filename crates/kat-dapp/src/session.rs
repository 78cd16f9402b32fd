//! Wallet session management: account and balance resolution plus the
//! account/network change subscription lifecycle.

use std::sync::Arc;

use kat_token::{erc20, units};

use crate::config::DappConfig;
use crate::error::DappError;
use crate::notify::{Notification, Notifier};
use crate::provider::{EventReceiver, WalletEvent, WalletProvider};

/// The displayed wallet state. Replaced wholesale on every account change,
/// discarded with the owning component.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Option<String>,
    /// Human-readable token balance at the configured decimal scale.
    pub balance: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            account: None,
            balance: "0".to_string(),
        }
    }
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.account.is_none()
    }
}

/// Resolves the active account and token balance through the wallet
/// provider, and reacts to account/network change notifications.
///
/// A `None` provider models a missing wallet extension: every load then
/// produces a single install-wallet notification and the session stays
/// empty.
pub struct SessionManager {
    provider: Option<Arc<dyn WalletProvider>>,
    config: DappConfig,
    notifier: Arc<dyn Notifier>,
    session: Session,
    events: Option<EventReceiver>,
}

impl SessionManager {
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        config: DappConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            provider,
            config,
            notifier,
            session: Session::default(),
            events: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the full resolution flow: authorize, resolve the active account,
    /// query and format its token balance.
    ///
    /// Any failure is converted into exactly one notification; the session
    /// keeps its previous contents on failure and stays empty on first load.
    pub async fn load(&mut self) {
        let Some(provider) = self.provider.clone() else {
            self.notifier.push(Notification::WalletMissing);
            return;
        };

        if let Err(err) = self.resolve(provider.as_ref()).await {
            tracing::error!(error = %err, "error loading blockchain data");
            self.notifier.push(Notification::LoadFailed(err.user_message()));
        }
    }

    async fn resolve(&mut self, provider: &dyn WalletProvider) -> Result<(), DappError> {
        let accounts = provider.request_accounts().await?;
        let account = accounts
            .into_iter()
            .next()
            .ok_or(crate::provider::ProviderError::AuthorizationDenied)?;

        let calldata = erc20::encode_balance_of(&account)?;
        let ret = provider.call(&self.config.token_address, calldata).await?;
        let raw_balance = erc20::decode_uint256(&ret)?;

        self.session.balance = units::format_units(raw_balance, self.config.decimals);
        self.session.account = Some(account);
        Ok(())
    }

    /// Subscribes to provider change notifications. Idempotent: a second
    /// attach without a detach keeps the existing registration.
    pub fn attach(&mut self) {
        if self.events.is_some() {
            return;
        }
        if let Some(provider) = &self.provider {
            self.events = Some(provider.subscribe());
        }
    }

    /// Drops the event subscription. Safe to call when not attached.
    pub fn detach(&mut self) {
        self.events = None;
    }

    pub fn is_attached(&self) -> bool {
        self.events.is_some()
    }

    /// Dispatches a single provider notification.
    ///
    /// An account change with a non-empty account list re-runs the entire
    /// resolution flow. A network change is logged only; the displayed
    /// balance is deliberately left as-is.
    pub async fn handle_event(&mut self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => {
                let Some(account) = accounts.first() else {
                    return;
                };
                tracing::info!(account = %account, "active account changed");
                self.load().await;
            }
            WalletEvent::ChainChanged(chain_id) => {
                tracing::info!(%chain_id, "network changed");
            }
        }
    }

    /// Drains the attached event receiver, dispatching each notification in
    /// order. Returns when detached or when the provider closes the channel.
    pub async fn run(&mut self) {
        loop {
            let event = match self.events.as_mut() {
                Some(receiver) => receiver.recv().await,
                None => return,
            };
            match event {
                Some(event) => self.handle_event(event).await,
                None => return,
            }
        }
    }
}
