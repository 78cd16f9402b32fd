use std::env;

use kat_token::units::KAT_DECIMALS;

/// Address the token contract lands on with the default local dev-node
/// deployment (first contract from the first unlocked account).
pub const DEFAULT_TOKEN_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Default JSON-RPC endpoint of a local dev node.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Static configuration shared by the session manager and transfer
/// submitter: the deployed contract's address and display parameters.
#[derive(Debug, Clone)]
pub struct DappConfig {
    pub token_address: String,
    pub token_symbol: String,
    pub decimals: u8,
}

impl Default for DappConfig {
    fn default() -> Self {
        Self {
            token_address: DEFAULT_TOKEN_ADDRESS.to_string(),
            token_symbol: "KAT".to_string(),
            decimals: KAT_DECIMALS,
        }
    }
}

impl DappConfig {
    /// Builds a config from the environment, falling back to defaults.
    ///
    /// `KAT_TOKEN_ADDRESS` overrides the contract address.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(address) = env::var("KAT_TOKEN_ADDRESS") {
            config.token_address = address;
        }
        config
    }
}

/// Resolves the JSON-RPC endpoint from `KAT_RPC_URL`, falling back to the
/// local dev-node default.
pub fn rpc_url_from_env() -> String {
    env::var("KAT_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string())
}
