//! One-shot deployment tool for the KAT token contract.
//!
//! Resolves the first node-managed account as deployer, submits the contract
//! creation transaction with the fixed initial supply, waits for it to be
//! mined, and prints the deployed address. Exits 0 on success, 1 on any
//! failure. No retries: a failed run is simply re-run.
//!
//! Configuration comes from the environment:
//! - `KAT_RPC_URL`      JSON-RPC endpoint (default `http://127.0.0.1:8545`)
//! - `KAT_ARTIFACT`     build artifact with the creation bytecode
//!                      (default `artifacts/KATToken.json`)

use std::env;
use std::fs;
use std::process;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use kat_dapp::config;
use kat_dapp::provider::{TxReceipt, WalletProvider};
use kat_dapp::rpc::HttpProvider;
use kat_token::{erc20, units, U256};

/// Whole tokens minted at deployment.
const INITIAL_SUPPLY_TOKENS: &str = "1000";

const DEFAULT_ARTIFACT_PATH: &str = "artifacts/KATToken.json";

/// The slice of a compiler build artifact we care about.
#[derive(Deserialize)]
struct Artifact {
    bytecode: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run().await {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let rpc_url = config::rpc_url_from_env();
    let provider = HttpProvider::new(&rpc_url);
    tracing::debug!(%rpc_url, "connecting to node");

    let accounts = provider
        .request_accounts()
        .await
        .context("failed to resolve node accounts")?;
    let deployer = match accounts.first() {
        Some(account) => account.clone(),
        None => bail!("no signing accounts available on the node"),
    };
    println!("Deploying contracts with the account: {deployer}");

    let initial_supply = units::parse_units(INITIAL_SUPPLY_TOKENS, units::KAT_DECIMALS)?;
    println!("Initial supply (in base units): {initial_supply}");

    let artifact_path =
        env::var("KAT_ARTIFACT").unwrap_or_else(|_| DEFAULT_ARTIFACT_PATH.to_string());
    let raw = fs::read_to_string(&artifact_path)
        .with_context(|| format!("failed to read artifact {artifact_path}"))?;
    let data = creation_data(&raw, initial_supply)?;

    let tx_hash = provider
        .send_transaction(&deployer, None, data)
        .await
        .context("failed to submit deployment transaction")?;
    tracing::info!(%tx_hash, "deployment transaction submitted");

    let receipt = provider
        .wait_for_receipt(&tx_hash)
        .await
        .context("failed while waiting for deployment to be mined")?;
    let address = deployed_address(&receipt)?;
    println!("Contract deployed to: {address}");

    Ok(())
}

/// Builds the contract creation payload: compiled bytecode followed by the
/// ABI-encoded constructor argument (initial supply).
fn creation_data(artifact_json: &str, initial_supply: U256) -> Result<Vec<u8>> {
    let artifact: Artifact =
        serde_json::from_str(artifact_json).context("malformed artifact")?;

    let mut data = hex::decode(artifact.bytecode.trim_start_matches("0x"))
        .context("artifact bytecode is not valid hex")?;
    if data.is_empty() {
        bail!("artifact bytecode is empty");
    }
    data.extend_from_slice(&erc20::encode_constructor_args(initial_supply));
    Ok(data)
}

/// Extracts the deployed contract address from the mined receipt, rejecting
/// reverted deployments and receipts without an address.
fn deployed_address(receipt: &TxReceipt) -> Result<String> {
    if !receipt.status {
        bail!("deployment transaction {} reverted", receipt.tx_hash);
    }
    match &receipt.contract_address {
        Some(address) if !address.is_empty() => Ok(address.clone()),
        _ => bail!("mined receipt carries no contract address"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supply() -> U256 {
        units::parse_units(INITIAL_SUPPLY_TOKENS, units::KAT_DECIMALS).unwrap()
    }

    #[test]
    fn creation_data_appends_constructor_word() {
        let artifact = r#"{ "bytecode": "0x6001600101" }"#;
        let data = creation_data(artifact, supply()).unwrap();

        // 5 bytecode bytes + one 32-byte constructor word.
        assert_eq!(data.len(), 5 + 32);
        assert_eq!(&data[..5], &[0x60, 0x01, 0x60, 0x01, 0x01]);
        assert_eq!(U256::from_be_slice(&data[5..]), supply());
    }

    #[test]
    fn creation_data_accepts_unprefixed_bytecode() {
        let artifact = r#"{ "bytecode": "6001" }"#;
        let data = creation_data(artifact, supply()).unwrap();
        assert_eq!(data.len(), 2 + 32);
    }

    #[test]
    fn creation_data_rejects_malformed_json() {
        assert!(creation_data("not json", supply()).is_err());
        assert!(creation_data(r#"{ "abi": [] }"#, supply()).is_err());
    }

    #[test]
    fn creation_data_rejects_non_hex_bytecode() {
        let artifact = r#"{ "bytecode": "0xzz" }"#;
        assert!(creation_data(artifact, supply()).is_err());
    }

    #[test]
    fn creation_data_rejects_empty_bytecode() {
        let artifact = r#"{ "bytecode": "0x" }"#;
        let err = creation_data(artifact, supply()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn deployed_address_on_success() {
        let receipt = TxReceipt {
            tx_hash: "0x1".into(),
            status: true,
            contract_address: Some("0x5FbDB2315678afecb367f032d93F642f64180aa3".into()),
        };

        let address = deployed_address(&receipt).unwrap();
        assert_eq!(address, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
    }

    #[test]
    fn deployed_address_rejects_reverted_deployment() {
        let receipt = TxReceipt {
            tx_hash: "0xdead".into(),
            status: false,
            contract_address: Some("0xabc".into()),
        };

        let err = deployed_address(&receipt).unwrap_err();
        assert!(err.to_string().contains("0xdead"));
        assert!(err.to_string().contains("reverted"));
    }

    #[test]
    fn deployed_address_requires_contract_address() {
        let receipt = TxReceipt {
            tx_hash: "0x1".into(),
            status: true,
            contract_address: None,
        };

        assert!(deployed_address(&receipt).is_err());
    }
}
