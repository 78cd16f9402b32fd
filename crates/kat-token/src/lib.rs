//! Token-level encoding for the KAT dapp.
//!
//! This crate provides:
//! - Minimal ABI encoding utilities for EVM function calls
//! - ERC-20 calldata construction (transfer, balanceOf, constructor args)
//! - Fixed-point unit conversion between human-entered decimal strings and
//!   the token's 18-decimal base-unit representation

pub mod abi;
pub mod erc20;
pub mod error;
pub mod units;

pub use alloy_primitives::U256;
