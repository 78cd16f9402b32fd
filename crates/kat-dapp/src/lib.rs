//! Interactive core of the KAT token dapp.
//!
//! This crate provides:
//! - The wallet provider boundary (account authorization, contract calls,
//!   transaction submission, change notifications)
//! - A JSON-RPC-over-HTTP provider implementation for dev nodes
//! - The wallet session manager (account + balance resolution, event
//!   subscription lifecycle)
//! - The transfer submitter (validation, single in-flight submission,
//!   failure-to-notification mapping)
//!
//! Signing, account management, and chain state all live behind the
//! [`provider::WalletProvider`] boundary; nothing here touches key material.

pub mod config;
pub mod error;
pub mod notify;
pub mod provider;
pub mod rpc;
pub mod session;
pub mod transfer;
