// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for Solana.
//!
//! This module provides functionality for:
//! - Querying native SOL and SPL token balances
//! - Estimating priority fees
//! - Decoding, signing and submitting externally generated transactions

pub mod client;
pub mod fees;
pub mod signing;
pub mod tokens;
pub mod types;

pub use client::{ChainRpc, SolanaClient, SolanaClientError};
pub use fees::{get_priority_fees, PriorityFees};
pub use tokens::{
    associated_token_address, is_token_program, LuloDepositAsset, Token, UnknownToken,
};
pub use types::*;
