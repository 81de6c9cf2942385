// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

/// Solana mainnet-beta JSON-RPC endpoint.
pub const SOLANA_MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Lamports in one SOL. Only valid for the native asset.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Default slippage tolerance in basis points (300 = 3%).
pub const DEFAULT_SLIPPAGE_BPS: u16 = 300;

/// Default number of decimals for newly created tokens.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 9;

/// Jupiter quote API base URL.
pub const JUP_API: &str = "https://quote-api.jup.ag/v6";

/// Lulo (fka Flexlend) API base URL.
pub const LULO_API: &str = "https://api.flexlend.fi";

/// Convert a lamport amount to SOL display units.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}
