// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solana Lend Kit - agent toolkit for Solana balances and Lulo lending
//!
//! Every tool takes an explicit [`agent::Agent`] (wallet keypair, chain RPC
//! handle, Lulo client) and performs a short sequence of network calls.
//!
//! ## Modules
//!
//! - `agent` - Agent context passed into every tool
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Solana RPC, token registry, fees and signing
//! - `providers` - Lulo REST API client
//! - `tools` - Balance lookup and lending operations

pub mod agent;
pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod providers;
pub mod state;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_utils;
