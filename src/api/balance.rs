// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet balance endpoint.

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use utoipa::{IntoParams, ToSchema};

use crate::{
    blockchain::{SolanaClientError, Token},
    error::ApiError,
    state::AppState,
    tools,
};

/// Query parameters for balance request.
#[derive(Debug, Deserialize, IntoParams)]
pub struct BalanceQuery {
    /// Registry symbol (e.g. "USDC") or any SPL mint address. Omit for native SOL.
    pub token: Option<String>,
}

/// Balance response.
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    /// Wallet address
    pub address: String,
    /// Mint queried, absent for native SOL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint: Option<String>,
    /// Balance in UI units; null when the token account does not exist
    pub balance: Option<f64>,
}

/// Resolve a registry symbol or raw mint address.
fn resolve_mint(raw: &str) -> Result<Pubkey, SolanaClientError> {
    if let Ok(token) = Token::from_str(raw) {
        return Ok(token.mint());
    }
    Pubkey::from_str(raw.trim()).map_err(|e| SolanaClientError::InvalidAddress(e.to_string()))
}

/// Get the balance of the agent wallet.
///
/// Returns the native SOL balance, or the balance of the wallet's associated
/// token account when `token` is given.
#[utoipa::path(
    get,
    path = "/v1/balance",
    tag = "Wallet",
    params(BalanceQuery),
    responses(
        (status = 200, description = "Balance retrieved successfully", body = BalanceResponse),
        (status = 400, description = "Unknown token or not a mint"),
        (status = 502, description = "Blockchain RPC unavailable")
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let mint = query
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(resolve_mint)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let balance = tools::get_balance(&state.agent, mint.as_ref())
        .await
        .map_err(|e| match e {
            SolanaClientError::InvalidAddress(_) => ApiError::bad_request(e.to_string()),
            _ => {
                tracing::warn!("Failed to query balance: {}", e);
                ApiError::bad_gateway(format!("Failed to query balance: {}", e))
            }
        })?;

    Ok(Json(BalanceResponse {
        address: state.agent.wallet_address().to_string(),
        mint: mint.map(|m| m.to_string()),
        balance,
    }))
}
