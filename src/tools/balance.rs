// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet balance lookup.

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::{
    agent::Agent,
    blockchain::{associated_token_address, is_token_program, lamports_to_sol, SolanaClientError},
};

/// Balance of the agent's wallet in UI units.
///
/// With no mint, returns the native SOL balance. With a mint, returns the UI
/// amount of the wallet's associated token account under the program that owns
/// the mint (SPL Token or Token-2022), or `None` when the mint or that account
/// does not exist.
pub async fn get_balance(
    agent: &Agent,
    token_mint: Option<&Pubkey>,
) -> Result<Option<f64>, SolanaClientError> {
    let owner = agent.wallet_address();

    match token_mint {
        None => {
            let lamports = agent.rpc().native_balance(&owner).await?;
            debug!(owner = %owner, lamports, "Fetched native balance");
            Ok(Some(lamports_to_sol(lamports)))
        }
        Some(mint) => {
            let Some(token_program) = agent.rpc().account_owner(mint).await? else {
                debug!(mint = %mint, "Mint account not found");
                return Ok(None);
            };
            if !is_token_program(&token_program) {
                return Err(SolanaClientError::InvalidAddress(format!(
                    "{mint} is not a token mint (owned by {token_program})"
                )));
            }

            let token_account = associated_token_address(&owner, mint, &token_program);
            let balance = agent.rpc().token_account_balance(&token_account).await?;
            debug!(
                owner = %owner,
                mint = %mint,
                token_account = %token_account,
                found = balance.is_some(),
                "Fetched token balance"
            );
            Ok(balance)
        }
    }
}
