// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Yield lending through Lulo.
//!
//! Deposit and withdraw follow the same linear flow:
//!
//! 1. Reject a missing API key before any network call.
//! 2. Build the request body for the agent's wallet.
//! 3. Estimate the median priority fee from recent slots.
//! 4. Ask Lulo to generate the unsigned transaction.
//! 5. Decode it, sign it with the agent wallet, and submit it over RPC.
//!
//! Each call generates and submits a fresh transaction. Nothing is
//! de-duplicated: calling `lend_asset` twice deposits twice.

use std::fmt;

use solana_sdk::signature::Signature;
use tracing::info;

use crate::{
    agent::Agent,
    blockchain::{
        get_priority_fees,
        signing::{decode_transaction, sign_transaction, TransactionError},
        LuloDepositAsset, SolanaClientError,
    },
    error::ErrorKind,
    providers::{LendRequest, LendingAccountDetails, LuloApiError, WithdrawRequest},
};

/// Which lending operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuloOperation {
    Deposit,
    Withdraw,
    AccountDetails,
}

impl fmt::Display for LuloOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LuloOperation::Deposit => "Lending failed",
            LuloOperation::Withdraw => "Withdrawal failed",
            LuloOperation::AccountDetails => "Failed to fetch lending details",
        })
    }
}

/// Underlying cause of a lending failure.
#[derive(Debug, thiserror::Error)]
pub enum LuloFailure {
    #[error("Missing Lulo API key")]
    MissingApiKey,

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error(transparent)]
    Api(#[from] LuloApiError),

    #[error("priority fee estimation failed: {0}")]
    FeeEstimate(#[source] SolanaClientError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("submission failed: {0}")]
    Submission(#[source] SolanaClientError),
}

impl LuloFailure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LuloFailure::MissingApiKey => ErrorKind::PreconditionFailed,
            LuloFailure::InvalidAmount(_) => ErrorKind::InvalidInput,
            LuloFailure::Api(e) if e.is_transport() => ErrorKind::TransportFailed,
            LuloFailure::Api(_) => ErrorKind::ProtocolDecodeFailed,
            LuloFailure::FeeEstimate(_) => ErrorKind::TransportFailed,
            LuloFailure::Transaction(
                TransactionError::Base64(_) | TransactionError::Deserialize(_),
            ) => ErrorKind::ProtocolDecodeFailed,
            LuloFailure::Transaction(_) => ErrorKind::SigningFailed,
            LuloFailure::Submission(_) => ErrorKind::SubmissionFailed,
        }
    }
}

/// A failed lending operation, tagged with the operation and its cause.
#[derive(Debug, thiserror::Error)]
#[error("{operation}: {cause}")]
pub struct LuloError {
    pub operation: LuloOperation,
    #[source]
    pub cause: LuloFailure,
}

impl LuloError {
    fn new(operation: LuloOperation, cause: LuloFailure) -> Self {
        Self { operation, cause }
    }

    pub fn kind(&self) -> ErrorKind {
        self.cause.kind()
    }
}

/// Lend `amount` of `asset` (in token units) to Lulo for yield.
///
/// Returns the signature of the submitted deposit transaction.
pub async fn lend_asset(
    agent: &Agent,
    asset: LuloDepositAsset,
    amount: f64,
    api_key: &str,
) -> Result<Signature, LuloError> {
    deposit(agent, asset, amount, api_key)
        .await
        .map_err(|cause| LuloError::new(LuloOperation::Deposit, cause))
}

/// Withdraw `amount` of `asset` from Lulo, or everything when `withdraw_all` is set.
pub async fn withdraw_asset(
    agent: &Agent,
    asset: LuloDepositAsset,
    amount: f64,
    withdraw_all: bool,
    api_key: &str,
) -> Result<Signature, LuloError> {
    withdraw(agent, asset, amount, withdraw_all, api_key)
        .await
        .map_err(|cause| LuloError::new(LuloOperation::Withdraw, cause))
}

/// Fetch the agent's Lulo account snapshot.
pub async fn get_lending_details(
    agent: &Agent,
    api_key: &str,
) -> Result<LendingAccountDetails, LuloError> {
    account_details(agent, api_key)
        .await
        .map_err(|cause| LuloError::new(LuloOperation::AccountDetails, cause))
}

async fn deposit(
    agent: &Agent,
    asset: LuloDepositAsset,
    amount: f64,
    api_key: &str,
) -> Result<Signature, LuloFailure> {
    let api_key = require_api_key(api_key)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LuloFailure::InvalidAmount(amount));
    }

    let request = LendRequest {
        owner: agent.wallet_address().to_string(),
        mint_address: asset.mint().to_string(),
        deposit_amount: amount.to_string(),
    };

    let fees = get_priority_fees(agent.rpc())
        .await
        .map_err(LuloFailure::FeeEstimate)?;

    info!(
        owner = %request.owner,
        asset = %asset,
        amount = %request.deposit_amount,
        priority_fee = fees.median,
        "Generating Lulo deposit"
    );

    let encoded = agent
        .lulo()
        .generate_deposit(api_key, &request, fees.median)
        .await?;

    sign_and_submit(agent, &encoded).await
}

async fn withdraw(
    agent: &Agent,
    asset: LuloDepositAsset,
    amount: f64,
    withdraw_all: bool,
    api_key: &str,
) -> Result<Signature, LuloFailure> {
    let api_key = require_api_key(api_key)?;
    if !amount.is_finite() || amount < 0.0 || (amount == 0.0 && !withdraw_all) {
        return Err(LuloFailure::InvalidAmount(amount));
    }

    let request = WithdrawRequest {
        owner: agent.wallet_address().to_string(),
        mint_address: asset.mint().to_string(),
        withdraw_amount: amount.to_string(),
        withdraw_all,
    };

    let fees = get_priority_fees(agent.rpc())
        .await
        .map_err(LuloFailure::FeeEstimate)?;

    info!(
        owner = %request.owner,
        asset = %asset,
        amount = %request.withdraw_amount,
        withdraw_all,
        priority_fee = fees.median,
        "Generating Lulo withdrawal"
    );

    let encoded = agent
        .lulo()
        .generate_withdraw(api_key, &request, fees.median)
        .await?;

    sign_and_submit(agent, &encoded).await
}

async fn account_details(
    agent: &Agent,
    api_key: &str,
) -> Result<LendingAccountDetails, LuloFailure> {
    let api_key = require_api_key(api_key)?;
    let owner = agent.wallet_address().to_string();
    Ok(agent.lulo().account(api_key, &owner).await?)
}

fn require_api_key(api_key: &str) -> Result<&str, LuloFailure> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(LuloFailure::MissingApiKey);
    }
    Ok(api_key)
}

async fn sign_and_submit(agent: &Agent, encoded: &str) -> Result<Signature, LuloFailure> {
    let mut transaction = decode_transaction(encoded)?;
    sign_transaction(&mut transaction, agent.wallet())?;

    let signature = agent
        .rpc()
        .send_transaction(&transaction)
        .await
        .map_err(LuloFailure::Submission)?;

    info!(signature = %signature, "Lulo transaction submitted");
    Ok(signature)
}
