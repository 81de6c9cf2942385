// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solana JSON-RPC client for blockchain interactions.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature,
    transaction::VersionedTransaction,
};

/// Chain operations consumed by the toolkit.
///
/// [`SolanaClient`] is the production implementation; tests substitute a
/// recording double.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Native balance of `owner` in lamports.
    async fn native_balance(&self, owner: &Pubkey) -> Result<u64, SolanaClientError>;

    /// Program that owns `account`, or `None` if the account does not exist.
    async fn account_owner(&self, account: &Pubkey) -> Result<Option<Pubkey>, SolanaClientError>;

    /// UI amount held by a token account, or `None` if the account does not exist.
    async fn token_account_balance(
        &self,
        token_account: &Pubkey,
    ) -> Result<Option<f64>, SolanaClientError>;

    /// Prioritization fees (micro-lamports per CU) paid in recent slots.
    async fn recent_prioritization_fees(&self) -> Result<Vec<u64>, SolanaClientError>;

    /// Submit a signed transaction and return its signature.
    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<Signature, SolanaClientError>;
}

/// Solana RPC client.
pub struct SolanaClient {
    /// Endpoint this client talks to
    rpc_url: String,
    /// Nonblocking RPC client
    rpc: RpcClient,
}

impl SolanaClient {
    /// Create a new client for an RPC endpoint, using `confirmed` commitment.
    pub fn new(rpc_url: &str) -> Result<Self, SolanaClientError> {
        let url: url::Url = rpc_url.parse().map_err(|e: url::ParseError| {
            SolanaClientError::InvalidRpcUrl(e.to_string())
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SolanaClientError::InvalidRpcUrl(format!(
                "unsupported scheme `{}`",
                url.scheme()
            )));
        }

        let rpc =
            RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            rpc,
        })
    }

    /// The RPC endpoint URL.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl ChainRpc for SolanaClient {
    async fn native_balance(&self, owner: &Pubkey) -> Result<u64, SolanaClientError> {
        self.rpc
            .get_balance(owner)
            .await
            .map_err(|e| SolanaClientError::RpcError(e.to_string()))
    }

    async fn account_owner(&self, account: &Pubkey) -> Result<Option<Pubkey>, SolanaClientError> {
        let account = self
            .rpc
            .get_account_with_commitment(account, self.rpc.commitment())
            .await
            .map_err(|e| SolanaClientError::RpcError(e.to_string()))?
            .value;

        Ok(account.map(|account| account.owner))
    }

    async fn token_account_balance(
        &self,
        token_account: &Pubkey,
    ) -> Result<Option<f64>, SolanaClientError> {
        // getTokenAccountBalance errors on a missing account, so check existence first.
        if self.account_owner(token_account).await?.is_none() {
            return Ok(None);
        }

        let balance = self
            .rpc
            .get_token_account_balance(token_account)
            .await
            .map_err(|e| SolanaClientError::RpcError(e.to_string()))?;

        Ok(balance.ui_amount)
    }

    async fn recent_prioritization_fees(&self) -> Result<Vec<u64>, SolanaClientError> {
        let fees = self
            .rpc
            .get_recent_prioritization_fees(&[])
            .await
            .map_err(|e| SolanaClientError::RpcError(e.to_string()))?;

        Ok(fees.into_iter().map(|fee| fee.prioritization_fee).collect())
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<Signature, SolanaClientError> {
        self.rpc
            .send_transaction(transaction)
            .await
            .map_err(|e| SolanaClientError::TransactionFailed(e.to_string()))
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum SolanaClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}
