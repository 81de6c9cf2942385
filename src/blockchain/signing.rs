// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Key loading and transaction signing.
//!
//! Keys arrive either as a base58-encoded 64-byte secret (the format wallets
//! export) or as a solana-cli JSON keypair file. Transactions generated by
//! third-party APIs arrive as base64-encoded, bincode-serialized
//! [`VersionedTransaction`]s with empty signature slots.

use std::path::Path;

use base64ct::{Base64, Encoding};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature, Signer},
    signer::SignerError,
    transaction::VersionedTransaction,
};

use super::client::SolanaClientError;

/// Errors decoding or signing an externally generated transaction.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("transaction is not valid base64: {0}")]
    Base64(String),

    #[error("transaction bytes could not be deserialized: {0}")]
    Deserialize(#[from] bincode::Error),

    #[error("{0} is not a required signer of this transaction")]
    NotASigner(Pubkey),

    #[error("signer failed: {0}")]
    Signer(#[from] SignerError),
}

/// Parse a keypair from a base58-encoded 64-byte secret.
pub fn keypair_from_base58(secret: &str) -> Result<Keypair, SolanaClientError> {
    let bytes = bs58::decode(secret.trim())
        .into_vec()
        .map_err(|e| SolanaClientError::InvalidKeypair(format!("Invalid base58: {}", e)))?;
    keypair_from_bytes(&bytes)
}

fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair, SolanaClientError> {
    Keypair::try_from(bytes)
        .map_err(|e| SolanaClientError::InvalidKeypair(format!("Invalid key bytes: {}", e)))
}

/// Read a keypair from a solana-cli JSON keypair file.
pub fn keypair_from_file(path: &Path) -> Result<Keypair, SolanaClientError> {
    read_keypair_file(path).map_err(|e| {
        SolanaClientError::InvalidKeypair(format!("failed to read {}: {}", path.display(), e))
    })
}

/// Decode a base64 transaction blob into a [`VersionedTransaction`].
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction, TransactionError> {
    let bytes = Base64::decode_vec(encoded.trim())
        .map_err(|e| TransactionError::Base64(e.to_string()))?;
    Ok(bincode::deserialize(&bytes)?)
}

/// Attach `keypair`'s signature to its slot in `transaction`.
///
/// Only the keypair's own slot is written; other signature slots are left as
/// delivered.
pub fn sign_transaction(
    transaction: &mut VersionedTransaction,
    keypair: &Keypair,
) -> Result<Signature, TransactionError> {
    let signer = keypair.pubkey();
    let required = usize::from(transaction.message.header().num_required_signatures);

    let position = transaction
        .message
        .static_account_keys()
        .iter()
        .take(required)
        .position(|key| *key == signer)
        .ok_or(TransactionError::NotASigner(signer))?;

    let signature = keypair.try_sign_message(&transaction.message.serialize())?;

    if transaction.signatures.len() < required {
        transaction.signatures.resize(required, Signature::default());
    }
    transaction.signatures[position] = signature;

    Ok(signature)
}
