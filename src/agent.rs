// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Agent context: the wallet, chain client and Lulo client every tool runs against.

use std::sync::Arc;

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

use crate::{
    blockchain::{ChainRpc, SolanaClient},
    config::{ConfigError, KitConfig},
    providers::LuloClient,
};

/// Explicit context passed by reference into every tool.
pub struct Agent {
    wallet: Keypair,
    rpc: Arc<dyn ChainRpc>,
    lulo: LuloClient,
}

impl Agent {
    pub fn new(wallet: Keypair, rpc: Arc<dyn ChainRpc>, lulo: LuloClient) -> Self {
        Self { wallet, rpc, lulo }
    }

    /// Build an agent against the configured RPC endpoint and Lulo API.
    pub fn from_config(config: &KitConfig) -> Result<Self, ConfigError> {
        let wallet = config.wallet.load()?;
        let rpc = SolanaClient::new(&config.rpc_url)?;
        let lulo = LuloClient::new(config.lulo_api_url.as_str(), config.http_timeout).map_err(
            |e| ConfigError::InvalidValue {
                name: crate::config::LULO_API_URL_ENV,
                value: e.to_string(),
            },
        )?;

        Ok(Self::new(wallet, Arc::new(rpc), lulo))
    }

    pub fn wallet(&self) -> &Keypair {
        &self.wallet
    }

    pub fn wallet_address(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    pub fn rpc(&self) -> &dyn ChainRpc {
        self.rpc.as_ref()
    }

    pub fn lulo(&self) -> &LuloClient {
        &self.lulo
    }
}
