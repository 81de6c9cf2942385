// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SOLANA_RPC_URL` | Solana JSON-RPC endpoint | mainnet-beta |
//! | `SOLANA_PRIVATE_KEY` | Base58-encoded 64-byte wallet secret | One of this or `SOLANA_KEYPAIR_PATH` |
//! | `SOLANA_KEYPAIR_PATH` | solana-cli JSON keypair file | One of this or `SOLANA_PRIVATE_KEY` |
//! | `LULO_API_URL` | Lulo API base URL | `https://api.flexlend.fi` |
//! | `LULO_API_KEY` | Lulo API key | Optional (per-request header otherwise) |
//! | `HTTP_TIMEOUT_SECS` | Outbound HTTP timeout | `15` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{fmt, path::PathBuf, time::Duration};

use solana_sdk::signature::Keypair;
use tracing_subscriber::EnvFilter;

use crate::blockchain::{signing, SolanaClientError, LULO_API, SOLANA_MAINNET_RPC_URL};

pub const SOLANA_RPC_URL_ENV: &str = "SOLANA_RPC_URL";
pub const SOLANA_PRIVATE_KEY_ENV: &str = "SOLANA_PRIVATE_KEY";
pub const SOLANA_KEYPAIR_PATH_ENV: &str = "SOLANA_KEYPAIR_PATH";
pub const LULO_API_URL_ENV: &str = "LULO_API_URL";
pub const LULO_API_KEY_ENV: &str = "LULO_API_KEY";
pub const HTTP_TIMEOUT_SECS_ENV: &str = "HTTP_TIMEOUT_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration missing: {0}")]
    MissingConfig(String),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error(transparent)]
    Client(#[from] SolanaClientError),
}

/// Where the wallet secret comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum WalletSecret {
    Base58(String),
    KeypairFile(PathBuf),
}

impl WalletSecret {
    pub fn load(&self) -> Result<Keypair, SolanaClientError> {
        match self {
            WalletSecret::Base58(secret) => signing::keypair_from_base58(secret),
            WalletSecret::KeypairFile(path) => signing::keypair_from_file(path),
        }
    }
}

// Never print the secret itself.
impl fmt::Debug for WalletSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletSecret::Base58(_) => f.write_str("Base58(<redacted>)"),
            WalletSecret::KeypairFile(path) => f.debug_tuple("KeypairFile").field(path).finish(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone)]
pub struct KitConfig {
    pub rpc_url: String,
    pub wallet: WalletSecret,
    pub lulo_api_url: String,
    pub lulo_api_key: Option<String>,
    pub http_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl fmt::Debug for KitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KitConfig")
            .field("rpc_url", &self.rpc_url)
            .field("wallet", &self.wallet)
            .field("lulo_api_url", &self.lulo_api_url)
            .field(
                "lulo_api_key",
                &self.lulo_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("http_timeout", &self.http_timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl KitConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let wallet = match (
            optional(SOLANA_PRIVATE_KEY_ENV),
            optional(SOLANA_KEYPAIR_PATH_ENV),
        ) {
            (Some(secret), _) => WalletSecret::Base58(secret),
            (None, Some(path)) => WalletSecret::KeypairFile(PathBuf::from(path)),
            (None, None) => {
                return Err(ConfigError::MissingConfig(format!(
                    "{SOLANA_PRIVATE_KEY_ENV} or {SOLANA_KEYPAIR_PATH_ENV}"
                )))
            }
        };

        let port = match optional(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match optional(HTTP_TIMEOUT_SECS_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: HTTP_TIMEOUT_SECS_ENV,
                        value: raw,
                    })
                }
            },
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let log_format = match optional(LOG_FORMAT_ENV).map(|v| v.to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            rpc_url: optional(SOLANA_RPC_URL_ENV)
                .unwrap_or_else(|| SOLANA_MAINNET_RPC_URL.to_string()),
            wallet,
            lulo_api_url: optional(LULO_API_URL_ENV).unwrap_or_else(|| LULO_API.to_string()),
            lulo_api_key: optional(LULO_API_KEY_ENV),
            http_timeout: Duration::from_secs(timeout_secs),
            host: optional(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            log_format,
        })
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
