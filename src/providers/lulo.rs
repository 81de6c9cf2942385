// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Lulo (fka Flexlend) REST API integration for yield lending.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

const WALLET_PUBKEY_HEADER: &str = "x-wallet-pubkey";
const API_KEY_HEADER: &str = "x-api-key";
const DEPOSIT_PATH: &str = "/generate/account/deposit";
const WITHDRAW_PATH: &str = "/generate/account/withdraw";
const ACCOUNT_PATH: &str = "/account";

/// Body of a deposit-generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendRequest {
    pub owner: String,
    pub mint_address: String,
    pub deposit_amount: String,
}

/// Body of a withdraw-generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub owner: String,
    pub mint_address: String,
    pub withdraw_amount: String,
    pub withdraw_all: bool,
}

/// Snapshot of a Lulo lending account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LendingAccountDetails {
    /// Total value deposited, in USD
    pub total_value: f64,
    /// Interest earned to date, in USD
    pub interest_earned: f64,
    /// Current blended APY
    pub realtime_apy: f64,
    pub settings: LendingSettings,
}

/// Account-level lending preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LendingSettings {
    pub owner: String,
    pub allowed_protocols: Option<String>,
    pub homebase: Option<String>,
    pub minimum_rate: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedTransactions {
    transaction_meta: Vec<TransactionMeta>,
}

#[derive(Debug, Deserialize)]
struct TransactionMeta {
    transaction: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LuloApiError {
    #[error("{endpoint} request failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("{endpoint} returned invalid JSON: {source}")]
    InvalidJson {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Lulo response was invalid: {0}")]
    InvalidResponse(String),
}

impl LuloApiError {
    /// Whether the failure happened on the wire rather than in the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request { .. } | Self::Status { .. })
    }
}

/// HTTP client for the Lulo API.
#[derive(Debug, Clone)]
pub struct LuloClient {
    base_url: String,
    http: Client,
}

impl LuloClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LuloApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LuloApiError::Request {
                endpoint: "client".to_string(),
                source: e,
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask Lulo for an unsigned deposit transaction; returns the base64 blob.
    pub async fn generate_deposit(
        &self,
        api_key: &str,
        request: &LendRequest,
        priority_fee: u64,
    ) -> Result<String, LuloApiError> {
        self.generate(DEPOSIT_PATH, api_key, &request.owner, request, priority_fee)
            .await
    }

    /// Ask Lulo for an unsigned withdraw transaction; returns the base64 blob.
    pub async fn generate_withdraw(
        &self,
        api_key: &str,
        request: &WithdrawRequest,
        priority_fee: u64,
    ) -> Result<String, LuloApiError> {
        self.generate(WITHDRAW_PATH, api_key, &request.owner, request, priority_fee)
            .await
    }

    /// Fetch the lending account for `owner`.
    pub async fn account(
        &self,
        api_key: &str,
        owner: &str,
    ) -> Result<LendingAccountDetails, LuloApiError> {
        let request = self
            .http
            .get(format!("{}{}", self.base_url, ACCOUNT_PATH))
            .header(WALLET_PUBKEY_HEADER, owner)
            .header(API_KEY_HEADER, api_key);

        let envelope: Envelope<LendingAccountDetails> =
            self.send_json(ACCOUNT_PATH, request).await?;
        Ok(envelope.data)
    }

    async fn generate<B: Serialize>(
        &self,
        path: &str,
        api_key: &str,
        owner: &str,
        body: &B,
        priority_fee: u64,
    ) -> Result<String, LuloApiError> {
        let body = serde_json::to_string(body).map_err(|e| LuloApiError::InvalidJson {
            endpoint: path.to_string(),
            source: e,
        })?;

        let request = self
            .http
            .post(format!(
                "{}{}?priorityFee={}",
                self.base_url, path, priority_fee
            ))
            .header(CONTENT_TYPE, "application/json")
            .header(WALLET_PUBKEY_HEADER, owner)
            .header(API_KEY_HEADER, api_key)
            .body(body);

        let envelope: Envelope<GeneratedTransactions> = self.send_json(path, request).await?;
        first_transaction(envelope.data)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, LuloApiError> {
        let response = request.send().await.map_err(|e| LuloApiError::Request {
            endpoint: path.to_string(),
            source: e,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| LuloApiError::Request {
            endpoint: path.to_string(),
            source: e,
        })?;
        debug!(endpoint = %path, %status, bytes = body.len(), "Lulo response received");

        if !status.is_success() {
            return Err(LuloApiError::Status {
                endpoint: path.to_string(),
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| LuloApiError::InvalidJson {
            endpoint: path.to_string(),
            source: e,
        })
    }
}

fn first_transaction(generated: GeneratedTransactions) -> Result<String, LuloApiError> {
    generated
        .transaction_meta
        .into_iter()
        .next()
        .map(|meta| meta.transaction)
        .filter(|tx| !tx.trim().is_empty())
        .ok_or_else(|| {
            LuloApiError::InvalidResponse("missing transactionMeta[0].transaction".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lend_request_serializes_camel_case() {
        let request = LendRequest {
            owner: "owner".to_string(),
            mint_address: "mint".to_string(),
            deposit_amount: "1.5".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "owner": "owner", "mintAddress": "mint", "depositAmount": "1.5" })
        );
    }

    #[test]
    fn withdraw_request_serializes_camel_case() {
        let request = WithdrawRequest {
            owner: "owner".to_string(),
            mint_address: "mint".to_string(),
            withdraw_amount: "0".to_string(),
            withdraw_all: true,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "owner": "owner",
                "mintAddress": "mint",
                "withdrawAmount": "0",
                "withdrawAll": true
            })
        );
    }

    #[test]
    fn account_details_parse_from_wire_shape() {
        let payload = json!({
            "data": {
                "totalValue": 1250.5,
                "interestEarned": 12.25,
                "realtimeApy": 8.1,
                "settings": {
                    "owner": "owner",
                    "allowedProtocols": null,
                    "homebase": "kamino",
                    "minimumRate": "0.5"
                }
            }
        });
        let envelope: Envelope<LendingAccountDetails> = serde_json::from_value(payload).unwrap();
        assert_eq!(envelope.data.total_value, 1250.5);
        assert_eq!(envelope.data.settings.allowed_protocols, None);
        assert_eq!(envelope.data.settings.homebase.as_deref(), Some("kamino"));
    }

    #[test]
    fn first_transaction_requires_an_entry() {
        let empty = GeneratedTransactions {
            transaction_meta: vec![],
        };
        assert!(matches!(
            first_transaction(empty),
            Err(LuloApiError::InvalidResponse(_))
        ));

        let blank = GeneratedTransactions {
            transaction_meta: vec![TransactionMeta {
                transaction: " ".to_string(),
            }],
        };
        assert!(first_transaction(blank).is_err());

        let present = GeneratedTransactions {
            transaction_meta: vec![
                TransactionMeta {
                    transaction: "first".to_string(),
                },
                TransactionMeta {
                    transaction: "second".to_string(),
                },
            ],
        };
        assert_eq!(first_transaction(present).unwrap(), "first");
    }

    #[tokio::test]
    async fn new_trims_trailing_slash() {
        let client = LuloClient::new("https://api.flexlend.fi/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://api.flexlend.fi");
    }
}
