// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Lulo lending endpoints.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::{
    blockchain::Token,
    error::ApiError,
    providers::LendingAccountDetails,
    state::AppState,
    tools::{self, LuloError},
};

const API_KEY_HEADER: &str = "x-api-key";

/// Request to lend an asset.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LendAssetRequest {
    /// Registry symbol (e.g. "USDC") or registry mint address
    pub asset: String,
    /// Amount in token units
    pub amount: f64,
}

/// Request to withdraw a lent asset.
#[derive(Debug, Deserialize, ToSchema)]
pub struct WithdrawAssetRequest {
    /// Registry symbol (e.g. "USDC") or registry mint address
    pub asset: String,
    /// Amount in token units; ignored when `withdraw_all` is set
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub withdraw_all: bool,
}

/// Submitted transaction.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    /// Base58 transaction signature
    pub signature: String,
}

/// Header key first, then the configured key. An absent key becomes "" and
/// is rejected by the tool before any request goes out.
/// A non-blank `x-api-key` header wins over the configured key.
fn resolve_api_key(state: &AppState, headers: &HeaderMap) -> String {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .or(state.lulo_api_key.as_deref())
        .map(str::to_string)
        .unwrap_or_default()
}

fn parse_asset(raw: &str) -> Result<Token, ApiError> {
    raw.parse::<Token>()
        .map_err(|e| ApiError::bad_request(e.to_string()))
}

fn lulo_error(err: LuloError) -> ApiError {
    warn!(kind = ?err.kind(), "{}", err);
    ApiError::from_kind(err.kind(), err.to_string())
}

/// Lend an asset to Lulo for yield.
#[utoipa::path(
    post,
    path = "/v1/lend",
    tag = "Lending",
    request_body = LendAssetRequest,
    params(("x-api-key" = Option<String>, Header, description = "Lulo API key")),
    responses(
        (status = 200, description = "Deposit submitted", body = TransactionResponse),
        (status = 400, description = "Unknown asset or invalid amount"),
        (status = 401, description = "Missing Lulo API key"),
        (status = 502, description = "Lulo or RPC failure")
    )
)]
pub async fn lend_asset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LendAssetRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let asset = parse_asset(&request.asset)?;
    let api_key = resolve_api_key(&state, &headers);

    let signature = tools::lend_asset(&state.agent, asset, request.amount, &api_key)
        .await
        .map_err(lulo_error)?;

    Ok(Json(TransactionResponse {
        signature: signature.to_string(),
    }))
}

/// Withdraw a lent asset from Lulo.
#[utoipa::path(
    post,
    path = "/v1/lend/withdraw",
    tag = "Lending",
    request_body = WithdrawAssetRequest,
    params(("x-api-key" = Option<String>, Header, description = "Lulo API key")),
    responses(
        (status = 200, description = "Withdrawal submitted", body = TransactionResponse),
        (status = 400, description = "Unknown asset or invalid amount"),
        (status = 401, description = "Missing Lulo API key"),
        (status = 502, description = "Lulo or RPC failure")
    )
)]
pub async fn withdraw_asset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<WithdrawAssetRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let asset = parse_asset(&request.asset)?;
    let api_key = resolve_api_key(&state, &headers);

    let signature = tools::withdraw_asset(
        &state.agent,
        asset,
        request.amount,
        request.withdraw_all,
        &api_key,
    )
    .await
    .map_err(lulo_error)?;

    Ok(Json(TransactionResponse {
        signature: signature.to_string(),
    }))
}

/// Get the agent's Lulo lending account.
#[utoipa::path(
    get,
    path = "/v1/lend/details",
    tag = "Lending",
    params(("x-api-key" = Option<String>, Header, description = "Lulo API key")),
    responses(
        (status = 200, description = "Account details", body = LendingAccountDetails),
        (status = 401, description = "Missing Lulo API key"),
        (status = 502, description = "Lulo failure")
    )
)]
pub async fn lending_details(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LendingAccountDetails>, ApiError> {
    let api_key = resolve_api_key(&state, &headers);

    tools::get_lending_details(&state.agent, &api_key)
        .await
        .map(Json)
        .map_err(lulo_error)
}
