// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{providers::LendingAccountDetails, providers::LendingSettings, state::AppState};

pub mod balance;
pub mod health;
pub mod lend;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/balance", get(balance::get_balance))
        .route("/lend", post(lend::lend_asset))
        .route("/lend/withdraw", post(lend::withdraw_asset))
        .route("/lend/details", get(lend::lending_details))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        balance::get_balance,
        lend::lend_asset,
        lend::withdraw_asset,
        lend::lending_details,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            balance::BalanceResponse,
            lend::LendAssetRequest,
            lend::WithdrawAssetRequest,
            lend::TransactionResponse,
            LendingAccountDetails,
            LendingSettings,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Wallet", description = "Agent wallet balances"),
        (name = "Lending", description = "Lulo yield lending"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;
