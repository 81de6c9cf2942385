// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;

use solana_lend_kit::{
    agent::Agent,
    api::router,
    config::{init_tracing, KitConfig},
    state::AppState,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let config = KitConfig::from_env().expect("Failed to load configuration");
    init_tracing(config.log_format);

    let agent = Agent::from_config(&config).expect("Failed to initialise agent");
    info!(
        wallet = %agent.wallet_address(),
        rpc_url = %config.rpc_url,
        lulo_api = %config.lulo_api_url,
        "Agent initialised"
    );
    if config.lulo_api_key.is_none() {
        warn!("LULO_API_KEY not set; lending requests must carry an x-api-key header");
    }

    let state = AppState::new(agent, config.lulo_api_key.clone());
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
                shutdown.cancel();
            }
        }
    });

    info!("Solana Lend Kit listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .expect("HTTP server failed");
}
