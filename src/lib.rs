pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

pub use crate::api::controller::{Controller, RouteRequest, SharedController};
pub use crate::api::routes::{routes, Operation, ROUTE_TABLE};

use crate::core::{config::Settings, state::AppState, telemetry};
use crate::services::ledger_controller::LedgerController;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let ledger = db::init_ledger(&settings).await;
    let controller: SharedController = Arc::new(LedgerController::new(ledger.clone()));
    let state = AppState::new(settings, ledger);

    let app = api::router::router(state.clone(), controller);
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        routes = ROUTE_TABLE.len(),
        "Elza API listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await?;

    tracing::info!("Elza API stopped");
    Ok(())
}
