//! Server binary: loads settings, wires the carrier adapters into the
//! aggregation engine, and serves the REST API.

use anyhow::Context;
use rateshop::api::rest::{AppState, create_router};
use rateshop::application::services::rate_aggregation::{
    AggregationConfig, RateAggregationEngine,
};
use rateshop::config::Settings;
use rateshop::infrastructure::carriers::{
    CarrierAdapter, FedexAdapter, FedexEndpoints, UpsAdapter, UpsEndpoints, UspsAdapter,
    UspsEndpoints,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rateshop=info,tower_http=info")),
        )
        .init();

    let settings = Settings::load().context("failed to load configuration")?;

    let usps_endpoints = settings
        .usps_base_url
        .as_deref()
        .map(UspsEndpoints::from_base_url)
        .unwrap_or_default();
    let ups_endpoints = settings
        .ups_base_url
        .as_deref()
        .map(UpsEndpoints::from_base_url)
        .unwrap_or_default();
    let fedex_endpoints = settings
        .fedex_base_url
        .as_deref()
        .map(FedexEndpoints::from_base_url)
        .unwrap_or_default();

    let timeout_ms = settings.request_timeout_ms;
    let carriers: Vec<Arc<dyn CarrierAdapter>> = vec![
        Arc::new(UspsAdapter::new(
            settings.usps_credentials(),
            usps_endpoints,
            timeout_ms,
        )?),
        Arc::new(UpsAdapter::new(
            settings.ups_credentials(),
            ups_endpoints,
            timeout_ms,
        )?),
        Arc::new(FedexAdapter::new(
            settings.fedex_credentials(),
            fedex_endpoints,
            timeout_ms,
        )?),
    ];

    for carrier in &carriers {
        info!(status = %carrier.status(), "carrier registered");
    }

    let engine = RateAggregationEngine::new(
        carriers,
        AggregationConfig::default()
            .with_overall_timeout(settings.overall_timeout_ms)
            .with_per_carrier_timeout(settings.request_timeout_ms),
    );

    let app = create_router(Arc::new(AppState::new(engine))).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!(addr = %settings.bind_addr, "rateshop listening");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
