/**
 * MESHVIEW KERNEL - Point d'entrée du serveur de télémétrie mesh
 *
 * RÔLE : Bootstrap : config, logging, client télémétrie, health, API HTTP.
 *
 * ARCHITECTURE : Sans état métier persistant. Chaque vue est recalculée à la
 * demande depuis la source de télémétrie amont.
 */

use anyhow::Context;
use meshview_kernel::config::{config_path, load_config, KernelConfig};
use meshview_kernel::health::HealthTracker;
use meshview_kernel::{build_router, AppState, HttpTelemetrySource};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env optionnel
    dotenvy::dotenv().ok();

    let loaded = load_config().await;

    let level = loaded
        .as_ref()
        .ok()
        .and_then(|cfg| cfg.log_level.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let cfg = loaded.unwrap_or_else(|e| {
        warn!("[kernel] config invalide ({}): {}, usage config par défaut", config_path(), e);
        KernelConfig::default()
    });

    let source = match cfg.telemetry.timeout_secs {
        Some(secs) => HttpTelemetrySource::with_timeout(&cfg.telemetry.base_url, Duration::from_secs(secs))
            .context("failed to build telemetry client")?,
        None => HttpTelemetrySource::new(&cfg.telemetry.base_url),
    };
    info!("[kernel] telemetry source: {}", source.base_url());

    let health_tracker = HealthTracker::new(source.base_url());

    let app_state = AppState {
        source: Arc::new(source),
        health_tracker,
        coverage_limit: cfg.telemetry.coverage_limit,
    };
    let app = build_router(app_state);

    let listener = TcpListener::bind(&cfg.http.bind)
        .await
        .with_context(|| format!("failed to bind {}", cfg.http.bind))?;
    info!("[kernel] listening on http://{}", cfg.http.bind);
    axum::serve(listener, app).await.context("http server stopped")?;
    Ok(())
}
