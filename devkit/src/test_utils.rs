/*!
Test Harness pour l'API du kernel

Facilite l'écriture de tests bout en bout avec:
- Router du kernel servi sur un port local éphémère
- Source de télémétrie mock partagée avec le test
- Serveur amont factice pour tester le client HTTP réel
*/

use crate::telemetry_stub::MockTelemetrySource;
use anyhow::{Context, Result};
use axum::Router;
use meshview_kernel::health::HealthTracker;
use meshview_kernel::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Sert un router sur 127.0.0.1:0, renvoie l'URL de base et la tâche serveur.
pub async fn spawn_server(router: Router) -> Result<(String, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await.context("bind test listener")?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            log::error!("❌ test server stopped: {}", e);
        }
    });
    Ok((format!("http://{addr}"), handle))
}

/// Harness complet : kernel HTTP branché sur un `MockTelemetrySource`.
pub struct TestHarness {
    pub source: MockTelemetrySource,
    pub health: HealthTracker,
    base_url: String,
    client: reqwest::Client,
    server: JoinHandle<()>,
}

impl TestHarness {
    pub async fn start(source: MockTelemetrySource) -> Result<Self> {
        Self::start_with_limit(source, meshview_kernel::view::DEFAULT_COVERAGE_LIMIT).await
    }

    pub async fn start_with_limit(source: MockTelemetrySource, coverage_limit: usize) -> Result<Self> {
        env_logger::try_init().ok(); // Init logging pour tests

        let health = HealthTracker::new("mock://telemetry");
        let app_state = AppState {
            source: Arc::new(source.clone()),
            health_tracker: health.clone(),
            coverage_limit,
        };
        let (base_url, server) = spawn_server(build_router(app_state)).await?;
        log::info!("🚀 kernel harness listening on {}", base_url);

        Ok(Self {
            source,
            health,
            base_url,
            client: reqwest::Client::new(),
            server,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET + statut + corps JSON.
    pub async fn get_json(&self, path: &str) -> Result<(u16, Value)> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).with_context(|| format!("non-JSON body for {path}: {text}"))?;
        Ok((status, body))
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        self.server.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::NodeBuilder;

    #[tokio::test]
    async fn test_harness_serves_health() {
        let harness = TestHarness::start(MockTelemetrySource::new().with_node(NodeBuilder::new("a1").build()))
            .await
            .unwrap();

        let (status, body) = harness.get_json("/system/health").await.unwrap();
        assert_eq!(status, 200);
        assert_eq!(body["telemetry_url"], "mock://telemetry");
        assert_eq!(body["fetches_ok"], 0);
    }
}
