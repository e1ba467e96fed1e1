/*!
Mock Telemetry Source pour développement sans service amont

Sert des identités et des rapports en mémoire via le trait `TelemetrySource`.
Permet d'injecter des pannes et des latences par nœud, et journalise chaque appel.
*/

use meshview_kernel::models::{CoverageSample, NodeIdentity, NodeIdentityMap};
use meshview_kernel::telemetry::{TelemetryError, TelemetrySource};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Identity(String),
    Samples { id: String, limit: usize },
    AllIdentities,
}

#[derive(Default)]
struct MockState {
    identities: NodeIdentityMap,
    samples: HashMap<String, Vec<CoverageSample>>,
    delays: HashMap<String, Duration>,
    failure: Option<u16>,
    calls: Vec<MockCall>,
}

/// Source mémoire partagée ; les clones voient le même état.
#[derive(Clone, Default)]
pub struct MockTelemetrySource {
    state: Arc<Mutex<MockState>>,
}

impl MockTelemetrySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre une identité, indexée par son id.
    pub fn with_node(self, node: NodeIdentity) -> Self {
        self.insert_node(node);
        self
    }

    pub fn with_samples(self, id: &str, samples: Vec<CoverageSample>) -> Self {
        self.state.lock().samples.insert(id.to_string(), samples);
        self
    }

    /// Latence appliquée à toutes les requêtes concernant `id`.
    pub fn with_delay(self, id: &str, delay: Duration) -> Self {
        self.state.lock().delays.insert(id.to_string(), delay);
        self
    }

    pub fn insert_node(&self, node: NodeIdentity) {
        self.state.lock().identities.insert(node.id.clone(), node);
    }

    /// Toute requête suivante échoue avec ce statut HTTP.
    pub fn fail_with_status(&self, status: u16) {
        self.state.lock().failure = Some(status);
    }

    pub fn recover(&self) {
        self.state.lock().failure = None;
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    // journalise l'appel, renvoie la latence à appliquer et la panne éventuelle
    fn record(&self, call: MockCall, id: Option<&str>, path: String) -> (Option<Duration>, Result<(), TelemetryError>) {
        let mut state = self.state.lock();
        log::debug!("[MOCK] {:?}", call);
        state.calls.push(call);
        let delay = id.and_then(|id| state.delays.get(id).copied());
        let outcome = match state.failure {
            Some(status) => Err(TelemetryError::Status { status, path }),
            None => Ok(()),
        };
        (delay, outcome)
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

impl TelemetrySource for MockTelemetrySource {
    async fn get_node_identity(&self, id: &str) -> Result<NodeIdentity, TelemetryError> {
        let (delay, outcome) = self.record(MockCall::Identity(id.to_string()), Some(id), format!("/node/info/{id}"));
        pause(delay).await;
        outcome?;
        let found = self.state.lock().identities.get(id).cloned();
        found.ok_or_else(|| TelemetryError::NotFound(id.to_string()))
    }

    async fn get_node_samples(&self, id: &str, limit: usize) -> Result<Vec<CoverageSample>, TelemetryError> {
        let call = MockCall::Samples { id: id.to_string(), limit };
        let (delay, outcome) = self.record(call, Some(id), format!("/coverage/{id}?limit={limit}"));
        pause(delay).await;
        outcome?;
        let samples = self.state.lock().samples.get(id).cloned().unwrap_or_default();
        Ok(samples.into_iter().take(limit).collect())
    }

    async fn get_all_node_identities(&self) -> Result<NodeIdentityMap, TelemetryError> {
        let (_, outcome) = self.record(MockCall::AllIdentities, None, "/node/infos".into());
        outcome?;
        Ok(self.state.lock().identities.clone())
    }
}
