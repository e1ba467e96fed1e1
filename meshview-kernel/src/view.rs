/**
 * NODE VIEWS - Cycle de fetch d'une vue nœud (détail ou couverture)
 *
 * RÔLE :
 * Joint les deux requêtes (identité + rapports) d'un nœud et assemble la page.
 * Chaque vue possède son propre cycle : chargement -> prêt | introuvable.
 *
 * FONCTIONNEMENT :
 * - `select(id)` remet l'état à `Loading` et émet un ticket numéroté
 * - `commit(ticket, ..)` ignore tout résultat dont le ticket n'est plus courant
 *   (une réponse pour un ancien id ne peut pas écraser l'état du nouveau)
 * - Toute erreur aboutit à une page "introuvable" avec les liens de l'id demandé
 */

use crate::coverage::{self, CoverageOverlay};
use crate::health::HealthTracker;
use crate::links::{decimal_id, external_links, ExternalLink};
use crate::models::{CoverageSample, NodeIdentity};
use crate::telemetry::{TelemetryError, TelemetrySource};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_COVERAGE_LIMIT: usize = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Identité + dernier rapport de position.
    Detail,
    /// Identité + overlay sur au plus `limit` rapports.
    Coverage { limit: usize },
}

impl ViewKind {
    fn sample_limit(self) -> usize {
        match self {
            ViewKind::Detail => 1,
            ViewKind::Coverage { limit } => limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetail {
    pub identity: NodeIdentity,
    pub decimal_id: Option<u64>,
    pub links: Vec<ExternalLink>,
    /// Heure du dernier rapport de position (RFC 3339).
    pub position_time: Option<String>,
    pub preview: Option<CoverageOverlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCoverage {
    pub identity: NodeIdentity,
    pub has_data: bool,
    pub overlay: CoverageOverlay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum NodePage {
    Detail(NodeDetail),
    Coverage(NodeCoverage),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundPage {
    pub node_id: String,
    pub links: Vec<ExternalLink>,
}

impl NotFoundPage {
    pub fn for_node(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            links: external_links(node_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Loading { node_id: String },
    Ready(NodePage),
    NotFound(NotFoundPage),
}

impl ViewState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Ready(_) | ViewState::NotFound(_))
    }
}

// `node_id` : id demandé, sert au filtre d'auto-réception
fn assemble(
    node_id: &str,
    kind: ViewKind,
    identity: NodeIdentity,
    samples: Vec<CoverageSample>,
) -> NodePage {
    match kind {
        ViewKind::Detail => {
            let latest = samples.first();
            NodePage::Detail(NodeDetail {
                decimal_id: decimal_id(&identity.id),
                links: external_links(&identity.id),
                position_time: latest.and_then(|s| s.time.to_rfc3339()),
                preview: latest.map(coverage::preview),
                identity,
            })
        }
        ViewKind::Coverage { .. } => {
            let overlay = coverage::aggregate(&samples, node_id);
            NodePage::Coverage(NodeCoverage {
                has_data: !overlay.is_empty(),
                overlay,
                identity,
            })
        }
    }
}

/// Lance identité + rapports en parallèle ; l'échec de l'un fait échouer la paire.
pub async fn fetch_node_page<S: TelemetrySource>(
    source: &S,
    node_id: &str,
    kind: ViewKind,
) -> Result<NodePage, TelemetryError> {
    let (identity, samples) = tokio::try_join!(
        source.get_node_identity(node_id),
        source.get_node_samples(node_id, kind.sample_limit()),
    )?;
    Ok(assemble(node_id, kind, identity, samples))
}

/// Résultat -> état terminal. Les erreurs sont journalisées, jamais propagées.
pub fn resolve(node_id: &str, outcome: Result<NodePage, TelemetryError>) -> ViewState {
    match outcome {
        Ok(page) => ViewState::Ready(page),
        Err(e) => {
            warn!("[view] node {} unavailable: {}", node_id, e);
            ViewState::NotFound(NotFoundPage::for_node(node_id))
        }
    }
}

/// Identifie une requête émise pour une cible donnée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub node_id: String,
}

struct ViewInner {
    seq: u64,
    state: ViewState,
}

pub struct NodeView<S> {
    source: Arc<S>,
    kind: ViewKind,
    inner: Mutex<ViewInner>,
    health: Option<HealthTracker>,
}

impl<S: TelemetrySource> NodeView<S> {
    pub fn new(source: Arc<S>, kind: ViewKind) -> Self {
        Self {
            source,
            kind,
            inner: Mutex::new(ViewInner {
                seq: 0,
                state: ViewState::Idle,
            }),
            health: None,
        }
    }

    pub fn with_health(mut self, health: HealthTracker) -> Self {
        self.health = Some(health);
        self
    }

    pub fn state(&self) -> ViewState {
        self.inner.lock().state.clone()
    }

    /// Nouvelle cible : état `Loading` immédiat, ticket suivant.
    pub fn select(&self, node_id: &str) -> FetchTicket {
        let mut inner = self.inner.lock();
        inner.seq += 1;
        inner.state = ViewState::Loading {
            node_id: node_id.to_string(),
        };
        debug!("[view] select {} (seq {})", node_id, inner.seq);
        FetchTicket {
            seq: inner.seq,
            node_id: node_id.to_string(),
        }
    }

    /// Applique un résultat s'il correspond encore à la cible courante.
    pub fn commit(&self, ticket: &FetchTicket, outcome: Result<NodePage, TelemetryError>) -> bool {
        let mut inner = self.inner.lock();
        if inner.seq != ticket.seq {
            info!(
                "[view] discarding stale response for {} (seq {} < {})",
                ticket.node_id, ticket.seq, inner.seq
            );
            if let Some(health) = &self.health {
                health.record_stale_discard();
            }
            return false;
        }
        if let Some(health) = &self.health {
            health.record_fetch(outcome.is_ok());
        }
        inner.state = resolve(&ticket.node_id, outcome);
        true
    }

    /// Exécute le fetch d'un ticket puis tente le commit.
    pub async fn load(&self, ticket: &FetchTicket) -> bool {
        let outcome = fetch_node_page(self.source.as_ref(), &ticket.node_id, self.kind).await;
        self.commit(ticket, outcome)
    }

    pub async fn navigate(&self, node_id: &str) -> ViewState {
        let ticket = self.select(node_id);
        self.load(&ticket).await;
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GatewayObservation, NodeIdentityMap, ReportTime};
    use std::collections::{BTreeMap, HashMap};
    use std::time::Duration;

    /// Source minimale : latence par id pour provoquer des courses.
    #[derive(Default)]
    struct FakeSource {
        identities: HashMap<String, NodeIdentity>,
        samples: HashMap<String, Vec<CoverageSample>>,
        delays_ms: HashMap<String, u64>,
        broken_samples: bool,
    }

    impl FakeSource {
        fn with_node(mut self, id: &str, samples: Vec<CoverageSample>) -> Self {
            self.identities.insert(
                id.to_string(),
                NodeIdentity {
                    id: id.to_string(),
                    long_name: format!("Node {id}"),
                    short_name: id.to_string(),
                    mac_address: String::new(),
                    hardware_model: String::new(),
                    role: None,
                    hop_start: Some(3),
                    updated_at: 1,
                },
            );
            self.samples.insert(id.to_string(), samples);
            self
        }

        async fn pause(&self, id: &str) {
            if let Some(ms) = self.delays_ms.get(id) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
        }
    }

    impl TelemetrySource for FakeSource {
        async fn get_node_identity(&self, id: &str) -> Result<NodeIdentity, TelemetryError> {
            self.pause(id).await;
            self.identities
                .get(id)
                .cloned()
                .ok_or_else(|| TelemetryError::NotFound(id.to_string()))
        }

        async fn get_node_samples(
            &self,
            id: &str,
            limit: usize,
        ) -> Result<Vec<CoverageSample>, TelemetryError> {
            self.pause(id).await;
            if self.broken_samples {
                return Err(serde_json::from_str::<Vec<CoverageSample>>("[").unwrap_err().into());
            }
            let mut all = self.samples.get(id).cloned().unwrap_or_default();
            all.truncate(limit);
            Ok(all)
        }

        async fn get_all_node_identities(&self) -> Result<NodeIdentityMap, TelemetryError> {
            Ok(self.identities.clone().into_iter().collect())
        }
    }

    fn heard_by(gateway: &str, time: i64) -> CoverageSample {
        let mut gateways = BTreeMap::new();
        gateways.insert(
            gateway.to_string(),
            GatewayObservation {
                long_name: "Gateway".into(),
                latitude: Some(2.0),
                longitude: Some(2.0),
                altitude: None,
                time: ReportTime::Millis(time),
            },
        );
        CoverageSample {
            latitude: 1.0,
            longitude: 1.0,
            altitude: None,
            time: ReportTime::Millis(time),
            gateways,
        }
    }

    #[tokio::test]
    async fn test_detail_page() {
        let source = FakeSource::default().with_node("3b46b95c", vec![heard_by("g1", 2000), heard_by("g1", 1000)]);
        let page = fetch_node_page(&source, "3b46b95c", ViewKind::Detail).await.unwrap();
        let NodePage::Detail(detail) = page else { panic!("expected detail page") };
        assert_eq!(detail.decimal_id, Some(994_490_716));
        assert_eq!(detail.links.len(), 4);
        assert_eq!(detail.preview.unwrap().markers.len(), 2);
        assert_eq!(detail.position_time.as_deref(), Some("1970-01-01T00:00:02Z"));
    }

    #[tokio::test]
    async fn test_coverage_page_without_data() {
        let source = FakeSource::default().with_node("n1", vec![heard_by("n1", 1000)]);
        let page = fetch_node_page(&source, "n1", ViewKind::Coverage { limit: 10 }).await.unwrap();
        let NodePage::Coverage(cov) = page else { panic!("expected coverage page") };
        assert!(!cov.has_data);
        assert!(cov.overlay.markers.is_empty());
    }

    #[tokio::test]
    async fn test_self_reception_filtered_by_requested_id() {
        let mut source = FakeSource::default().with_node("n1", vec![heard_by("n1", 1000)]);
        if let Some(identity) = source.identities.get_mut("n1") {
            identity.id = "!n1".into();
        }
        let page = fetch_node_page(&source, "n1", ViewKind::Coverage { limit: 10 }).await.unwrap();
        let NodePage::Coverage(cov) = page else { panic!("expected coverage page") };
        assert_eq!(cov.identity.id, "!n1");
        assert!(!cov.has_data);
    }

    #[tokio::test]
    async fn test_join_fails_as_a_whole() {
        let mut source = FakeSource::default().with_node("n1", vec![]);
        source.broken_samples = true;
        let view = NodeView::new(Arc::new(source), ViewKind::Coverage { limit: 10 });

        let state = view.navigate("n1").await;
        let ViewState::NotFound(page) = state else { panic!("expected not found") };
        assert_eq!(page.node_id, "n1");
        assert_eq!(page.links.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_node_reaches_terminal_state() {
        let view = NodeView::new(Arc::new(FakeSource::default()), ViewKind::Detail);
        assert_eq!(view.state(), ViewState::Idle);

        let state = view.navigate("abcd").await;
        assert!(state.is_terminal());
        assert_eq!(state, ViewState::NotFound(NotFoundPage::for_node("abcd")));
    }

    #[tokio::test]
    async fn test_select_resets_to_loading() {
        let source = FakeSource::default().with_node("a", vec![]);
        let view = NodeView::new(Arc::new(source), ViewKind::Detail);
        view.navigate("a").await;
        view.select("b");
        assert_eq!(view.state(), ViewState::Loading { node_id: "b".into() });
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let mut source = FakeSource::default()
            .with_node("old", vec![heard_by("g1", 1000)])
            .with_node("new", vec![heard_by("g2", 2000)]);
        source.delays_ms.insert("old".into(), 50);
        let health = HealthTracker::new("test");
        let view = Arc::new(
            NodeView::new(Arc::new(source), ViewKind::Coverage { limit: 10 }).with_health(health.clone()),
        );

        let old_ticket = view.select("old");
        let slow = {
            let view = view.clone();
            let ticket = old_ticket.clone();
            tokio::spawn(async move { view.load(&ticket).await })
        };

        let new_ticket = view.select("new");
        assert!(view.load(&new_ticket).await);
        assert!(!slow.await.unwrap());

        let ViewState::Ready(NodePage::Coverage(cov)) = view.state() else { panic!("expected coverage") };
        assert_eq!(cov.identity.id, "new");
        assert_eq!(health.snapshot().stale_responses_discarded, 1);
    }

    #[test]
    fn test_commit_out_of_order_ticket() {
        let view = NodeView::new(Arc::new(FakeSource::default()), ViewKind::Detail);
        let first = view.select("a");
        let second = view.select("b");
        assert!(!view.commit(&first, Err(TelemetryError::NotFound("a".into()))));
        assert_eq!(view.state(), ViewState::Loading { node_id: "b".into() });
        assert!(view.commit(&second, Err(TelemetryError::NotFound("b".into()))));
        assert!(view.state().is_terminal());
    }
}
