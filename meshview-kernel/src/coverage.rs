/**
 * COVERAGE AGGREGATOR - Rapports de position -> overlay carte
 *
 * RÔLE : Construit les marqueurs (position du nœud, gateways) et les segments
 * nœud <-> gateway à partir de l'historique des rapports d'un nœud.
 *
 * FONCTIONNEMENT :
 * - Rapport sans gateway tiers (vide ou seulement le nœud lui-même) ignoré
 * - Un marqueur gateway par id gateway (premier vu gagne)
 * - Un segment par couple (gateway, rapport), jamais dédupliqué
 * - Séquence de marqueurs inversée : le premier traité est dessiné au-dessus
 */

use crate::models::{CoverageSample, GatewayObservation};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    NodePosition,
    Gateway,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub key: String,
    pub kind: MarkerKind,
    pub position: LatLng,
    pub altitude: Option<f64>,
    /// Nom long de la gateway, absent pour une position du nœud.
    pub label: Option<String>,
    pub gateway_id: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub key: String,
    pub gateway_id: String,
    pub from: LatLng,
    pub to: LatLng,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageOverlay {
    pub center: Option<LatLng>,
    pub markers: Vec<Marker>,
    pub edges: Vec<Edge>,
}

impl CoverageOverlay {
    pub fn count(&self, kind: MarkerKind) -> usize {
        self.markers.iter().filter(|m| m.kind == kind).count()
    }

    /// Vide = aucun marqueur de position : l'appelant affiche "pas de données".
    pub fn is_empty(&self) -> bool {
        self.count(MarkerKind::NodePosition) == 0
    }
}

fn position_marker(sample: &CoverageSample, time_key: &str) -> Marker {
    Marker {
        key: format!("position-{time_key}"),
        kind: MarkerKind::NodePosition,
        position: LatLng::new(sample.latitude, sample.longitude),
        altitude: sample.altitude,
        label: None,
        gateway_id: None,
        time: sample.time.to_rfc3339(),
    }
}

fn gateway_marker(id: &str, gateway: &GatewayObservation, at: LatLng, time_key: &str) -> Marker {
    Marker {
        key: format!("gateway-{id}-{time_key}"),
        kind: MarkerKind::Gateway,
        position: at,
        altitude: gateway.altitude,
        label: Some(gateway.long_name.clone()),
        gateway_id: Some(id.to_string()),
        time: gateway.time.to_rfc3339(),
    }
}

/// Agrège les rapports (plus récent d'abord) d'un nœud `subject_id`.
pub fn aggregate(samples: &[CoverageSample], subject_id: &str) -> CoverageOverlay {
    let mut markers = Vec::new();
    let mut edges = Vec::new();
    let mut seen_gateways: HashSet<&str> = HashSet::new();

    for sample in samples {
        if sample.foreign_gateways(subject_id).next().is_none() {
            continue;
        }

        let time_key = sample.time.key();
        let from = LatLng::new(sample.latitude, sample.longitude);
        markers.push(position_marker(sample, &time_key));

        for (gateway_id, gateway) in sample.foreign_gateways(subject_id) {
            let Some((lat, lon)) = gateway.located() else { continue };
            let to = LatLng::new(lat, lon);

            if seen_gateways.insert(gateway_id.as_str()) {
                markers.push(gateway_marker(gateway_id, gateway, to, &time_key));
            }
            edges.push(Edge {
                key: format!("line-{gateway_id}-{time_key}"),
                gateway_id: gateway_id.clone(),
                from,
                to,
            });
        }
    }

    markers.reverse();

    CoverageOverlay {
        center: samples.first().map(|s| LatLng::new(s.latitude, s.longitude)),
        markers,
        edges,
    }
}

/// Aperçu d'un seul rapport : un marqueur par observation, sans déduplication
/// ni filtrage du nœud lui-même.
///
/// Comme pour `aggregate`, une observation sans coordonnées ou à (0, 0)
/// (pas de fix) ne produit aucun marqueur.
pub fn preview(sample: &CoverageSample) -> CoverageOverlay {
    let time_key = sample.time.key();
    let mut markers = vec![position_marker(sample, &time_key)];
    markers.extend(sample.gateways.iter().filter_map(|(id, gateway)| {
        gateway
            .located()
            .map(|(lat, lon)| gateway_marker(id, gateway, LatLng::new(lat, lon), &time_key))
    }));

    CoverageOverlay {
        center: Some(LatLng::new(sample.latitude, sample.longitude)),
        markers,
        edges: Vec::new(),
    }
}
