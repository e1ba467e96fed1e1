/**
 * FLEET INDEX BUILDER - Normalisation du snapshot d'identités
 *
 * RÔLE : Transforme `/node/infos` en working set ordonné pour la table fleet,
 * applique le rôle par défaut et dérive le vocabulaire du facet "role".
 *
 * FONCTIONNEMENT :
 * - Exclut les nœuds dont `updatedAt <= 0` (jamais reportés)
 * - Rôle absent -> `CLIENT`, sur une copie : le snapshot reste intact
 * - Vocabulaire des rôles préfixé par la pseudo-valeur `ALL`
 */

use crate::models::{NodeIdentity, NodeIdentityMap, Role};
use crate::table::ColumnId;
use serde::Serialize;
use tracing::debug;

/// Pseudo-valeur de facet : aucun filtre.
pub const ALL: &str = "ALL";

/// Ligne normalisée de la fleet : le rôle est toujours renseigné.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetNode {
    pub id: String,
    pub long_name: String,
    pub short_name: String,
    pub mac_address: String,
    pub hardware_model: String,
    pub role: Role,
    pub hop_start: Option<i64>,
    pub updated_at: i64,
}

impl FleetNode {
    pub fn normalize(identity: &NodeIdentity) -> Self {
        Self {
            id: identity.id.clone(),
            long_name: identity.long_name.clone(),
            short_name: identity.short_name.clone(),
            mac_address: identity.mac_address.clone(),
            hardware_model: identity.hardware_model.clone(),
            role: identity.role.clone().unwrap_or_default(),
            hop_start: identity.hop_start,
            updated_at: identity.updated_at,
        }
    }
}

/// Option d'un sélecteur de facet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetOption {
    pub key: String,
    pub label: String,
}

/// Vocabulaire initial d'une colonne filtrable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetSeed {
    pub column: ColumnId,
    pub options: Vec<FacetOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetIndex {
    pub nodes: Vec<FleetNode>,
    pub facets: Vec<FacetSeed>,
}

impl FleetIndex {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn seed(&self, column: ColumnId) -> Option<&FacetSeed> {
        self.facets.iter().find(|s| s.column == column)
    }
}

/// Construit le working set de la fleet à partir d'un snapshot.
pub fn build(identities: &NodeIdentityMap) -> FleetIndex {
    let nodes: Vec<FleetNode> = identities
        .values()
        .filter(|identity| identity.has_reported())
        .map(FleetNode::normalize)
        .collect();

    debug!(
        "[fleet] {} of {} identities kept",
        nodes.len(),
        identities.len()
    );

    if nodes.is_empty() {
        return FleetIndex::default();
    }

    let facets = vec![role_seed(&nodes)];
    FleetIndex { nodes, facets }
}

// ordre de première apparition dans le working set
fn role_seed(nodes: &[FleetNode]) -> FacetSeed {
    let mut distinct: Vec<&Role> = Vec::new();
    for node in nodes {
        if !distinct.contains(&&node.role) {
            distinct.push(&node.role);
        }
    }

    let mut options = vec![FacetOption {
        key: ALL.to_string(),
        label: "Show All Roles".to_string(),
    }];
    options.extend(distinct.into_iter().map(|role| FacetOption {
        key: role.as_str().to_string(),
        label: role.label(),
    }));

    FacetSeed {
        column: ColumnId::Role,
        options,
    }
}
