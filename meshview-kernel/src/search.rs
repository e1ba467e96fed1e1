//! Typeahead search over node identities.
//!
//! Matching is case- and diacritic-insensitive substring containment on the
//! long name, short name or id. The index keeps the raw snapshot (nodes that
//! never reported included), ordered by ascending `updatedAt`.

use crate::models::{NodeIdentity, NodeIdentityMap};
use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Base-sensitivity folding: NFD, combining marks dropped, lowercased.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn matches(node: &NodeIdentity, folded_query: &str) -> bool {
    [&node.long_name, &node.short_name, &node.id]
        .iter()
        .any(|field| fold(field).contains(folded_query))
}

/// Filters `items` in place order; an empty query keeps everything.
pub fn search<'a>(items: &'a [NodeIdentity], query: &str) -> Vec<&'a NodeIdentity> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let folded = fold(query);
    items.iter().filter(|node| matches(node, &folded)).collect()
}

/// Where selecting a hit leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTarget {
    pub node_id: String,
    pub path: String,
}

impl NavigationTarget {
    pub fn for_node(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            path: format!("/node/{node_id}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    items: Vec<NodeIdentity>,
}

impl SearchIndex {
    pub fn new(identities: impl IntoIterator<Item = NodeIdentity>) -> Self {
        let mut items: Vec<NodeIdentity> = identities.into_iter().collect();
        items.sort_by_key(|node| node.updated_at);
        Self { items }
    }

    pub fn from_snapshot(snapshot: &NodeIdentityMap) -> Self {
        Self::new(snapshot.values().cloned())
    }

    pub fn items(&self) -> &[NodeIdentity] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn search(&self, query: &str) -> Vec<&NodeIdentity> {
        search(&self.items, query)
    }

    /// Selecting a hit only yields its navigation target.
    pub fn select(&self, node_id: &str) -> Option<NavigationTarget> {
        self.items
            .iter()
            .find(|node| node.id == node_id)
            .map(|node| NavigationTarget::for_node(&node.id))
    }
}
