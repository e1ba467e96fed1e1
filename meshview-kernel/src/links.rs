//! Liens vers les outils de visualisation tiers, dérivés uniquement de l'id.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub label: &'static str,
    pub url: String,
}

/// Id décimal (parse base 16), `!` de tête toléré.
pub fn decimal_id(hex_id: &str) -> Option<u64> {
    let trimmed = hex_id.trim().trim_start_matches('!');
    if trimmed.is_empty() {
        return None;
    }
    u64::from_str_radix(trimmed, 16).ok()
}

pub fn external_links(hex_id: &str) -> Vec<ExternalLink> {
    let mut links = vec![ExternalLink {
        label: "Bayme.sh Map",
        url: format!("https://data.bayme.sh/node?id={hex_id}"),
    }];

    if let Some(dec) = decimal_id(hex_id) {
        links.extend([
            ExternalLink {
                label: "Armooo Meshview",
                url: format!("https://meshview.armooo.net/packet_list/{dec}"),
            },
            ExternalLink {
                label: "Liam's Map",
                url: format!("https://meshtastic.liamcottle.net/?node_id={dec}"),
            },
            ExternalLink {
                label: "Meshmap.net",
                url: format!("https://meshmap.net/#{dec}"),
            },
        ]);
    }
    links
}
