/**
 * TELEMETRY SOURCE - Client lecture seule du service de snapshots mesh
 *
 * RÔLE :
 * Trois requêtes : identité d'un nœud, historique borné de ses rapports de
 * position (plus récent d'abord), snapshot de toutes les identités.
 *
 * FONCTIONNEMENT :
 * - `TelemetrySource` = seam abstrait (HTTP en prod, stub mémoire en test)
 * - Corps lus en texte, caractères de contrôle C0/C1 retirés, puis JSON
 * - Aucune relance : une erreur remonte telle quelle à l'appelant
 */

use crate::models::{CoverageSample, NodeIdentity, NodeIdentityMap};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://data.bayme.sh/api";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned HTTP {status} for {path}")]
    Status { status: u16, path: String },
    #[error("payload decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("node not found: {0}")]
    NotFound(String),
}

impl TelemetryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TelemetryError::NotFound(_))
    }
}

/// Surface de requêtes du service de télémétrie.
pub trait TelemetrySource: Send + Sync {
    fn get_node_identity(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<NodeIdentity, TelemetryError>> + Send;

    /// Rapports les plus récents d'abord, tronqués côté serveur à `limit`.
    fn get_node_samples(
        &self,
        id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CoverageSample>, TelemetryError>> + Send;

    fn get_all_node_identities(
        &self,
    ) -> impl Future<Output = Result<NodeIdentityMap, TelemetryError>> + Send;
}

/// Retire les caractères de contrôle C0 (U+0000..U+001F), DEL et C1 (U+0080..U+009F).
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(*c as u32, 0x00..=0x1F | 0x7F..=0x9F))
        .collect()
}

/// Décode un corps brut après nettoyage.
pub fn decode_payload<T: DeserializeOwned>(text: &str) -> Result<T, TelemetryError> {
    let cleaned = strip_control_chars(text);
    Ok(serde_json::from_str(&cleaned)?)
}

/// Décode une identité ; `null` ou `{}` signifient "nœud inconnu".
pub fn decode_identity(id: &str, text: &str) -> Result<NodeIdentity, TelemetryError> {
    let value: serde_json::Value = decode_payload(text)?;
    let unknown = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if unknown {
        return Err(TelemetryError::NotFound(id.to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Implémentation HTTP (`reqwest`) du Telemetry Source.
#[derive(Debug, Clone)]
pub struct HttpTelemetrySource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTelemetrySource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn api_get(&self, path: &str) -> Result<String, TelemetryError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[telemetry] GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TelemetryError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(TelemetryError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

impl Default for HttpTelemetrySource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TelemetrySource for HttpTelemetrySource {
    async fn get_node_identity(&self, id: &str) -> Result<NodeIdentity, TelemetryError> {
        let text = self
            .api_get(&format!("/node/info/{id}"))
            .await
            .map_err(|e| match e {
                TelemetryError::NotFound(_) => TelemetryError::NotFound(id.to_string()),
                other => other,
            })?;
        decode_identity(id, &text)
    }

    async fn get_node_samples(
        &self,
        id: &str,
        limit: usize,
    ) -> Result<Vec<CoverageSample>, TelemetryError> {
        let text = self.api_get(&format!("/coverage/{id}?limit={limit}")).await?;
        let samples: Option<Vec<CoverageSample>> = decode_payload(&text)?;
        Ok(samples.unwrap_or_default())
    }

    async fn get_all_node_identities(&self) -> Result<NodeIdentityMap, TelemetryError> {
        let text = self.api_get("/node/infos").await?;
        let map: Option<NodeIdentityMap> = decode_payload(&text)?;
        Ok(map.unwrap_or_default())
    }
}
