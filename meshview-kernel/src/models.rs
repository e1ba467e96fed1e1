/**
 * MODELS - Enregistrements bruts de la télémétrie mesh
 *
 * RÔLE : Types désérialisés depuis le Telemetry Source (identités de nœuds,
 * échantillons de position avec leurs observations gateway).
 *
 * Les enregistrements sont immuables une fois récupérés : la normalisation
 * (rôle par défaut, exclusion des nœuds jamais vus) produit de nouveaux types
 * dans `fleet`, elle ne modifie jamais ces structures.
 */

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Identité d'un nœud mesh telle que publiée par `/node/info/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeIdentity {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_name: String,
    #[serde(rename = "macaddr", default, deserialize_with = "null_as_default")]
    pub mac_address: String,
    #[serde(rename = "hwModel", default, deserialize_with = "null_as_default")]
    pub hardware_model: String,
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Option<Role>,
    #[serde(default)]
    pub hop_start: Option<i64>,
    /// Epoch millisecondes ; `<= 0` signifie "jamais reporté".
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: i64,
}

impl NodeIdentity {
    pub fn has_reported(&self) -> bool {
        self.updated_at > 0
    }
}

/// Snapshot complet `/node/infos`, ordonné par id.
pub type NodeIdentityMap = BTreeMap<String, NodeIdentity>;

/// Mode de fonctionnement d'un nœud.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    ClientMute,
    ClientHidden,
    Router,
    RouterClient,
    RouterLate,
    Repeater,
    Tracker,
    Sensor,
    Tak,
    TakTracker,
    LostAndFound,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Client => "CLIENT",
            Role::ClientMute => "CLIENT_MUTE",
            Role::ClientHidden => "CLIENT_HIDDEN",
            Role::Router => "ROUTER",
            Role::RouterClient => "ROUTER_CLIENT",
            Role::RouterLate => "ROUTER_LATE",
            Role::Repeater => "REPEATER",
            Role::Tracker => "TRACKER",
            Role::Sensor => "SENSOR",
            Role::Tak => "TAK",
            Role::TakTracker => "TAK_TRACKER",
            Role::LostAndFound => "LOST_AND_FOUND",
            Role::Other(raw) => raw,
        }
    }

    /// Libellé lisible (`CLIENT_MUTE` -> `Client Mute`).
    pub fn label(&self) -> String {
        humanize(self.as_str())
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Client
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            "CLIENT" => Role::Client,
            "CLIENT_MUTE" => Role::ClientMute,
            "CLIENT_HIDDEN" => Role::ClientHidden,
            "ROUTER" => Role::Router,
            "ROUTER_CLIENT" => Role::RouterClient,
            "ROUTER_LATE" => Role::RouterLate,
            "REPEATER" => Role::Repeater,
            "TRACKER" => Role::Tracker,
            "SENSOR" => Role::Sensor,
            "TAK" => Role::Tak,
            "TAK_TRACKER" => Role::TakTracker,
            "LOST_AND_FOUND" => Role::LostAndFound,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::from(raw.as_str()))
    }
}

// null, "" et absent sont équivalents côté amont
fn deserialize_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Role>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|r| !r.trim().is_empty())
        .map(|r| Role::from(r.as_str())))
}

/// Transforme un identifiant en libellé : `CLIENT_MUTE`, `client-mute`
/// et `clientMute` donnent tous `Client Mute`.
pub fn humanize(raw: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in raw.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let lower = w.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Horodatage d'un rapport : texte RFC 3339 ou epoch millisecondes selon le producteur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportTime {
    Millis(i64),
    Text(String),
}

impl ReportTime {
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            ReportTime::Millis(ms) => Some(*ms),
            ReportTime::Text(txt) => OffsetDateTime::parse(txt.trim(), &Rfc3339)
                .ok()
                .map(|dt| (dt.unix_timestamp_nanos() / 1_000_000) as i64),
        }
    }

    /// Clé stable : millisecondes si parsable, texte brut sinon.
    pub fn key(&self) -> String {
        match (self.as_millis(), self) {
            (Some(ms), _) => ms.to_string(),
            (None, ReportTime::Text(txt)) => txt.clone(),
            (None, ReportTime::Millis(ms)) => ms.to_string(),
        }
    }

    pub fn to_rfc3339(&self) -> Option<String> {
        let ms = self.as_millis()?;
        OffsetDateTime::from_unix_timestamp_nanos(ms as i128 * 1_000_000)
            .ok()?
            .format(&Rfc3339)
            .ok()
    }
}

impl Default for ReportTime {
    fn default() -> Self {
        ReportTime::Text(String::new())
    }
}

/// Un rapport de position, avec les gateways qui l'ont entendu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSample {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub time: ReportTime,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gateways: BTreeMap<String, GatewayObservation>,
}

impl CoverageSample {
    /// Ids des gateways autres que le nœud lui-même.
    pub fn foreign_gateways<'a>(
        &'a self,
        subject_id: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a GatewayObservation)> + 'a {
        self.gateways.iter().filter(move |(id, _)| id.as_str() != subject_id)
    }
}

/// Réception d'un rapport par un nœud tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayObservation {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub time: ReportTime,
}

impl GatewayObservation {
    /// Coordonnées exploitables ; 0 est la valeur "pas de fix" du mesh.
    pub fn located(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => Some((lat, lon)),
            _ => None,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
