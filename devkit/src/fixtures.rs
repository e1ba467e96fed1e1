/*!
Builders de données de test

Construisent des `NodeIdentity` et `CoverageSample` sans répéter tous les champs,
plus des payloads bruts tels que le service amont les émet (caractères de contrôle compris).
*/

use meshview_kernel::models::{CoverageSample, GatewayObservation, NodeIdentity, ReportTime, Role};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub struct NodeBuilder {
    node: NodeIdentity,
}

impl NodeBuilder {
    /// Nœud ayant déjà émis (updatedAt = 1).
    pub fn new(id: &str) -> Self {
        Self {
            node: NodeIdentity {
                id: id.to_string(),
                long_name: String::new(),
                short_name: String::new(),
                mac_address: String::new(),
                hardware_model: String::new(),
                role: None,
                hop_start: None,
                updated_at: 1,
            },
        }
    }

    pub fn long_name(mut self, name: &str) -> Self {
        self.node.long_name = name.to_string();
        self
    }

    pub fn short_name(mut self, name: &str) -> Self {
        self.node.short_name = name.to_string();
        self
    }

    pub fn hw_model(mut self, model: &str) -> Self {
        self.node.hardware_model = model.to_string();
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.node.role = Some(role);
        self
    }

    pub fn hop_start(mut self, hops: i64) -> Self {
        self.node.hop_start = Some(hops);
        self
    }

    pub fn updated_at(mut self, ms: i64) -> Self {
        self.node.updated_at = ms;
        self
    }

    pub fn never_reported(self) -> Self {
        self.updated_at(0)
    }

    pub fn build(self) -> NodeIdentity {
        self.node
    }
}

pub struct SampleBuilder {
    sample: CoverageSample,
}

impl SampleBuilder {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            sample: CoverageSample {
                latitude,
                longitude,
                altitude: None,
                time: ReportTime::default(),
                gateways: BTreeMap::new(),
            },
        }
    }

    pub fn time_ms(mut self, ms: i64) -> Self {
        self.sample.time = ReportTime::Millis(ms);
        self
    }

    pub fn altitude(mut self, meters: f64) -> Self {
        self.sample.altitude = Some(meters);
        self
    }

    /// Gateway ayant entendu le rapport, coordonnées (0, 0) = pas de fix.
    pub fn gateway(mut self, id: &str, long_name: &str, latitude: f64, longitude: f64) -> Self {
        self.sample.gateways.insert(
            id.to_string(),
            GatewayObservation {
                long_name: long_name.to_string(),
                latitude: Some(latitude),
                longitude: Some(longitude),
                altitude: None,
                time: self.sample.time.clone(),
            },
        );
        self
    }

    pub fn build(self) -> CoverageSample {
        self.sample
    }
}

/// Petite fleet mixte : deux clients, un routeur, un nœud muet, un nœud sans rôle.
pub fn sample_fleet() -> Vec<NodeIdentity> {
    vec![
        NodeBuilder::new("a1b2c3d4").long_name("Café Relay").short_name("CAFE").hw_model("TBEAM").role(Role::Router).hop_start(3).updated_at(3_000).build(),
        NodeBuilder::new("0badf00d").long_name("Hilltop").short_name("HILL").hw_model("RAK4631").role(Role::Client).hop_start(7).updated_at(2_000).build(),
        NodeBuilder::new("3b46b95c").long_name("Harbor Base").short_name("HRBR").hw_model("RAK4631").role(Role::Client).updated_at(1_000).build(),
        NodeBuilder::new("deadbeef").long_name("Ghost").short_name("GHST").never_reported().build(),
        NodeBuilder::new("c0ffee00").long_name("Roleless").short_name("ROLE").hw_model("TBEAM").hop_start(3).updated_at(500).build(),
    ]
}

/// Corps JSON d'une identité, tel que servi par `/node/info/{id}`.
pub fn identity_payload(id: &str, long_name: &str) -> Value {
    json!({
        "id": id,
        "longName": long_name,
        "shortName": "TEST",
        "macaddr": "aa:bb:cc:dd:ee:ff",
        "hwModel": "TBEAM",
        "role": "ROUTER_CLIENT",
        "hopStart": 3,
        "updatedAt": 1_700_000_000_000_i64,
    })
}

/// Sérialise `payload` puis glisse des caractères de contrôle entre les tokens et dans les chaînes.
pub fn dirty_json(payload: &Value) -> String {
    payload
        .to_string()
        .replace(':', ":\u{1}")
        .replace(',', "\u{7f},\u{85}")
}
