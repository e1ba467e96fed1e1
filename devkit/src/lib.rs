/*!
# Meshview DevKit - Stubs et Utilitaires pour Développement

Bibliothèque facilitant les tests du kernel sans service de télémétrie réel:
- Source de télémétrie mémoire (délais, pannes, journal d'appels)
- Builders de nœuds et de rapports de couverture
- Harness HTTP servant le router du kernel sur un port local
*/

pub mod fixtures;
pub mod telemetry_stub;
pub mod test_utils;

pub use fixtures::{NodeBuilder, SampleBuilder};
pub use telemetry_stub::MockTelemetrySource;
pub use test_utils::TestHarness;
