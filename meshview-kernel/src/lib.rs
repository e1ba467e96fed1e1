/*!
# Meshview Kernel

Cœur de données de la visualisation de télémétrie mesh :
- index de fleet et facets de rôle
- recherche typeahead insensible aux accents
- moteur de table (tri multi-colonnes, filtres croisés, facets)
- agrégation de couverture (marqueurs + segments passerelle)
- vues nœud protégées contre les réponses périmées
*/

pub mod config;
pub mod coverage;
pub mod fleet;
pub mod health;
pub mod http;
pub mod links;
pub mod models;
pub mod search;
pub mod table;
pub mod telemetry;
pub mod view;

pub use http::{build_router, AppState};
pub use telemetry::{HttpTelemetrySource, TelemetryError, TelemetrySource};
