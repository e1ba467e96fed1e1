/**
 * API REST MESHVIEW - Exposition JSON des modèles de vue
 *
 * RÔLE :
 * Interface lecture seule entre le frontend (carte, table, recherche) et les
 * moteurs du kernel. Chaque requête tire les données à la demande depuis le
 * Telemetry Source : aucun cache entre deux navigations.
 *
 * ROUTES :
 * - /health, /system/health
 * - /fleet : table filtrable/triable + facets
 * - /search?q= : typeahead sur le snapshot brut
 * - /nodes/{id}, /nodes/{id}/coverage : pages nœud (404 + liens si introuvable)
 */

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::fleet::{self, FacetSeed};
use crate::health::{HealthTracker, KernelHealth};
use crate::search::{NavigationTarget, SearchIndex};
use crate::table::{ColumnId, FleetFacet, FleetRow, FleetTable, SortEntry};
use crate::telemetry::{TelemetryError, TelemetrySource};
use crate::view::{fetch_node_page, resolve, ViewKind, ViewState};

pub struct AppState<S> {
    pub source: Arc<S>,
    pub health_tracker: HealthTracker,
    pub coverage_limit: usize,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            health_tracker: self.health_tracker.clone(),
            coverage_limit: self.coverage_limit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetPage {
    pub total: usize,
    pub visible: usize,
    pub sorting: Vec<SortEntry>,
    pub rows: Vec<FleetRow>,
    pub facets: Vec<FleetFacet>,
    pub seeds: Vec<FacetSeed>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub short_name: String,
    pub long_name: String,
    pub target: NavigationTarget,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn upstream_error(e: TelemetryError) -> ApiError {
    warn!("[http] upstream failure: {}", e);
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({ "ok": false, "msg": e.to_string() })),
    )
}

pub fn build_router<S: TelemetrySource + 'static>(app_state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/system/health", get(get_system_health::<S>))
        .route("/fleet", get(get_fleet::<S>))
        .route("/search", get(search_nodes::<S>))
        .route("/nodes/{id}", get(get_node::<S>))
        .route("/nodes/{id}/coverage", get(get_node_coverage::<S>))
        .with_state(app_state)
}

// GET /system/health
async fn get_system_health<S: TelemetrySource>(State(app): State<AppState<S>>) -> Json<KernelHealth> {
    Json(app.health_tracker.snapshot())
}

/// Applique `sort=col[:asc|:desc],...` et `<colonne>=<valeur>` sur une table neuve.
pub fn apply_params(table: &mut FleetTable, params: &HashMap<String, String>) {
    for (key, value) in params {
        if key == "sort" {
            let entries: Vec<SortEntry> = value
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .filter_map(|entry| {
                    let (col, dir) = entry.trim().split_once(':').unwrap_or((entry.trim(), "asc"));
                    let column = col.parse::<ColumnId>().ok()?;
                    Some(SortEntry { column, desc: dir.eq_ignore_ascii_case("desc") })
                })
                .collect();
            table.set_sorting(entries);
        } else if let Ok(column) = key.parse::<ColumnId>() {
            table.set_filter(column, value.as_str().into());
        }
        // autres paramètres ignorés
    }
}

// GET /fleet
async fn get_fleet<S: TelemetrySource>(
    State(app): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<FleetPage>, ApiError> {
    let snapshot = app.source.get_all_node_identities().await;
    app.health_tracker.record_fetch(snapshot.is_ok());
    let snapshot = snapshot.map_err(upstream_error)?;

    let index = fleet::build(&snapshot);
    let seeds = index.facets.clone();
    let now_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let mut table = FleetTable::from_index(index, now_ms);
    apply_params(&mut table, &params);

    let rows = table.rows();
    info!("[http] fleet: {} of {} rows visible", rows.len(), table.len());
    Ok(Json(FleetPage {
        total: table.len(),
        visible: rows.len(),
        sorting: table.sorting().to_vec(),
        rows,
        facets: table.facets(),
        seeds,
    }))
}

// GET /search?q=
async fn search_nodes<S: TelemetrySource>(
    State(app): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let snapshot = app.source.get_all_node_identities().await;
    app.health_tracker.record_fetch(snapshot.is_ok());
    let index = SearchIndex::from_snapshot(&snapshot.map_err(upstream_error)?);

    let query = params.get("q").map(String::as_str).unwrap_or_default();
    let hits = index
        .search(query)
        .into_iter()
        .map(|node| SearchHit {
            id: node.id.clone(),
            short_name: node.short_name.clone(),
            long_name: node.long_name.clone(),
            target: NavigationTarget::for_node(&node.id),
        })
        .collect();
    Ok(Json(hits))
}

async fn node_page<S: TelemetrySource>(app: &AppState<S>, id: &str, kind: ViewKind) -> (StatusCode, Json<ViewState>) {
    let outcome = fetch_node_page(app.source.as_ref(), id, kind).await;
    app.health_tracker.record_fetch(outcome.is_ok());
    let state = resolve(id, outcome);
    let code = match state {
        ViewState::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    (code, Json(state))
}

// GET /nodes/{id}
async fn get_node<S: TelemetrySource>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ViewState>) {
    node_page(&app, &id, ViewKind::Detail).await
}

// GET /nodes/{id}/coverage
async fn get_node_coverage<S: TelemetrySource>(
    State(app): State<AppState<S>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ViewState>) {
    let limit = app.coverage_limit;
    node_page(&app, &id, ViewKind::Coverage { limit }).await
}
