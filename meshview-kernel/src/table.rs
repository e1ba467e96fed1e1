/**
 * FLEET TABLE ENGINE - Filtre + tri + facets sur la fleet normalisée
 *
 * RÔLE :
 * Moteur à état qui produit les lignes visibles de la table fleet et les
 * facets (valeurs distinctes + occurrences) des colonnes filtrables.
 *
 * FONCTIONNEMENT :
 * - Table déclarative de colonnes (`COLUMNS`) : type de filtre, sens de tri
 *   initial, éligibilité facet. Aucun concept de rendu ici.
 * - Filtres : au plus un par colonne, conjonction de tous les filtres actifs.
 *   Égalité stricte sur colonnes catégorielles, égalité "coercitive" sur
 *   colonnes numériques.
 * - Tri : mono-colonne par défaut, multi-colonne sur demande explicite.
 *   Les valeurs absentes sont toujours en fin, quel que soit le sens.
 * - Facets d'une colonne X calculées sur les lignes qui satisfont tous les
 *   filtres sauf celui de X.
 */

use crate::fleet::{FleetIndex, FleetNode, ALL};
use crate::search::NavigationTarget;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    Id,
    ShortName,
    LongName,
    HwModel,
    Role,
    HopStart,
    UpdatedAt,
}

impl ColumnId {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Id => "id",
            ColumnId::ShortName => "shortName",
            ColumnId::LongName => "longName",
            ColumnId::HwModel => "hwModel",
            ColumnId::Role => "role",
            ColumnId::HopStart => "hopStart",
            ColumnId::UpdatedAt => "updatedAt",
        }
    }

    pub fn descriptor(self) -> &'static ColumnDescriptor {
        COLUMNS
            .iter()
            .find(|c| c.id == self)
            .unwrap_or(&COLUMNS[0])
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COLUMNS
            .iter()
            .map(|c| c.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown column '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// Égalité stricte.
    Categorical,
    /// Égalité avec coercition texte -> nombre.
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub header: &'static str,
    pub filter: FilterKind,
    /// `false` : le premier clic trie en ascendant.
    pub sort_desc_first: bool,
    pub facetable: bool,
}

pub static COLUMNS: [ColumnDescriptor; 7] = [
    ColumnDescriptor { id: ColumnId::Id, header: "Hex Id", filter: FilterKind::Categorical, sort_desc_first: false, facetable: false },
    ColumnDescriptor { id: ColumnId::ShortName, header: "Short Name", filter: FilterKind::Categorical, sort_desc_first: false, facetable: false },
    ColumnDescriptor { id: ColumnId::LongName, header: "Long Name", filter: FilterKind::Categorical, sort_desc_first: false, facetable: false },
    ColumnDescriptor { id: ColumnId::HwModel, header: "Device Model", filter: FilterKind::Categorical, sort_desc_first: false, facetable: true },
    ColumnDescriptor { id: ColumnId::Role, header: "Device Mode", filter: FilterKind::Categorical, sort_desc_first: false, facetable: true },
    ColumnDescriptor { id: ColumnId::HopStart, header: "Hop Start", filter: FilterKind::Numeric, sort_desc_first: false, facetable: true },
    ColumnDescriptor { id: ColumnId::UpdatedAt, header: "Last Updated", filter: FilterKind::Numeric, sort_desc_first: false, facetable: false },
];

/// Valeur d'une cellule ; `Missing` se sérialise en `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(i64),
    Missing,
}

impl CellValue {
    pub fn of(node: &FleetNode, column: ColumnId) -> Self {
        match column {
            ColumnId::Id => CellValue::Text(node.id.clone()),
            ColumnId::ShortName => CellValue::Text(node.short_name.clone()),
            ColumnId::LongName => CellValue::Text(node.long_name.clone()),
            ColumnId::HwModel => CellValue::Text(node.hardware_model.clone()),
            ColumnId::Role => CellValue::Text(node.role.as_str().to_string()),
            ColumnId::HopStart => node.hop_start.map_or(CellValue::Missing, CellValue::Number),
            ColumnId::UpdatedAt => CellValue::Number(node.updated_at),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    fn label(&self, column: ColumnId) -> String {
        match (self, column) {
            (CellValue::Missing, _) => "Unknown".to_string(),
            (CellValue::Text(raw), ColumnId::Role) => crate::models::Role::from(raw.as_str()).label(),
            (CellValue::Text(raw), _) => raw.clone(),
            (CellValue::Number(n), _) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEntry {
    pub column: ColumnId,
    pub desc: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnFilter {
    pub column: ColumnId,
    pub value: String,
}

/// Valeur choisie dans un sélecteur de facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    All,
    Value(String),
}

impl From<&str> for FilterValue {
    fn from(raw: &str) -> Self {
        if raw == ALL {
            FilterValue::All
        } else {
            FilterValue::Value(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetCount {
    pub value: CellValue,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetFacet {
    pub column: ColumnId,
    pub label: &'static str,
    pub values: Vec<FacetCount>,
}

impl FleetFacet {
    pub fn total(&self) -> usize {
        self.values.iter().map(|v| v.count).sum()
    }
}

/// Modèle d'affichage d'une ligne.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetRow {
    pub id: String,
    pub target: NavigationTarget,
    pub short_name: String,
    pub long_name: String,
    pub hw_model: String,
    pub role: String,
    pub hop_start: Option<i64>,
    pub updated_at: i64,
    pub updated_ago: String,
}

#[derive(Debug, Clone)]
pub struct FleetTable {
    nodes: Vec<FleetNode>,
    sorting: Vec<SortEntry>,
    filters: Vec<ColumnFilter>,
    constructed_at_ms: i64,
}

impl FleetTable {
    /// `now_ms` fige la référence de l'affichage "il y a ...".
    pub fn new(nodes: Vec<FleetNode>, now_ms: i64) -> Self {
        Self {
            nodes,
            sorting: vec![SortEntry { column: ColumnId::UpdatedAt, desc: true }],
            filters: Vec::new(),
            constructed_at_ms: now_ms,
        }
    }

    pub fn from_index(index: FleetIndex, now_ms: i64) -> Self {
        Self::new(index.nodes, now_ms)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn sorting(&self) -> &[SortEntry] {
        &self.sorting
    }

    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    pub fn filter_for(&self, column: ColumnId) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.value.as_str())
    }

    /// `ALL` retire le filtre de la colonne ; toute autre valeur le remplace.
    pub fn set_filter(&mut self, column: ColumnId, value: FilterValue) {
        self.filters.retain(|f| f.column != column);
        if let FilterValue::Value(value) = value {
            self.filters.push(ColumnFilter { column, value });
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn set_sorting(&mut self, sorting: Vec<SortEntry>) {
        let mut deduped: Vec<SortEntry> = Vec::with_capacity(sorting.len());
        for entry in sorting {
            if !deduped.iter().any(|e| e.column == entry.column) {
                deduped.push(entry);
            }
        }
        self.sorting = deduped;
    }

    /// Clic simple : remplace le tri courant.
    pub fn toggle_sort(&mut self, column: ColumnId) {
        let current = self.current_direction(column);
        self.sorting = match next_direction(column, current) {
            Some(desc) => vec![SortEntry { column, desc }],
            None => Vec::new(),
        };
    }

    /// Clic multi-tri : ajoute, inverse ou retire la colonne sans toucher aux autres.
    pub fn toggle_sort_multi(&mut self, column: ColumnId) {
        let current = self.current_direction(column);
        match next_direction(column, current) {
            Some(desc) => match self.sorting.iter_mut().find(|e| e.column == column) {
                Some(entry) => entry.desc = desc,
                None => self.sorting.push(SortEntry { column, desc }),
            },
            None => self.sorting.retain(|e| e.column != column),
        }
    }

    fn current_direction(&self, column: ColumnId) -> Option<bool> {
        self.sorting
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.desc)
    }

    fn passes(&self, node: &FleetNode, skip: Option<ColumnId>) -> bool {
        self.filters
            .iter()
            .filter(|f| Some(f.column) != skip)
            .all(|f| filter_matches(&CellValue::of(node, f.column), f.column, &f.value))
    }

    /// Lignes visibles : filtrées puis triées.
    pub fn visible(&self) -> Vec<&FleetNode> {
        let mut rows: Vec<&FleetNode> = self.nodes.iter().filter(|n| self.passes(n, None)).collect();
        // sort_by est stable : l'ordre d'origine départage les égalités
        rows.sort_by(|a, b| compare_rows(a, b, &self.sorting));
        rows
    }

    pub fn rows(&self) -> Vec<FleetRow> {
        self.visible()
            .into_iter()
            .map(|node| FleetRow {
                id: node.id.clone(),
                target: NavigationTarget::for_node(&node.id),
                short_name: node.short_name.clone(),
                long_name: node.long_name.clone(),
                hw_model: node.hardware_model.clone(),
                role: node.role.as_str().to_string(),
                hop_start: node.hop_start,
                updated_at: node.updated_at,
                updated_ago: format_elapsed(self.constructed_at_ms, node.updated_at),
            })
            .collect()
    }

    /// Valeurs distinctes de `column` parmi les lignes qui passent tous les autres filtres,
    /// triées par nombre d'occurrences décroissant.
    pub fn facet(&self, column: ColumnId) -> FleetFacet {
        let mut values: Vec<FacetCount> = Vec::new();
        for node in self.nodes.iter().filter(|n| self.passes(n, Some(column))) {
            let value = CellValue::of(node, column);
            match values.iter_mut().find(|v| v.value == value) {
                Some(existing) => existing.count += 1,
                None => values.push(FacetCount {
                    label: value.label(column),
                    value,
                    count: 1,
                }),
            }
        }
        values.sort_by(|a, b| b.count.cmp(&a.count));

        FleetFacet {
            column,
            label: column.descriptor().header,
            values,
        }
    }

    pub fn facets(&self) -> Vec<FleetFacet> {
        COLUMNS
            .iter()
            .filter(|c| c.facetable)
            .map(|c| self.facet(c.id))
            .collect()
    }
}

// asc -> desc -> aucun (ou l'inverse si la colonne commence en desc)
fn next_direction(column: ColumnId, current: Option<bool>) -> Option<bool> {
    let first = column.descriptor().sort_desc_first;
    match current {
        None => Some(first),
        Some(desc) if desc == first => Some(!first),
        Some(_) => None,
    }
}

fn filter_matches(cell: &CellValue, column: ColumnId, value: &str) -> bool {
    match column.descriptor().filter {
        FilterKind::Categorical => matches!(cell, CellValue::Text(t) if t == value),
        FilterKind::Numeric => weak_equals(cell, value),
    }
}

/// Égalité coercitive : `"3"`, `" 3 "` et `"3.0"` valent 3 ; `""` vaut 0 ; une valeur absente ne vaut rien.
fn weak_equals(cell: &CellValue, value: &str) -> bool {
    match cell {
        CellValue::Missing => false,
        CellValue::Text(t) => t == value,
        CellValue::Number(n) => {
            let trimmed = value.trim();
            let parsed = if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            };
            parsed.is_some_and(|v| v == *n as f64)
        }
    }
}

fn compare_rows(a: &FleetNode, b: &FleetNode, sorting: &[SortEntry]) -> Ordering {
    for entry in sorting {
        let (va, vb) = (CellValue::of(a, entry.column), CellValue::of(b, entry.column));
        let ord = match (&va, &vb) {
            (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
            // absent toujours en dernier, avant application du sens
            (CellValue::Missing, _) => return Ordering::Greater,
            (_, CellValue::Missing) => return Ordering::Less,
            (CellValue::Number(x), CellValue::Number(y)) => x.cmp(y),
            (CellValue::Text(x), CellValue::Text(y)) => {
                compare_alphanumeric(&x.to_lowercase(), &y.to_lowercase())
            }
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
        };
        let ord = if entry.desc { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Tri "naturel" : les suites de chiffres se comparent numériquement (`node2` < `node10`).
pub fn compare_alphanumeric(a: &str, b: &str) -> Ordering {
    let (mut ai, mut bi) = (a.chars().peekable(), b.chars().peekable());
    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let da = take_digits(&mut ai);
                let db = take_digits(&mut bi);
                let (ta, tb) = (da.trim_start_matches('0'), db.trim_start_matches('0'));
                let ord = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(ca), Some(cb)) => {
                if ca != cb {
                    return ca.cmp(&cb);
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digits(it: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(c) = it.peek().copied().filter(|c| c.is_ascii_digit()) {
        out.push(c);
        it.next();
    }
    out
}

/// `"2 hours, 5 mins ago"` / `"12 mins ago"`, en minutes entières.
pub fn format_elapsed(now_ms: i64, then_ms: i64) -> String {
    let minutes = (now_ms - then_ms).max(0) / 60_000;
    let (hours, mins) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{hours} hours, {mins} mins ago")
    } else {
        format!("{mins} mins ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    const NOW: i64 = 1_700_000_000_000;

    fn node(id: &str, role: Role, hop_start: Option<i64>, updated_at: i64) -> FleetNode {
        FleetNode {
            id: id.to_string(),
            long_name: format!("Node {id}"),
            short_name: id.to_uppercase(),
            mac_address: String::new(),
            hardware_model: if hop_start.is_some() { "RAK4631".into() } else { "TBEAM".into() },
            role,
            hop_start,
            updated_at,
        }
    }

    fn fleet() -> FleetTable {
        FleetTable::new(
            vec![
                node("a", Role::Client, Some(3), 5),
                node("b", Role::Router, None, 10),
                node("c", Role::Client, Some(7), 8),
                node("d", Role::ClientMute, Some(3), 1),
                node("e", Role::Router, Some(3), 2),
            ],
            NOW,
        )
    }

    fn ids(table: &FleetTable) -> Vec<String> {
        table.visible().into_iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_default_sort_updated_desc() {
        let table = fleet();
        assert_eq!(table.sorting(), &[SortEntry { column: ColumnId::UpdatedAt, desc: true }]);
        assert_eq!(ids(&table), vec!["b", "c", "a", "e", "d"]);
    }

    #[test]
    fn test_missing_sorts_last_both_directions() {
        let mut table = FleetTable::new(
            vec![
                node("five", Role::Client, Some(5), 1),
                node("none", Role::Client, None, 2),
                node("ten", Role::Client, Some(10), 3),
            ],
            NOW,
        );
        table.set_sorting(vec![SortEntry { column: ColumnId::HopStart, desc: true }]);
        assert_eq!(ids(&table), vec!["ten", "five", "none"]);

        table.set_sorting(vec![SortEntry { column: ColumnId::HopStart, desc: false }]);
        assert_eq!(ids(&table), vec!["five", "ten", "none"]);
    }

    #[test]
    fn test_set_filter_replaces_and_all_clears() {
        let mut table = fleet();
        table.set_filter(ColumnId::Role, FilterValue::from("CLIENT"));
        table.set_filter(ColumnId::HopStart, FilterValue::from("3"));
        table.set_filter(ColumnId::Role, FilterValue::from("ROUTER"));

        assert_eq!(table.filters().len(), 2);
        assert_eq!(table.filter_for(ColumnId::Role), Some("ROUTER"));
        assert_eq!(ids(&table), vec!["e"]);

        table.set_filter(ColumnId::Role, FilterValue::All);
        assert_eq!(table.filter_for(ColumnId::Role), None);
        assert_eq!(table.filter_for(ColumnId::HopStart), Some("3"));
        assert_eq!(ids(&table), vec!["a", "e", "d"]);
    }

    #[test]
    fn test_filters_commute() {
        let mut ab = fleet();
        ab.set_filter(ColumnId::Role, "CLIENT".into());
        ab.set_filter(ColumnId::HopStart, "3".into());

        let mut ba = fleet();
        ba.set_filter(ColumnId::HopStart, "3".into());
        ba.set_filter(ColumnId::Role, "CLIENT".into());

        assert_eq!(ids(&ab), ids(&ba));
        assert_eq!(ids(&ab), vec!["a"]);
    }

    #[test]
    fn test_numeric_filter_coerces() {
        let mut table = fleet();
        table.set_filter(ColumnId::HopStart, " 7 ".into());
        assert_eq!(ids(&table), vec!["c"]);
        table.set_filter(ColumnId::HopStart, "7.0".into());
        assert_eq!(ids(&table), vec!["c"]);
        table.set_filter(ColumnId::HopStart, "seven".into());
        assert!(ids(&table).is_empty());
    }

    #[test]
    fn test_categorical_filter_is_strict() {
        let mut table = fleet();
        table.set_filter(ColumnId::Role, "client".into());
        assert!(ids(&table).is_empty());
    }

    #[test]
    fn test_toggle_sort_cycle() {
        let mut table = fleet();
        table.toggle_sort(ColumnId::ShortName);
        assert_eq!(table.sorting(), &[SortEntry { column: ColumnId::ShortName, desc: false }]);
        table.toggle_sort(ColumnId::ShortName);
        assert_eq!(table.sorting(), &[SortEntry { column: ColumnId::ShortName, desc: true }]);
        table.toggle_sort(ColumnId::ShortName);
        assert!(table.sorting().is_empty());
    }

    #[test]
    fn test_toggle_default_sort_removes_it() {
        // le tri par défaut est déjà descendant : le clic suivant l'enlève
        let mut table = fleet();
        table.toggle_sort(ColumnId::UpdatedAt);
        assert!(table.sorting().is_empty());
        assert_eq!(ids(&table), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_single_sort_replaces_previous() {
        let mut table = fleet();
        table.toggle_sort(ColumnId::Role);
        assert_eq!(table.sorting().len(), 1);
        assert_eq!(table.sorting()[0].column, ColumnId::Role);
    }

    #[test]
    fn test_multi_sort() {
        let mut table = fleet();
        table.set_sorting(Vec::new());
        table.toggle_sort_multi(ColumnId::Role);
        table.toggle_sort_multi(ColumnId::HopStart);
        assert_eq!(table.sorting().len(), 2);
        // CLIENT(a:3, c:7), CLIENT_MUTE(d), ROUTER(e:3, b:none)
        assert_eq!(ids(&table), vec!["a", "c", "d", "e", "b"]);

        table.toggle_sort_multi(ColumnId::Role);
        table.toggle_sort_multi(ColumnId::Role);
        assert_eq!(table.sorting(), &[SortEntry { column: ColumnId::HopStart, desc: false }]);
    }

    #[test]
    fn test_facet_excludes_own_filter() {
        let mut table = fleet();
        table.set_filter(ColumnId::Role, "ROUTER".into());
        table.set_filter(ColumnId::HopStart, "3".into());

        let roles = table.facet(ColumnId::Role);
        // lignes hopStart == 3 : a, d, e
        assert_eq!(roles.total(), 3);
        assert_eq!(roles.values[0].value, CellValue::Text("CLIENT".into()));
        assert_eq!(roles.values.len(), 3);

        let hops = table.facet(ColumnId::HopStart);
        // lignes ROUTER : b (absent), e (3)
        assert_eq!(hops.total(), 2);
        assert!(hops.values.iter().any(|v| v.value.is_missing() && v.label == "Unknown"));
    }

    #[test]
    fn test_facet_counts_sum_to_rows() {
        let mut table = fleet();
        table.set_filter(ColumnId::HwModel, "RAK4631".into());
        for column in [ColumnId::Role, ColumnId::HopStart, ColumnId::HwModel] {
            let expected = table.nodes.iter().filter(|n| table.passes(n, Some(column))).count();
            assert_eq!(table.facet(column).total(), expected);
        }
    }

    #[test]
    fn test_facet_ordering_and_labels() {
        let table = fleet();
        let roles = table.facet(ColumnId::Role);
        let counts: Vec<usize> = roles.values.iter().map(|v| v.count).collect();
        assert_eq!(counts, vec![2, 2, 1]);
        assert_eq!(roles.values[2].label, "Client Mute");
        assert_eq!(roles.label, "Device Mode");

        let hops = table.facet(ColumnId::HopStart);
        assert_eq!(hops.values[0].value, CellValue::Number(3));
        assert_eq!(hops.values[0].count, 3);
    }

    #[test]
    fn test_facets_only_facetable_columns() {
        let columns: Vec<ColumnId> = fleet().facets().iter().map(|f| f.column).collect();
        assert_eq!(columns, vec![ColumnId::HwModel, ColumnId::Role, ColumnId::HopStart]);
    }

    #[test]
    fn test_rows_display_model() {
        let table = FleetTable::new(
            vec![node("a", Role::Client, None, NOW - (2 * 60 + 5) * 60_000 - 30_000)],
            NOW,
        );
        let rows = table.rows();
        assert_eq!(rows[0].updated_ago, "2 hours, 5 mins ago");
        assert_eq!(rows[0].target.path, "/node/a");
        assert_eq!(rows[0].role, "CLIENT");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(NOW, NOW - 59_999), "0 mins ago");
        assert_eq!(format_elapsed(NOW, NOW - 12 * 60_000), "12 mins ago");
        assert_eq!(format_elapsed(NOW, NOW - 60 * 60_000), "1 hours, 0 mins ago");
        assert_eq!(format_elapsed(NOW, NOW + 5_000), "0 mins ago");
    }

    #[test]
    fn test_compare_alphanumeric() {
        assert_eq!(compare_alphanumeric("node2", "node10"), Ordering::Less);
        assert_eq!(compare_alphanumeric("abc", "abd"), Ordering::Less);
        assert_eq!(compare_alphanumeric("a01", "a1"), Ordering::Equal);
        assert_eq!(compare_alphanumeric("ab", "a"), Ordering::Greater);
    }

    #[test]
    fn test_column_ids_parse() {
        assert_eq!("hopStart".parse::<ColumnId>(), Ok(ColumnId::HopStart));
        assert!("nope".parse::<ColumnId>().is_err());
        for column in COLUMNS {
            assert_eq!(column.id.as_str().parse::<ColumnId>(), Ok(column.id));
        }
    }
}
