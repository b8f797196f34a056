//! Paginated, sortable, filterable table state.
//!
//! DESIGN
//! ======
//! One state machine serves both table flavors. In client mode the full data
//! set lives here and paging, sorting and filtering are local. In server mode
//! the state only tracks the page, sort and filter inputs and turns them into
//! an L8 query ([`TableQuery`]); the owner fetches that page and hands the
//! rows back through [`TableState::set_server_data`].
//!
//! Rows are backend JSON objects. Column keys may be dotted paths into
//! nested objects (`equipmentinfo.sysName`).

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

pub const DEFAULT_ROWS_PER_PAGE: usize = 15;
/// Quiet period before a server-side filter edit triggers a fetch.
pub const FILTER_DEBOUNCE_MS: u32 = 1000;
const PAGE_WINDOW: usize = 2;
const ID_FIELDS: [&str; 6] = ["id", "userId", "roleId", "targetId", "credId", "key"];

pub type Row = Map<String, Value>;
pub type Formatter = Arc<dyn Fn(&Value, &Row) -> Cell + Send + Sync>;

// =============================================================================
// CELLS & COLUMNS
// =============================================================================

/// Rendered content of one table cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Status pill; `class` is one of the `status-*` classes (or empty).
    Badge { class: String, text: String },
    Tags(Vec<String>),
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Badge whose class is derived from the status text.
    pub fn status(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::Badge { class: status_class(&text).to_owned(), text }
    }

    /// Plain text form, used for tooltips and tests.
    pub fn plain(&self) -> String {
        match self {
            Self::Text(t) | Self::Badge { text: t, .. } => t.clone(),
            Self::Tags(tags) => tags.join(", "),
        }
    }
}

#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    /// Backend field used in `where` clauses; defaults to `key`.
    pub filter_key: Option<String>,
    /// Field used for sorting; defaults to `filter_key`, then `key`.
    pub sort_key: Option<String>,
    /// Lowercase display name to backend enum value, in match priority order.
    pub enum_values: Option<Vec<(String, i64)>>,
    formatter: Option<Formatter>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("filter_key", &self.filter_key)
            .field("sort_key", &self.sort_key)
            .field("enum_values", &self.enum_values)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl Column {
    pub fn new(key: &str, label: &str) -> Self {
        Self { key: key.to_owned(), label: label.to_owned(), filter_key: None, sort_key: None, enum_values: None, formatter: None }
    }

    #[must_use]
    pub fn filter_key(mut self, key: &str) -> Self {
        self.filter_key = Some(key.to_owned());
        self
    }

    #[must_use]
    pub fn sort_key(mut self, key: &str) -> Self {
        self.sort_key = Some(key.to_owned());
        self
    }

    #[must_use]
    pub fn enum_values(mut self, values: &[(&str, i64)]) -> Self {
        self.enum_values = Some(values.iter().map(|(name, v)| (name.to_lowercase(), *v)).collect());
        self
    }

    #[must_use]
    pub fn format(mut self, formatter: impl Fn(&Value, &Row) -> Cell + Send + Sync + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    fn query_filter_key(&self) -> &str {
        self.filter_key.as_deref().unwrap_or(&self.key)
    }

    fn query_sort_key(&self) -> &str {
        self.sort_key.as_deref().or(self.filter_key.as_deref()).unwrap_or(&self.key)
    }

    fn local_sort_key(&self) -> &str {
        self.sort_key.as_deref().unwrap_or(&self.key)
    }

    /// Render this column's cell for `row`.
    pub fn render(&self, row: &Row, as_status: bool) -> Cell {
        let value = lookup(row, &self.key).unwrap_or(&Value::Null);
        if let Some(formatter) = &self.formatter {
            return formatter(value, row);
        }
        let text = value_text(value);
        if as_status { Cell::status(text) } else { Cell::Text(text) }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TableMode {
    #[default]
    Client,
    /// Paging, sorting and filtering are delegated to the backend.
    Server {
        model_name: String,
        base_where: Option<String>,
        /// When set, the table component fetches pages itself.
        endpoint: Option<String>,
    },
}

#[derive(Clone, Debug)]
pub struct TableConfig {
    pub columns: Vec<Column>,
    pub rows_per_page: usize,
    /// Choices for the page-size selector; empty hides it.
    pub page_size_options: Vec<usize>,
    pub sortable: bool,
    pub filterable: bool,
    pub status_column: Option<String>,
    pub mode: TableMode,
    pub empty_message: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            page_size_options: Vec::new(),
            sortable: true,
            filterable: true,
            status_column: None,
            mode: TableMode::Client,
            empty_message: "No data found.".to_owned(),
        }
    }
}

impl TableConfig {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, ..Self::default() }
    }

    #[must_use]
    pub fn rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = rows.max(1);
        self
    }

    #[must_use]
    pub fn page_sizes(mut self, sizes: &[usize]) -> Self {
        self.page_size_options = sizes.to_vec();
        self
    }

    #[must_use]
    pub fn status_column(mut self, key: &str) -> Self {
        self.status_column = Some(key.to_owned());
        self
    }

    #[must_use]
    pub fn sortable(mut self, on: bool) -> Self {
        self.sortable = on;
        self
    }

    #[must_use]
    pub fn filterable(mut self, on: bool) -> Self {
        self.filterable = on;
        self
    }

    #[must_use]
    pub fn empty_message(mut self, message: &str) -> Self {
        self.empty_message = message.to_owned();
        self
    }

    /// Switch to server mode over `model_name`, fetching from `endpoint`.
    #[must_use]
    pub fn server(mut self, model_name: &str, endpoint: Option<String>) -> Self {
        self.mode = TableMode::Server { model_name: model_name.to_owned(), base_where: None, endpoint };
        self
    }

    #[must_use]
    pub fn base_where(mut self, clause: &str) -> Self {
        if let TableMode::Server { base_where, .. } = &mut self.mode {
            *base_where = Some(clause.to_owned());
        }
        self
    }
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A server page request derived from the current table inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableQuery {
    pub page: usize,
    pub text: String,
    /// Keys of enum columns whose filter text matched no enum name.
    pub invalid_filters: Vec<String>,
}

/// Entry in the pager: a page number or a `…` gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Gap,
}

#[derive(Clone, Debug)]
pub struct TableState {
    config: TableConfig,
    data: Vec<Row>,
    /// Client mode: `data` after filtering and sorting.
    visible: Vec<Row>,
    total_count: usize,
    current_page: usize,
    sort: Option<(String, SortDirection)>,
    filters: BTreeMap<String, String>,
    invalid_filters: Vec<String>,
}

impl TableState {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            data: Vec::new(),
            visible: Vec::new(),
            total_count: 0,
            current_page: 1,
            sort: None,
            filters: BTreeMap::new(),
            invalid_filters: Vec::new(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Endpoint the table fetches server pages from, if it fetches itself.
    pub fn endpoint(&self) -> Option<&str> {
        match &self.config.mode {
            TableMode::Server { endpoint, .. } => endpoint.as_deref(),
            TableMode::Client => None,
        }
    }

    pub fn is_server(&self) -> bool {
        matches!(self.config.mode, TableMode::Server { .. })
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.config.rows_per_page.max(1)
    }

    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(k, d)| (k.as_str(), *d))
    }

    pub fn filter_value(&self, key: &str) -> &str {
        self.filters.get(key).map_or("", String::as_str)
    }

    pub fn is_filter_invalid(&self, key: &str) -> bool {
        self.invalid_filters.iter().any(|k| k == key)
    }

    /// Replace the client-side data set and return to page 1. Active filters
    /// and sort order are reapplied.
    pub fn set_data(&mut self, rows: Vec<Row>) {
        self.data = rows;
        self.current_page = 1;
        self.refresh_visible();
    }

    /// Install one server page and the backend's total count.
    pub fn set_server_data(&mut self, rows: Vec<Row>, total: usize) {
        self.data = rows;
        self.total_count = total;
    }

    pub fn set_invalid_filters(&mut self, keys: Vec<String>) {
        self.invalid_filters = keys;
    }

    pub fn total_items(&self) -> usize {
        if self.is_server() { self.total_count } else { self.visible.len() }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items().div_ceil(self.rows_per_page())
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> &[Row] {
        if self.is_server() {
            return &self.data;
        }
        let start = (self.current_page - 1) * self.rows_per_page();
        if start >= self.visible.len() {
            return &[];
        }
        let end = (start + self.rows_per_page()).min(self.visible.len());
        &self.visible[start..end]
    }

    /// The record behind the `index`-th rendered row.
    pub fn row_at(&self, index: usize) -> Option<&Row> {
        self.page_rows().get(index)
    }

    /// Move to `page`. Pages outside `1..=total_pages` and the current page
    /// are ignored; returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() && page != self.current_page {
            self.current_page = page;
            return true;
        }
        false
    }

    pub fn prev_page(&mut self) -> bool {
        self.current_page > 1 && self.go_to_page(self.current_page - 1)
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    /// Sort by `key`, toggling direction when it is already the sort column.
    /// Returns to page 1.
    pub fn sort_by(&mut self, key: &str) {
        let direction = match &self.sort {
            Some((current, SortDirection::Asc)) if current == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.sort = Some((key.to_owned(), direction));
        self.current_page = 1;
        if !self.is_server() {
            self.apply_sort();
        }
    }

    /// Update one column's filter text and return to page 1.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.filters.remove(key);
        } else {
            self.filters.insert(key.to_owned(), value.to_owned());
        }
        self.current_page = 1;
        if !self.is_server() {
            self.refresh_visible();
        }
    }

    pub fn set_rows_per_page(&mut self, rows: usize) {
        self.config.rows_per_page = rows.max(1);
        self.current_page = 1;
    }

    /// Replace the server-mode base clause; filters are cleared.
    pub fn set_base_where(&mut self, clause: Option<String>) {
        if let TableMode::Server { base_where, .. } = &mut self.config.mode {
            *base_where = clause;
        }
        self.filters.clear();
        self.invalid_filters.clear();
        self.current_page = 1;
    }

    pub fn set_empty_message(&mut self, message: &str) {
        message.clone_into(&mut self.config.empty_message);
    }

    /// Query for the current page in server mode.
    pub fn query(&self) -> Option<TableQuery> {
        self.build_query(self.current_page)
    }

    /// Query for `page` in server mode; `None` in client mode.
    pub fn build_query(&self, page: usize) -> Option<TableQuery> {
        let TableMode::Server { model_name, base_where, .. } = &self.config.mode else {
            return None;
        };
        let mut conditions: Vec<String> = base_where.iter().filter(|c| !c.is_empty()).cloned().collect();
        let mut invalid_filters = Vec::new();

        for column in &self.config.columns {
            let Some(filter) = self.filters.get(&column.key).filter(|f| !f.is_empty()) else {
                continue;
            };
            let value = match &column.enum_values {
                Some(values) => match match_enum_value(filter, values) {
                    Some(v) => v.to_string(),
                    None => {
                        invalid_filters.push(column.key.clone());
                        continue;
                    }
                },
                None => format!("{filter}*"),
            };
            conditions.push(format!("{}={value}", column.query_filter_key()));
        }

        let mut text = format!("select * from {model_name}");
        if !conditions.is_empty() {
            text.push_str(" where ");
            text.push_str(&conditions.join(" and "));
        }
        text.push_str(&format!(" limit {} page {}", self.rows_per_page(), page.saturating_sub(1)));

        if let Some((key, direction)) = &self.sort {
            let sort_key = self.column(key).map_or(key.as_str(), Column::query_sort_key);
            text.push_str(&format!(" sort-by {sort_key}"));
            if *direction == SortDirection::Desc {
                text.push_str(" descending");
            }
        }

        Some(TableQuery { page, text, invalid_filters })
    }

    pub fn page_range(&self) -> Vec<PageItem> {
        page_range(self.current_page, self.total_pages())
    }

    /// `Showing <start>-<end> of <total> entries`.
    pub fn pagination_info(&self) -> String {
        let total = self.total_items();
        if total == 0 {
            return "Showing 0-0 of 0 entries".to_owned();
        }
        let start = (self.current_page - 1) * self.rows_per_page() + 1;
        let end = (self.current_page * self.rows_per_page()).min(total);
        format!("Showing {start}-{end} of {total} entries")
    }

    /// Header arrow for `key`.
    pub fn sort_indicator(&self, key: &str) -> &'static str {
        match &self.sort {
            Some((k, SortDirection::Asc)) if k == key => "▲",
            Some((k, SortDirection::Desc)) if k == key => "▼",
            _ => "⇅",
        }
    }

    fn column(&self, key: &str) -> Option<&Column> {
        self.config.columns.iter().find(|c| c.key == key)
    }

    fn refresh_visible(&mut self) {
        let needles: Vec<(&str, String)> =
            self.filters.iter().filter(|(_, v)| !v.is_empty()).map(|(k, v)| (k.as_str(), v.to_lowercase())).collect();
        self.visible = self
            .data
            .iter()
            .filter(|row| {
                needles.iter().all(|(key, needle)| {
                    let hay = lookup(row, key).map(value_text).unwrap_or_default();
                    hay.to_lowercase().contains(needle.as_str())
                })
            })
            .cloned()
            .collect();
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let Some((key, direction)) = self.sort.clone() else {
            return;
        };
        let sort_key = self.column(&key).map_or(key.clone(), |c| c.local_sort_key().to_owned());
        self.visible.sort_by(|a, b| {
            let ord = compare_values(lookup(a, &sort_key), lookup(b, &sort_key));
            if direction == SortDirection::Desc { ord.reverse() } else { ord }
        });
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// Resolve a dotted path (`equipmentinfo.sysName`) in a row.
pub fn lookup<'a>(row: &'a Row, key: &str) -> Option<&'a Value> {
    if let Some(value) = row.get(key) {
        return Some(value);
    }
    let mut parts = key.split('.');
    let mut current = row.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Display text for a JSON value: strings unquoted, null empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric comparison when both sides parse as numbers, text otherwise.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.map(value_text).unwrap_or_default();
    let b = b.map(value_text).unwrap_or_default();
    match (parse_number(&a), parse_number(&b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(&b),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Match filter text against enum names: exact (case-insensitive) first,
/// then the first name the input is a prefix of.
pub fn match_enum_value(input: &str, values: &[(String, i64)]) -> Option<i64> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    values
        .iter()
        .find(|(name, _)| *name == needle)
        .or_else(|| values.iter().find(|(name, _)| name.starts_with(&needle)))
        .map(|(_, v)| *v)
}

/// First, last, and current ±2 pages with gaps in between.
pub fn page_range(current: usize, total: usize) -> Vec<PageItem> {
    let mut range = Vec::new();
    for page in 1..=total {
        let near = page + PAGE_WINDOW >= current && page <= current + PAGE_WINDOW;
        if page == 1 || page == total || near {
            range.push(PageItem::Page(page));
        } else if range.last() != Some(&PageItem::Gap) {
            range.push(PageItem::Gap);
        }
    }
    range
}

/// CSS class for a status string; empty when nothing matches.
pub fn status_class(status: &str) -> &'static str {
    let s = status.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| s.contains(w));
    if has(&["online", "operational", "ok", "healthy"]) {
        "status-operational"
    } else if has(&["warning", "degraded", "partial"]) {
        "status-warning"
    } else if has(&["critical", "error", "down"]) {
        "status-critical"
    } else if has(&["maintenance"]) {
        "status-maintenance"
    } else if has(&["offline", "unknown"]) {
        "status-offline"
    } else {
        ""
    }
}

/// Identifier of a record from the usual id fields.
pub fn row_id(row: &Row) -> String {
    ID_FIELDS
        .iter()
        .filter_map(|field| row.get(*field).map(value_text))
        .find(|id| !id.is_empty())
        .unwrap_or_else(|| Value::Object(row.clone()).to_string())
}

/// Convert any serializable record into a table row.
pub fn to_row<T: serde::Serialize>(record: &T) -> Row {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        _ => Row::new(),
    }
}
