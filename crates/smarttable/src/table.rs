//! SmartTable facade.
//!
//! Uniform row/column queries over a grid, whatever way it pages: click-next
//! pagers, load-more lists, virtualized scroll containers.
//!
//! # Example
//!
//! ```ignore
//! let config = TableConfig::from_yaml_str(r#"
//! selectors:
//!   rows: "tbody tr"
//!   next: "button.next"
//! "#)?;
//! let mut table = SmartTable::new(driver, config)?;
//! let row = table
//!     .find_row(&RowQuery::new().column_equals("Name", "Row 42"))
//!     .await?;
//! assert_eq!(row.cell("Team"), Some("blue"));
//! ```

use crate::config::TableConfig;
use crate::driver::GridDriver;
use crate::executor::navigate_to;
use crate::fingerprint::FingerprintScope;
use crate::primitives::{ClickControl, ClickPageLink, NavigationPrimitives, ScrollBy};
use crate::result::{TableError, TableResult};
use crate::strategies::{click_stabilization, strategy_for, PaginationStrategy};
use crate::tracker::{RowTracker, TableId};
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

// =============================================================================
// ROWS
// =============================================================================

/// Cells of one rendered row together with where they were found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowData {
    /// Index among the rows rendered at the time
    pub index: usize,
    /// Table position (page) the row was read at
    pub position: usize,
    /// Identity of the row element, if the driver reported one
    pub element_id: Option<String>,
    /// Header texts, in column order
    pub headers: Vec<String>,
    /// Cell texts, in column order
    pub cells: Vec<String>,
}

impl RowData {
    /// Text of the cell under header `column`
    #[must_use]
    pub fn cell(&self, column: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h.trim() == column.trim())?;
        self.cell_at(index)
    }

    /// Text of the cell at `index`
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Header -> cell object. Cells beyond the last header are keyed
    /// `column_<n>`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let key = self
                    .headers
                    .get(i)
                    .map_or_else(|| format!("column_{i}"), |h| h.trim().to_string());
                (key, serde_json::Value::String(cell.clone()))
            })
            .collect();
        serde_json::Value::Object(object)
    }
}

/// Result of a single-row lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmartRow {
    /// The row exists
    Found(RowData),
    /// No row matched
    NotFound,
}

impl SmartRow {
    /// Whether a row was found
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Text of the cell under header `column`
    #[must_use]
    pub fn cell(&self, column: &str) -> Option<&str> {
        self.data().and_then(|row| row.cell(column))
    }

    /// Cell texts (empty for `NotFound`)
    #[must_use]
    pub fn cells(&self) -> &[String] {
        self.data()
            .map(|row| row.cells.as_slice())
            .unwrap_or_default()
    }

    /// The row, if found
    #[must_use]
    pub const fn data(&self) -> Option<&RowData> {
        match self {
            Self::Found(row) => Some(row),
            Self::NotFound => None,
        }
    }

    /// Take the row, if found
    #[must_use]
    pub fn into_data(self) -> Option<RowData> {
        match self {
            Self::Found(row) => Some(row),
            Self::NotFound => None,
        }
    }

    /// Header -> cell object, `null` for `NotFound`
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        self.data()
            .map_or(serde_json::Value::Null, RowData::to_json)
    }
}

// =============================================================================
// QUERIES
// =============================================================================

#[derive(Debug, Clone)]
enum Condition {
    Equals(String),
    Matches(Regex),
}

/// Conjunction of per-column conditions
#[derive(Debug, Clone, Default)]
pub struct RowQuery {
    conditions: Vec<(String, Condition)>,
}

impl RowQuery {
    /// Query matching every row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the trimmed cell under `column` to equal `value`
    #[must_use]
    pub fn column_equals(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions
            .push((column.into(), Condition::Equals(value.into())));
        self
    }

    /// Require the cell under `column` to match `pattern`
    pub fn column_matches(mut self, column: impl Into<String>, pattern: &str) -> TableResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| TableError::Config {
            message: format!("invalid pattern `{pattern}`: {e}"),
        })?;
        self.conditions.push((column.into(), Condition::Matches(regex)));
        Ok(self)
    }

    /// Whether `row` satisfies every condition
    pub fn matches(&self, row: &RowData) -> TableResult<bool> {
        for (column, condition) in &self.conditions {
            let cell = row.cell(column).ok_or_else(|| TableError::ColumnNotFound {
                name: column.clone(),
            })?;
            let hit = match condition {
                Condition::Equals(value) => cell.trim() == value.trim(),
                Condition::Matches(regex) => regex.is_match(cell),
            };
            if !hit {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

// =============================================================================
// TABLE
// =============================================================================

/// One logical table on top of a [`GridDriver`]
pub struct SmartTable<D: GridDriver> {
    id: TableId,
    driver: D,
    config: TableConfig,
    tracker: RowTracker,
    primitives: NavigationPrimitives,
    strategy: Option<Arc<dyn PaginationStrategy>>,
    position: usize,
    headers: Option<Vec<String>>,
}

impl<D: GridDriver> std::fmt::Debug for SmartTable<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartTable")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("strategy", &self.strategy)
            .field("primitives", &self.primitives)
            .field("tracked_rows", &self.tracker.len())
            .finish_non_exhaustive()
    }
}

impl<D: GridDriver> SmartTable<D> {
    /// Create a table over `driver`.
    ///
    /// The pagination strategy and navigation primitives are derived from
    /// the configured selectors.
    pub fn new(driver: D, config: TableConfig) -> TableResult<Self> {
        config.validate()?;
        let id = TableId::new();
        let strategy: Option<Arc<dyn PaginationStrategy>> = strategy_for(&config).map(Arc::from);
        let primitives = primitives_for(&config);
        debug!(
            table = %id,
            strategy = strategy.as_ref().map_or("none", |s| s.name()),
            primitives = ?primitives,
            "table created"
        );
        Ok(Self {
            id,
            driver,
            config,
            tracker: RowTracker::new(id),
            primitives,
            strategy,
            position: 0,
            headers: None,
        })
    }

    /// Replace the navigation primitives
    #[must_use]
    pub fn with_primitives(mut self, primitives: NavigationPrimitives) -> Self {
        self.primitives = primitives;
        self
    }

    /// Replace the pagination strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl PaginationStrategy + 'static) -> Self {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Table identity
    #[must_use]
    pub const fn id(&self) -> TableId {
        self.id
    }

    /// Underlying driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Current position (page index, or scroll step count)
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Navigation primitives in use
    #[must_use]
    pub const fn primitives(&self) -> &NavigationPrimitives {
        &self.primitives
    }

    /// Header texts, read once and cached
    pub async fn headers(&mut self) -> TableResult<&[String]> {
        if self.headers.is_none() {
            let headers = self
                .driver
                .inner_texts(&self.config.selectors.headers)
                .await?;
            debug!(table = %self.id, columns = headers.len(), "headers read");
            self.headers = Some(headers);
        }
        Ok(self.headers.as_deref().unwrap_or_default())
    }

    /// Index of the column labelled `name`
    pub async fn column_index(&mut self, name: &str) -> TableResult<usize> {
        self.headers()
            .await?
            .iter()
            .position(|h| h.trim() == name.trim())
            .ok_or_else(|| TableError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Row `index` among the rows rendered right now
    pub async fn row(&mut self, index: usize) -> TableResult<SmartRow> {
        let handles = self
            .driver
            .element_handles(&self.config.selectors.rows)
            .await?;
        let Some(handle) = handles.get(index) else {
            return Ok(SmartRow::NotFound);
        };
        let element_id = Some(handle.id.clone());
        let row = self.read_row(index, element_id).await?;
        Ok(SmartRow::Found(row))
    }

    /// Every row rendered right now
    pub async fn rows(&mut self) -> TableResult<Vec<RowData>> {
        let handles = self
            .driver
            .element_handles(&self.config.selectors.rows)
            .await?;
        let mut rows = Vec::with_capacity(handles.len());
        for (index, handle) in handles.into_iter().enumerate() {
            rows.push(self.read_row(index, Some(handle.id)).await?);
        }
        Ok(rows)
    }

    /// Move to `target` with the navigation primitives
    pub async fn go_to(&mut self, target: usize) -> TableResult<()> {
        info!(table = %self.id, from = self.position, target, "navigating");
        navigate_to(
            target,
            &self.primitives,
            &self.driver,
            &mut self.position,
            &self.config.navigation,
        )
        .await
    }

    /// Run one strategy cycle. `Ok(false)` when no more rows can be loaded.
    pub async fn next_page(&mut self) -> TableResult<bool> {
        let Some(strategy) = &self.strategy else {
            return Ok(false);
        };
        let advanced = strategy
            .advance(&self.driver, &self.config.selectors.rows)
            .await?;
        if advanced {
            self.position += 1;
        }
        debug!(
            table = %self.id,
            strategy = strategy.name(),
            advanced,
            position = self.position,
            "strategy cycle finished"
        );
        Ok(advanced)
    }

    /// First row matching `query`, paging forward up to `max_pages` pages
    pub async fn find_row(&mut self, query: &RowQuery) -> TableResult<SmartRow> {
        let mut pages = 0;
        loop {
            for row in self.rows().await? {
                if query.matches(&row)? {
                    debug!(table = %self.id, position = self.position, index = row.index, "row found");
                    return Ok(SmartRow::Found(row));
                }
            }
            pages += 1;
            if pages >= self.config.max_pages || !self.next_page().await? {
                debug!(table = %self.id, pages, "row not found");
                return Ok(SmartRow::NotFound);
            }
        }
    }

    /// Every row matching `query` across all pages.
    ///
    /// Starts a fresh tracking session so each logical row is reported once,
    /// even when a virtualized grid recycles row elements between pages.
    pub async fn find_rows(&mut self, query: &RowQuery) -> TableResult<Vec<RowData>> {
        self.tracker.cleanup();
        let mut found = Vec::new();
        let mut pages = 0;
        loop {
            for row in self.unseen_rows().await? {
                if query.matches(&row)? {
                    found.push(row);
                }
            }
            pages += 1;
            if pages >= self.config.max_pages || !self.next_page().await? {
                break;
            }
        }
        info!(table = %self.id, pages, matches = found.len(), "search finished");
        Ok(found)
    }

    /// Rendered rows not reported since the last tracking reset
    pub async fn unseen_rows(&mut self) -> TableResult<Vec<RowData>> {
        let handles = self
            .driver
            .element_handles(&self.config.selectors.rows)
            .await?;
        let unseen = self.tracker.unseen_indices(&handles);
        let mut rows = Vec::with_capacity(unseen.len());
        for index in unseen {
            let element_id = handles.get(index).map(|h| h.id.clone());
            rows.push(self.read_row(index, element_id).await?);
        }
        Ok(rows)
    }

    /// Release tracking state
    pub fn cleanup(&mut self) {
        debug!(table = %self.id, tracked = self.tracker.len(), "releasing tracked rows");
        self.tracker.cleanup();
    }

    async fn read_row(&mut self, index: usize, element_id: Option<String>) -> TableResult<RowData> {
        let headers = self.headers().await?.to_vec();
        let cells = self
            .driver
            .child_texts(&self.config.selectors.rows, index, &self.config.selectors.cells)
            .await?;
        Ok(RowData {
            index,
            position: self.position,
            element_id,
            headers,
            cells,
        })
    }
}

/// Primitives implied by the configured selectors
fn primitives_for(config: &TableConfig) -> NavigationPrimitives {
    let selectors = &config.selectors;
    let rows = selectors.rows.as_str();
    let mut primitives = NavigationPrimitives::new().with_config(&config.navigation);

    let click = |selector: &String| {
        ClickControl::new(selector.clone(), rows)
            .with_stabilization(click_stabilization(config))
            .with_options(config.stabilize.clone())
    };
    if let Some(next) = &selectors.next {
        primitives = primitives.with_go_next(click(next));
    }
    if let Some(previous) = &selectors.previous {
        primitives = primitives.with_go_previous(click(previous));
    }
    if let Some(links) = &selectors.page_links {
        primitives = primitives.with_go_to_page(
            ClickPageLink::new(links.clone(), rows).with_options(config.stabilize.clone()),
        );
    }
    if selectors.next.is_none() {
        if let Some(container) = &selectors.scroll_container {
            let options = config.stabilize.clone().with_scope(FingerprintScope::All);
            let scroll = |delta: f64| {
                ScrollBy::new(container.clone(), rows, delta)
                    .with_mode(config.scroll.mode)
                    .with_options(options.clone())
            };
            primitives = primitives
                .with_go_next(scroll(config.scroll.amount))
                .with_go_previous(scroll(-config.scroll.amount));
        }
    }
    primitives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableSelectors;
    use crate::mock::{MockGrid, RenderMode};

    fn paged_config() -> TableConfig {
        TableConfig::new().with_selectors(TableSelectors {
            next: Some(MockGrid::NEXT.to_string()),
            previous: Some(MockGrid::PREVIOUS.to_string()),
            ..TableSelectors::default()
        })
    }

    fn row(headers: &[&str], cells: &[&str]) -> RowData {
        RowData {
            index: 0,
            position: 0,
            element_id: None,
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            cells: cells.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    mod row_tests {
        use super::*;

        #[test]
        fn test_cell_by_header() {
            let r = row(&["Name", " Team "], &["Row 1", "red"]);
            assert_eq!(r.cell("Team"), Some("red"));
            assert_eq!(r.cell("Missing"), None);
            assert_eq!(r.cell_at(0), Some("Row 1"));
        }

        #[test]
        fn test_to_json_maps_headers() {
            let r = row(&["Name"], &["Row 1", "extra"]);
            assert_eq!(
                r.to_json(),
                serde_json::json!({"Name": "Row 1", "column_1": "extra"})
            );
        }

        #[test]
        fn test_not_found_row() {
            let r = SmartRow::NotFound;
            assert!(!r.is_found());
            assert!(r.cells().is_empty());
            assert_eq!(r.cell("Name"), None);
            assert_eq!(r.to_json(), serde_json::Value::Null);
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn test_equals_and_matches() {
            let r = row(&["Name", "Team"], &["Row 12", "blue"]);
            let query = RowQuery::new()
                .column_equals("Team", "blue")
                .column_matches("Name", r"^Row 1\d$")
                .unwrap();
            assert!(query.matches(&r).unwrap());
            assert!(!RowQuery::new().column_equals("Team", "red").matches(&r).unwrap());
        }

        #[test]
        fn test_unknown_column_is_error() {
            let r = row(&["Name"], &["Row 1"]);
            let err = RowQuery::new().column_equals("Age", "3").matches(&r).unwrap_err();
            assert!(matches!(err, TableError::ColumnNotFound { .. }));
        }

        #[test]
        fn test_invalid_pattern() {
            assert!(RowQuery::new().column_matches("Name", "(").is_err());
        }
    }

    mod table_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_loading_indicator_confirms_page_changes() {
            let grid = MockGrid::numbered(30, RenderMode::Paged { page_size: 10 }).with_render_lag(3);
            let mut selectors = paged_config().selectors;
            selectors.loading_indicator = Some(MockGrid::LOADING.to_string());
            let mut table =
                SmartTable::new(grid, TableConfig::new().with_selectors(selectors)).unwrap();

            table.go_to(2).await.unwrap();
            assert_eq!(table.driver().current_page(), 2);
            assert!(!table.driver().is_visible(MockGrid::LOADING).await.unwrap());
            assert_eq!(table.row(0).await.unwrap().cell("Name"), Some("Row 21"));

            table.go_to(0).await.unwrap();
            assert_eq!(table.driver().current_page(), 0);
            assert_eq!(table.driver().call_count("click:button.prev"), 2);
        }

        #[tokio::test(start_paused = true)]
        async fn test_headers_and_rows() {
            let grid = MockGrid::numbered(25, RenderMode::Paged { page_size: 10 });
            let mut table = SmartTable::new(grid, paged_config()).unwrap();

            assert_eq!(table.headers().await.unwrap(), &["Name", "Team"]);
            assert_eq!(table.column_index("Team").await.unwrap(), 1);
            assert!(table.column_index("Age").await.is_err());

            let first = table.row(0).await.unwrap();
            assert_eq!(first.cell("Name"), Some("Row 1"));
            assert!(!table.row(10).await.unwrap().is_found());
            assert_eq!(table.rows().await.unwrap().len(), 10);
        }

        #[tokio::test(start_paused = true)]
        async fn test_find_row_pages_forward() {
            let grid = MockGrid::numbered(35, RenderMode::Paged { page_size: 10 }).with_render_lag(1);
            let mut table = SmartTable::new(grid, paged_config()).unwrap();

            let found = table
                .find_row(&RowQuery::new().column_equals("Name", "Row 27"))
                .await
                .unwrap();

            assert_eq!(found.cell("Team"), Some("blue"));
            assert_eq!(found.data().map(|r| r.position), Some(2));
            assert_eq!(table.position(), 2);
        }

        #[tokio::test(start_paused = true)]
        async fn test_find_row_not_found_after_last_page() {
            let grid = MockGrid::numbered(15, RenderMode::Paged { page_size: 10 });
            let mut table = SmartTable::new(grid, paged_config()).unwrap();
            let found = table
                .find_row(&RowQuery::new().column_equals("Name", "Row 99"))
                .await
                .unwrap();
            assert_eq!(found, SmartRow::NotFound);
        }

        #[tokio::test(start_paused = true)]
        async fn test_find_row_respects_max_pages() {
            let grid = MockGrid::numbered(50, RenderMode::Paged { page_size: 10 });
            let mut table = SmartTable::new(grid, paged_config().with_max_pages(2)).unwrap();
            let found = table
                .find_row(&RowQuery::new().column_equals("Name", "Row 45"))
                .await
                .unwrap();
            assert!(!found.is_found());
            assert_eq!(table.position(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_go_to_with_click_controls() {
            let grid = MockGrid::numbered(50, RenderMode::Paged { page_size: 10 });
            let mut table = SmartTable::new(grid, paged_config()).unwrap();

            table.go_to(3).await.unwrap();
            assert_eq!(table.position(), 3);
            assert_eq!(table.driver().current_page(), 3);

            table.go_to(1).await.unwrap();
            assert_eq!(table.driver().current_page(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_unseen_rows_and_cleanup() {
            let grid = MockGrid::numbered(10, RenderMode::Paged { page_size: 10 });
            let mut table = SmartTable::new(grid, paged_config()).unwrap();
            assert_eq!(table.unseen_rows().await.unwrap().len(), 10);
            assert!(table.unseen_rows().await.unwrap().is_empty());
            table.cleanup();
            assert_eq!(table.unseen_rows().await.unwrap().len(), 10);
        }

        #[test]
        fn test_invalid_config_rejected() {
            let grid = MockGrid::numbered(1, RenderMode::Paged { page_size: 10 });
            let config = TableConfig::new().with_selectors(TableSelectors {
                rows: String::new(),
                ..TableSelectors::default()
            });
            assert!(SmartTable::new(grid, config).is_err());
        }

        #[test]
        fn test_primitives_from_selectors() {
            let caps = primitives_for(&paged_config()).capabilities();
            assert!(caps.go_next && caps.go_previous && !caps.go_to_page);

            let config = TableConfig::new().with_selectors(TableSelectors {
                scroll_container: Some(MockGrid::CONTAINER.to_string()),
                page_links: Some(MockGrid::PAGE_LINKS.to_string()),
                ..TableSelectors::default()
            });
            let caps = primitives_for(&config).capabilities();
            assert!(caps.go_next && caps.go_previous && caps.go_to_page);
        }
    }
}
