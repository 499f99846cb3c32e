//! Row searches across pages, load-more lists and recycling windows.

use smarttable::mock::{MockGrid, RenderMode};
use smarttable::{
    InfiniteScroll, RowQuery, ScrollConfig, SmartTable, TableConfig, TableSelectors,
};
use std::collections::HashSet;

fn names(rows: &[smarttable::RowData]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.cell("Name").map(str::to_string))
        .collect()
}

fn assert_complete(rows: &[smarttable::RowData], expected: usize) {
    let names = names(rows);
    let distinct: HashSet<&String> = names.iter().collect();
    assert_eq!(names.len(), expected, "duplicates or misses: {names:?}");
    assert_eq!(distinct.len(), expected);
}

// ============================================================================
// Paged
// ============================================================================

#[tokio::test(start_paused = true)]
async fn find_rows_across_pages() {
    let grid = MockGrid::numbered(25, RenderMode::Paged { page_size: 10 }).with_render_lag(2);
    let config = TableConfig::new().with_selectors(TableSelectors {
        next: Some(MockGrid::NEXT.to_string()),
        ..TableSelectors::default()
    });
    let mut table = SmartTable::new(grid, config).unwrap();

    let red = table
        .find_rows(&RowQuery::new().column_equals("Team", "red"))
        .await
        .unwrap();

    assert_eq!(red.len(), 9);
    assert_eq!(red[0].cell("Name"), Some("Row 1"));
    assert_eq!(red[8].cell("Name"), Some("Row 25"));
    assert_eq!(red[8].position, 2);
}

#[tokio::test(start_paused = true)]
async fn find_row_from_yaml_config() {
    let yaml = r#"
selectors:
  rows: "tbody tr"
  cells: "td"
  headers: "thead th"
  next: "button.next"
stabilize:
  timeout_ms: 1000
max_pages: 10
"#;
    let config = TableConfig::from_yaml_str(yaml).unwrap();
    let grid = MockGrid::numbered(60, RenderMode::Paged { page_size: 10 }).with_render_lag(3);
    let mut table = SmartTable::new(grid, config).unwrap();

    let query = RowQuery::new()
        .column_matches("Name", r"^Row 4\d$")
        .unwrap()
        .column_equals("Team", "green");
    let row = table.find_row(&query).await.unwrap();

    assert!(row.is_found());
    assert_eq!(row.cell("Name"), Some("Row 41"));
    assert_eq!(row.to_json(), serde_json::json!({"Name": "Row 41", "Team": "green"}));
}

// ============================================================================
// Append-only
// ============================================================================

#[tokio::test(start_paused = true)]
async fn find_rows_over_load_more() {
    let grid = MockGrid::numbered(25, RenderMode::Append { batch: 10 }).with_render_lag(1);
    let config = TableConfig::new().with_selectors(TableSelectors {
        load_more: Some(MockGrid::LOAD_MORE.to_string()),
        ..TableSelectors::default()
    });
    let mut table = SmartTable::new(grid, config).unwrap();

    let rows = table.find_rows(&RowQuery::new()).await.unwrap();

    assert_complete(&rows, 25);
}

#[tokio::test(start_paused = true)]
async fn find_rows_with_infinite_scroll() {
    let grid = MockGrid::numbered(32, RenderMode::Append { batch: 10 });
    let mut table = SmartTable::new(grid, TableConfig::default())
        .unwrap()
        .with_strategy(InfiniteScroll::new());

    let rows = table.find_rows(&RowQuery::new()).await.unwrap();

    assert_complete(&rows, 32);
}

// ============================================================================
// Recycling windows
// ============================================================================

fn scroll_config(amount: f64) -> TableConfig {
    TableConfig::new()
        .with_selectors(TableSelectors {
            scroll_container: Some(MockGrid::CONTAINER.to_string()),
            ..TableSelectors::default()
        })
        .with_scroll(ScrollConfig::new().with_amount(amount).with_timeout(500).with_retries(1))
}

#[tokio::test(start_paused = true)]
async fn find_rows_over_virtualized_window_without_duplicates() {
    // 100px = 5 rows: consecutive windows overlap by half.
    let grid = MockGrid::numbered(100, RenderMode::Virtualized { window: 10 }).with_render_lag(1);
    let mut table = SmartTable::new(grid, scroll_config(100.0)).unwrap();

    let rows = table.find_rows(&RowQuery::new()).await.unwrap();

    assert_complete(&rows, 100);
    assert_eq!(table.position(), 18);
}

#[tokio::test(start_paused = true)]
async fn find_rows_over_canvas_grid() {
    let grid = MockGrid::numbered(50, RenderMode::Canvas { window: 10 });
    let mut table = SmartTable::new(grid, scroll_config(200.0)).unwrap();

    let blue = table
        .find_rows(&RowQuery::new().column_equals("Team", "blue"))
        .await
        .unwrap();

    assert_eq!(blue.len(), 16);
    assert!(blue
        .iter()
        .all(|row| row.element_id.as_deref().is_some_and(|id| id.starts_with("slot-"))));
}

#[tokio::test(start_paused = true)]
async fn repeated_search_starts_fresh() {
    let grid = MockGrid::numbered(30, RenderMode::Virtualized { window: 10 });
    let mut table = SmartTable::new(grid, scroll_config(200.0)).unwrap();

    let first = table.find_rows(&RowQuery::new()).await.unwrap();
    assert_complete(&first, 30);

    // The grid now sits at the bottom; only the last window is visible.
    let second = table.find_rows(&RowQuery::new()).await.unwrap();
    assert_complete(&second, 10);
    assert_eq!(names(&second)[0], "Row 21");

    table.cleanup();
}
