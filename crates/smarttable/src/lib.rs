//! SmartTable: row/column queries over paged, virtualized and canvas grids
//!
//! A data grid in a browser may page with buttons, grow with a "load more"
//! control, or recycle a fixed window of row nodes as its container scrolls.
//! SmartTable hides the difference: callers ask for rows and columns, and
//! the crate decides how to move the grid, confirms that each move actually
//! rendered new content, and keeps track of which rows were already seen.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    SMARTTABLE Architecture                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ SmartTable │───►│ Planner    │───►│ Executor   │            │
//! │   │ (queries)  │    │ (paths)    │    │ (cursor)   │            │
//! │   └─────┬──────┘    └────────────┘    └─────┬──────┘            │
//! │         │                                   │                   │
//! │   ┌─────▼──────┐    ┌────────────┐    ┌─────▼──────┐            │
//! │   │ RowTracker │    │ Strategies │───►│ Stabilize  │            │
//! │   │ (seen set) │    │ (advance)  │    │ (verify)   │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │                   │
//! │                                       ┌─────▼──────┐            │
//! │                                       │ GridDriver │            │
//! │                                       └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

mod config;
mod driver;
mod executor;
mod fingerprint;
mod planner;
mod primitives;
mod result;
mod stabilize;
mod strategies;
mod table;
mod tracker;

/// Subscriber setup for the crate's `tracing` events
pub mod logging;

/// In-memory grid for tests and demos
///
/// Simulates paged, append-only, virtualized and canvas grids with
/// configurable render lag.
pub mod mock;

pub use config::{
    NavigationConfig, ScrollConfig, ScrollMode, StabilizeOptions, TableConfig, TableSelectors,
    DEFAULT_FINGERPRINT_SEPARATOR, DEFAULT_MAX_PAGES, DEFAULT_MAX_REPLANS,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_STABILIZE_TIMEOUT_MS, MAX_GO_TO_PAGE_RETRIES,
};
pub use driver::{BoundingBox, ElementHandle, GridDriver};
pub use executor::{execute_path, execute_with_go_to_page_retry, navigate_to};
pub use fingerprint::{capture, Fingerprint, FingerprintScope};
pub use planner::{plan_path, NavPath, NavStep, PrimitiveSet};
pub use primitives::{
    ClickControl, ClickPageLink, FnPrimitive, NavPrimitive, NavigationPrimitives, PageJump,
    PressKey, PrimitiveOutcome, ScrollBy, StrategyPrimitive,
};
pub use result::{TableError, TableResult};
pub use stabilize::{
    stabilize, wait_for_loading_indicator, wait_for_row_count_increase, Stabilization,
    LOADING_SETTLE_MS,
};
pub use strategies::{
    strategy_for, ClickLoadMore, ClickNext, InfiniteScroll, PaginationStrategy,
    VirtualizedInfiniteScroll,
};
pub use table::{RowData, RowQuery, SmartRow, SmartTable};
pub use tracker::{RowTracker, TableId};
