//! Table configuration.
//!
//! Plain serde structs with `Default` impls and chained `with_*` builders.
//! A whole [`TableConfig`] can also be read from YAML or JSON.

use crate::fingerprint::FingerprintScope;
use crate::result::{TableError, TableResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default stabilization timeout (5 seconds)
pub const DEFAULT_STABILIZE_TIMEOUT_MS: u64 = 5_000;

/// Fixed polling interval for stabilization (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Separator used by [`FingerprintScope::All`]
pub const DEFAULT_FINGERPRINT_SEPARATOR: &str = "|";

/// Bound on `goToPage` attempts before the executor gives up
pub const MAX_GO_TO_PAGE_RETRIES: usize = 200;

/// Bound on re-planning when inexact bulk steps leave the cursor short
pub const DEFAULT_MAX_REPLANS: usize = 3;

/// Default number of pages `find_row`/`find_rows` will walk
pub const DEFAULT_MAX_PAGES: usize = 100;

// =============================================================================
// STABILIZATION
// =============================================================================

/// Options for [`stabilize`](crate::stabilize::stabilize)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizeOptions {
    /// What part of the rendered rows is fingerprinted
    pub scope: FingerprintScope,
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
    /// Separator joining row texts for [`FingerprintScope::All`]
    pub separator: String,
}

impl Default for StabilizeOptions {
    fn default() -> Self {
        Self {
            scope: FingerprintScope::First,
            timeout_ms: DEFAULT_STABILIZE_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            separator: DEFAULT_FINGERPRINT_SEPARATOR.to_string(),
        }
    }
}

impl StabilizeOptions {
    /// Create new options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fingerprint scope
    #[must_use]
    pub fn with_scope(mut self, scope: FingerprintScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Set the row separator for [`FingerprintScope::All`]
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// NAVIGATION
// =============================================================================

/// Bulk strides and retry bounds for the navigation executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Positions advanced by one forward bulk call
    pub next_bulk_pages: usize,
    /// Positions retreated by one backward bulk call
    pub previous_bulk_pages: usize,
    /// Attempts allowed for the windowed `goToPage` loop
    pub max_go_to_page_retries: usize,
    /// Re-plans allowed after inexact bulk steps
    pub max_replans: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            next_bulk_pages: 10,
            previous_bulk_pages: 10,
            max_go_to_page_retries: MAX_GO_TO_PAGE_RETRIES,
            max_replans: DEFAULT_MAX_REPLANS,
        }
    }
}

impl NavigationConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both bulk strides
    #[must_use]
    pub const fn with_bulk_pages(mut self, pages: usize) -> Self {
        self.next_bulk_pages = pages;
        self.previous_bulk_pages = pages;
        self
    }

    /// Set the `goToPage` retry bound
    #[must_use]
    pub const fn with_max_go_to_page_retries(mut self, retries: usize) -> Self {
        self.max_go_to_page_retries = retries;
        self
    }

    /// Set the re-plan bound
    #[must_use]
    pub const fn with_max_replans(mut self, replans: usize) -> Self {
        self.max_replans = replans;
        self
    }
}

// =============================================================================
// SCROLLING
// =============================================================================

/// How a virtualized container is scrolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// Dispatch mouse-wheel events over the container
    #[default]
    Wheel,
    /// Write the container's scroll offset directly
    ScrollTop,
}

/// Options for scroll-driven strategies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scroll mechanism
    pub mode: ScrollMode,
    /// Pixels per scroll action
    pub amount: f64,
    /// Timeout per verification in milliseconds
    pub timeout_ms: u64,
    /// Extra verification rounds after the first timeout
    pub retries: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            mode: ScrollMode::Wheel,
            amount: 500.0,
            timeout_ms: DEFAULT_STABILIZE_TIMEOUT_MS,
            retries: 2,
        }
    }
}

impl ScrollConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set scroll mode
    #[must_use]
    pub const fn with_mode(mut self, mode: ScrollMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set scroll amount in pixels
    #[must_use]
    pub const fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set verification retries
    #[must_use]
    pub const fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }
}

// =============================================================================
// SELECTORS
// =============================================================================

/// Logical selectors for the parts of a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSelectors {
    /// Rendered data rows
    pub rows: String,
    /// Cells inside one row
    pub cells: String,
    /// Header cells
    pub headers: String,
    /// "Next page" control
    pub next: Option<String>,
    /// "Previous page" control
    pub previous: Option<String>,
    /// "Load more" control
    pub load_more: Option<String>,
    /// Busy indicator shown while data loads
    pub loading_indicator: Option<String>,
    /// Scrollable container of a virtualized grid
    pub scroll_container: Option<String>,
    /// Numbered page links of a windowed pager
    pub page_links: Option<String>,
}

impl Default for TableSelectors {
    fn default() -> Self {
        Self {
            rows: "tbody tr".to_string(),
            cells: "td".to_string(),
            headers: "thead th".to_string(),
            next: None,
            previous: None,
            load_more: None,
            loading_indicator: None,
            scroll_container: None,
            page_links: None,
        }
    }
}

// =============================================================================
// TABLE CONFIG
// =============================================================================

/// Complete configuration of one [`SmartTable`](crate::table::SmartTable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Element selectors
    pub selectors: TableSelectors,
    /// Stabilization defaults
    pub stabilize: StabilizeOptions,
    /// Navigation bounds
    pub navigation: NavigationConfig,
    /// Scroll behaviour
    pub scroll: ScrollConfig,
    /// Pages walked by searches before giving up
    pub max_pages: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            selectors: TableSelectors::default(),
            stabilize: StabilizeOptions::default(),
            navigation: NavigationConfig::default(),
            scroll: ScrollConfig::default(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl TableConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selectors
    #[must_use]
    pub fn with_selectors(mut self, selectors: TableSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Set stabilization options
    #[must_use]
    pub fn with_stabilize(mut self, stabilize: StabilizeOptions) -> Self {
        self.stabilize = stabilize;
        self
    }

    /// Set navigation config
    #[must_use]
    pub fn with_navigation(mut self, navigation: NavigationConfig) -> Self {
        self.navigation = navigation;
        self
    }

    /// Set scroll config
    #[must_use]
    pub fn with_scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set the page limit for searches
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> TableResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| TableError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> TableResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no strategy can work with
    pub fn validate(&self) -> TableResult<()> {
        if self.selectors.rows.trim().is_empty() {
            return Err(TableError::Config {
                message: "selectors.rows must not be empty".to_string(),
            });
        }
        if self.stabilize.poll_interval_ms == 0 {
            return Err(TableError::Config {
                message: "stabilize.poll_interval_ms must be positive".to_string(),
            });
        }
        if self.navigation.max_go_to_page_retries == 0 {
            return Err(TableError::Config {
                message: "navigation.max_go_to_page_retries must be positive".to_string(),
            });
        }
        Ok(())
    }
}
