//! Pagination and scroll strategies.
//!
//! A strategy performs one "load the next chunk" cycle and reports whether
//! new content appeared. Every cycle is `Idle -> Verifying -> Idle`: the
//! action is issued once and its effect confirmed before `advance` returns.
//!
//! | Strategy | Action | Confirmation |
//! |----------|--------|--------------|
//! | [`ClickNext`] | click the next control | first-row text change |
//! | [`ClickLoadMore`] | click the load-more control | row count increase |
//! | [`InfiniteScroll`] | scroll last row into view | row count increase |
//! | [`VirtualizedInfiniteScroll`] | wheel or scroll offset | all-rows fingerprint change |

use crate::config::{ScrollConfig, ScrollMode, StabilizeOptions, TableConfig};
use crate::driver::GridDriver;
use crate::fingerprint::{capture, FingerprintScope};
use crate::result::TableResult;
use crate::stabilize::{poll_for_change, wait_for_row_count_increase, Stabilization};
use async_trait::async_trait;
use std::fmt;
use tracing::debug;

/// One way of bringing more rows into view
#[async_trait]
pub trait PaginationStrategy: Send + Sync + fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Perform one load cycle.
    ///
    /// `Ok(false)` means nothing more could be loaded (end of data, control
    /// disabled, or no visible change before the timeout).
    async fn advance(&self, driver: &dyn GridDriver, rows_selector: &str) -> TableResult<bool>;
}

/// Click a "next page" control
#[derive(Debug, Clone)]
pub struct ClickNext {
    selector: String,
    stabilization: Stabilization,
    options: StabilizeOptions,
}

impl ClickNext {
    /// Click `selector`, confirming by first-row text change
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            stabilization: Stabilization::default(),
            options: StabilizeOptions::default(),
        }
    }

    /// Confirm the click with a different stabilization
    #[must_use]
    pub fn with_stabilization(mut self, stabilization: Stabilization) -> Self {
        self.stabilization = stabilization;
        self
    }

    /// Set polling options
    #[must_use]
    pub fn with_options(mut self, options: StabilizeOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl PaginationStrategy for ClickNext {
    fn name(&self) -> &'static str {
        "click_next"
    }

    async fn advance(&self, driver: &dyn GridDriver, rows_selector: &str) -> TableResult<bool> {
        if !is_actionable(driver, &self.selector).await? {
            debug!(selector = %self.selector, "next control absent or disabled");
            return Ok(false);
        }
        self.stabilization
            .run(driver, rows_selector, &self.options, || {
                driver.click(&self.selector, 0)
            })
            .await
    }
}

/// Click a "load more" control
#[derive(Debug, Clone)]
pub struct ClickLoadMore {
    selector: String,
    options: StabilizeOptions,
}

impl ClickLoadMore {
    /// Click `selector`, confirming by row count increase
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            options: StabilizeOptions::default(),
        }
    }

    /// Set polling options
    #[must_use]
    pub fn with_options(mut self, options: StabilizeOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl PaginationStrategy for ClickLoadMore {
    fn name(&self) -> &'static str {
        "click_load_more"
    }

    async fn advance(&self, driver: &dyn GridDriver, rows_selector: &str) -> TableResult<bool> {
        if !is_actionable(driver, &self.selector).await? {
            debug!(selector = %self.selector, "load-more control absent or disabled");
            return Ok(false);
        }
        Stabilization::RowCountIncrease
            .run(driver, rows_selector, &self.options, || {
                driver.click(&self.selector, 0)
            })
            .await
    }
}

/// Scroll the last rendered row into view to trigger lazy loading
#[derive(Debug, Clone, Default)]
pub struct InfiniteScroll {
    options: StabilizeOptions,
}

impl InfiniteScroll {
    /// Create with default polling options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set polling options
    #[must_use]
    pub fn with_options(mut self, options: StabilizeOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl PaginationStrategy for InfiniteScroll {
    fn name(&self) -> &'static str {
        "infinite_scroll"
    }

    async fn advance(&self, driver: &dyn GridDriver, rows_selector: &str) -> TableResult<bool> {
        let before = driver.count(rows_selector).await?;
        if before == 0 {
            return Ok(false);
        }
        driver.scroll_into_view(rows_selector, before - 1).await?;
        wait_for_row_count_increase(driver, rows_selector, before, &self.options).await
    }
}

/// Scroll a virtualized container whose row count never changes
#[derive(Debug, Clone)]
pub struct VirtualizedInfiniteScroll {
    container: String,
    scroll: ScrollConfig,
    options: StabilizeOptions,
}

impl VirtualizedInfiniteScroll {
    /// Scroll `container` with the default [`ScrollConfig`]
    #[must_use]
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            scroll: ScrollConfig::default(),
            options: StabilizeOptions::default().with_scope(FingerprintScope::All),
        }
    }

    /// Set scroll behaviour
    #[must_use]
    pub fn with_scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set polling options. The fingerprint always covers all rows.
    #[must_use]
    pub fn with_options(mut self, options: StabilizeOptions) -> Self {
        self.options = options.with_scope(FingerprintScope::All);
        self
    }
}

#[async_trait]
impl PaginationStrategy for VirtualizedInfiniteScroll {
    fn name(&self) -> &'static str {
        "virtualized_infinite_scroll"
    }

    async fn advance(&self, driver: &dyn GridDriver, rows_selector: &str) -> TableResult<bool> {
        let before = capture(
            driver,
            rows_selector,
            FingerprintScope::All,
            &self.options.separator,
        )
        .await?;
        let offset_before = driver.scroll_offset(&self.container).await?;

        scroll_container(driver, &self.container, self.scroll.mode, self.scroll.amount).await?;

        let round = self.options.clone().with_timeout(self.scroll.timeout_ms);
        let mut changed = false;
        for attempt in 0..=self.scroll.retries {
            if poll_for_change(driver, rows_selector, &round, &before).await? {
                changed = true;
                break;
            }
            debug!(container = %self.container, attempt, "no content change yet");
        }

        let offset_after = driver.scroll_offset(&self.container).await?;
        debug!(
            container = %self.container,
            from = offset_before,
            to = offset_after,
            moved = (offset_after - offset_before).abs() >= f64::EPSILON,
            changed,
            "scroll cycle finished"
        );
        Ok(changed)
    }
}

/// Move `container` by `amount` pixels
pub(crate) async fn scroll_container(
    driver: &dyn GridDriver,
    container: &str,
    mode: ScrollMode,
    amount: f64,
) -> TableResult<()> {
    match mode {
        ScrollMode::Wheel => driver.mouse_wheel(container, 0.0, amount).await,
        ScrollMode::ScrollTop => {
            let offset = driver.scroll_offset(container).await?;
            driver.set_scroll_offset(container, offset + amount).await
        }
    }
}

async fn is_actionable(driver: &dyn GridDriver, selector: &str) -> TableResult<bool> {
    Ok(driver.is_visible(selector).await? && driver.is_enabled(selector).await?)
}

/// Confirmation for click-driven page changes: the configured loading
/// indicator when there is one, otherwise a first-row change.
pub(crate) fn click_stabilization(config: &TableConfig) -> Stabilization {
    config
        .selectors
        .loading_indicator
        .as_ref()
        .map_or_else(Stabilization::default, |indicator| {
            Stabilization::LoadingIndicator(indicator.clone())
        })
}

/// Strategy implied by the configured selectors.
///
/// A next control wins over a load-more control, which wins over a scroll
/// container. `None` when the table has no way to load more rows.
#[must_use]
pub fn strategy_for(config: &TableConfig) -> Option<Box<dyn PaginationStrategy>> {
    let selectors = &config.selectors;
    if let Some(next) = &selectors.next {
        return Some(Box::new(
            ClickNext::new(next.clone())
                .with_stabilization(click_stabilization(config))
                .with_options(config.stabilize.clone()),
        ));
    }
    if let Some(load_more) = &selectors.load_more {
        return Some(Box::new(
            ClickLoadMore::new(load_more.clone()).with_options(config.stabilize.clone()),
        ));
    }
    selectors.scroll_container.as_ref().map(|container| {
        Box::new(
            VirtualizedInfiniteScroll::new(container.clone())
                .with_scroll(config.scroll)
                .with_options(config.stabilize.clone()),
        ) as Box<dyn PaginationStrategy>
    })
}
