//! Navigation primitives.
//!
//! A concrete grid offers any subset of `goNext`, `goPrevious`, `goNextBulk`,
//! `goPreviousBulk` and `goToPage`. [`NavigationPrimitives`] holds each as an
//! optional handle; the planner and executor branch only on presence.

use crate::config::{NavigationConfig, ScrollMode, StabilizeOptions};
use crate::driver::GridDriver;
use crate::fingerprint::FingerprintScope;
use crate::planner::{NavStep, PrimitiveSet};
use crate::result::TableResult;
use crate::stabilize::{stabilize, Stabilization};
use crate::strategies::{scroll_container, PaginationStrategy};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// What a single primitive call achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveOutcome {
    /// Moved by the nominal amount (1, or the bulk stride)
    Success,
    /// Did not move
    Failure,
    /// Moved by exactly this many positions (bulk steps near the end of data)
    Advanced(usize),
}

impl From<bool> for PrimitiveOutcome {
    fn from(moved: bool) -> Self {
        if moved {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// A step primitive (`goNext`, `goPrevious` and their bulk variants)
#[async_trait]
pub trait NavPrimitive: Send + Sync {
    /// Move once and report what happened
    async fn invoke(&self, driver: &dyn GridDriver) -> TableResult<PrimitiveOutcome>;
}

/// A direct jump primitive (`goToPage`).
///
/// A windowed pager may only reach some targets; `Ok(false)` says the target
/// is not reachable from here.
#[async_trait]
pub trait PageJump: Send + Sync {
    /// Jump to `target`
    async fn jump(&self, driver: &dyn GridDriver, target: usize) -> TableResult<bool>;
}

/// Click a control and confirm the click changed the rows
#[derive(Debug, Clone)]
pub struct ClickControl {
    selector: String,
    rows_selector: String,
    stabilization: Stabilization,
    options: StabilizeOptions,
}

impl ClickControl {
    /// Click `selector`, watching `rows_selector` for a first-row change
    #[must_use]
    pub fn new(selector: impl Into<String>, rows_selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            rows_selector: rows_selector.into(),
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
impl NavPrimitive for ClickControl {
    async fn invoke(&self, driver: &dyn GridDriver) -> TableResult<PrimitiveOutcome> {
        if !driver.is_visible(&self.selector).await? || !driver.is_enabled(&self.selector).await? {
            debug!(selector = %self.selector, "control not clickable");
            return Ok(PrimitiveOutcome::Failure);
        }
        let changed = self
            .stabilization
            .run(driver, &self.rows_selector, &self.options, || {
                driver.click(&self.selector, 0)
            })
            .await?;
        Ok(changed.into())
    }
}

/// Press a key and confirm the rows changed
#[derive(Debug, Clone)]
pub struct PressKey {
    key: String,
    rows_selector: String,
    options: StabilizeOptions,
}

impl PressKey {
    /// Press `key`, watching all rows of `rows_selector`
    #[must_use]
    pub fn new(key: impl Into<String>, rows_selector: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            rows_selector: rows_selector.into(),
            options: StabilizeOptions::default().with_scope(FingerprintScope::All),
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
impl NavPrimitive for PressKey {
    async fn invoke(&self, driver: &dyn GridDriver) -> TableResult<PrimitiveOutcome> {
        let changed = stabilize(driver, &self.rows_selector, &self.options, || {
            driver.press_key(&self.key)
        })
        .await?;
        Ok(changed.into())
    }
}

/// Scroll a container by a fixed number of pixels and confirm the rows changed.
///
/// One full scroll of `delta` pixels counts as `positions` positions. When
/// the container clamps the scroll near either end, the call reports
/// [`PrimitiveOutcome::Advanced`] scaled to the pixels actually moved. A
/// container whose offset never changes (canvas grids) is trusted to have
/// moved the full amount once the rows changed.
#[derive(Debug, Clone)]
pub struct ScrollBy {
    container: String,
    rows_selector: String,
    delta: f64,
    positions: usize,
    mode: ScrollMode,
    options: StabilizeOptions,
}

impl ScrollBy {
    /// Wheel-scroll `container` by `delta` pixels (negative scrolls up)
    #[must_use]
    pub fn new(container: impl Into<String>, rows_selector: impl Into<String>, delta: f64) -> Self {
        Self {
            container: container.into(),
            rows_selector: rows_selector.into(),
            delta,
            positions: 1,
            mode: ScrollMode::Wheel,
            options: StabilizeOptions::default().with_scope(FingerprintScope::All),
        }
    }

    /// Number of positions one full scroll represents (the bulk stride)
    #[must_use]
    pub fn with_positions(mut self, positions: usize) -> Self {
        self.positions = positions;
        self
    }

    /// Set scroll mechanism
    #[must_use]
    pub fn with_mode(mut self, mode: ScrollMode) -> Self {
        self.mode = mode;
        self
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn outcome(&self, moved: f64) -> PrimitiveOutcome {
        let full = self.delta.abs();
        if moved < f64::EPSILON || moved + f64::EPSILON >= full {
            return PrimitiveOutcome::Success;
        }
        let positions = (moved / full * self.positions as f64).round().max(1.0);
        PrimitiveOutcome::Advanced(positions as usize)
    }

    /// Set polling options
    #[must_use]
    pub fn with_options(mut self, options: StabilizeOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl NavPrimitive for ScrollBy {
    async fn invoke(&self, driver: &dyn GridDriver) -> TableResult<PrimitiveOutcome> {
        let offset_before = driver.scroll_offset(&self.container).await?;
        let changed = stabilize(driver, &self.rows_selector, &self.options, || {
            scroll_container(driver, &self.container, self.mode, self.delta)
        })
        .await?;
        if !changed {
            return Ok(PrimitiveOutcome::Failure);
        }
        let moved = (driver.scroll_offset(&self.container).await? - offset_before).abs();
        let outcome = self.outcome(moved);
        if outcome != PrimitiveOutcome::Success {
            debug!(
                container = %self.container,
                moved,
                requested = self.delta,
                ?outcome,
                "scroll clamped by container"
            );
        }
        Ok(outcome)
    }
}

/// Adapt a [`PaginationStrategy`] into a forward step primitive
#[derive(Debug, Clone)]
pub struct StrategyPrimitive {
    strategy: Arc<dyn PaginationStrategy>,
    rows_selector: String,
}

impl StrategyPrimitive {
    /// Wrap `strategy`, advancing rows matched by `rows_selector`
    #[must_use]
    pub fn new(strategy: Arc<dyn PaginationStrategy>, rows_selector: impl Into<String>) -> Self {
        Self {
            strategy,
            rows_selector: rows_selector.into(),
        }
    }
}

#[async_trait]
impl NavPrimitive for StrategyPrimitive {
    async fn invoke(&self, driver: &dyn GridDriver) -> TableResult<PrimitiveOutcome> {
        Ok(self.strategy.advance(driver, &self.rows_selector).await?.into())
    }
}

/// Step primitive backed by a closure
pub struct FnPrimitive<F> {
    f: F,
}

impl<F> FnPrimitive<F>
where
    F: for<'a> Fn(&'a dyn GridDriver) -> BoxFuture<'a, TableResult<PrimitiveOutcome>> + Send + Sync,
{
    /// Wrap `f`
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnPrimitive<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPrimitive").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> NavPrimitive for FnPrimitive<F>
where
    F: for<'a> Fn(&'a dyn GridDriver) -> BoxFuture<'a, TableResult<PrimitiveOutcome>> + Send + Sync,
{
    async fn invoke(&self, driver: &dyn GridDriver) -> TableResult<PrimitiveOutcome> {
        (self.f)(driver).await
    }
}

/// Click the page link labelled with the 1-based target page.
///
/// Only links currently rendered by a windowed pager are reachable; any
/// other target reports `Ok(false)`.
#[derive(Debug, Clone)]
pub struct ClickPageLink {
    links_selector: String,
    rows_selector: String,
    options: StabilizeOptions,
}

impl ClickPageLink {
    /// Click links matched by `links_selector`
    #[must_use]
    pub fn new(links_selector: impl Into<String>, rows_selector: impl Into<String>) -> Self {
        Self {
            links_selector: links_selector.into(),
            rows_selector: rows_selector.into(),
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
impl PageJump for ClickPageLink {
    async fn jump(&self, driver: &dyn GridDriver, target: usize) -> TableResult<bool> {
        let label = (target + 1).to_string();
        let labels = driver.inner_texts(&self.links_selector).await?;
        let Some(index) = labels.iter().position(|text| text.trim() == label) else {
            debug!(target, visible = labels.len(), "page link not rendered");
            return Ok(false);
        };
        stabilize(driver, &self.rows_selector, &self.options, || {
            driver.click(&self.links_selector, index)
        })
        .await
    }
}

/// The primitives one grid offers, plus the nominal bulk strides
#[derive(Clone)]
pub struct NavigationPrimitives {
    go_next: Option<Arc<dyn NavPrimitive>>,
    go_previous: Option<Arc<dyn NavPrimitive>>,
    go_next_bulk: Option<Arc<dyn NavPrimitive>>,
    go_previous_bulk: Option<Arc<dyn NavPrimitive>>,
    go_to_page: Option<Arc<dyn PageJump>>,
    next_bulk_pages: usize,
    previous_bulk_pages: usize,
}

impl Default for NavigationPrimitives {
    fn default() -> Self {
        let config = NavigationConfig::default();
        Self {
            go_next: None,
            go_previous: None,
            go_next_bulk: None,
            go_previous_bulk: None,
            go_to_page: None,
            next_bulk_pages: config.next_bulk_pages,
            previous_bulk_pages: config.previous_bulk_pages,
        }
    }
}

impl fmt::Debug for NavigationPrimitives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationPrimitives")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

impl NavigationPrimitives {
    /// No primitives
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take bulk strides from `config`
    #[must_use]
    pub fn with_config(mut self, config: &NavigationConfig) -> Self {
        self.next_bulk_pages = config.next_bulk_pages;
        self.previous_bulk_pages = config.previous_bulk_pages;
        self
    }

    /// Set `goNext`
    #[must_use]
    pub fn with_go_next(mut self, primitive: impl NavPrimitive + 'static) -> Self {
        self.go_next = Some(Arc::new(primitive));
        self
    }

    /// Set `goPrevious`
    #[must_use]
    pub fn with_go_previous(mut self, primitive: impl NavPrimitive + 'static) -> Self {
        self.go_previous = Some(Arc::new(primitive));
        self
    }

    /// Set `goNextBulk` moving `stride` positions per call
    #[must_use]
    pub fn with_go_next_bulk(mut self, primitive: impl NavPrimitive + 'static, stride: usize) -> Self {
        self.go_next_bulk = Some(Arc::new(primitive));
        self.next_bulk_pages = stride;
        self
    }

    /// Set `goPreviousBulk` moving `stride` positions per call
    #[must_use]
    pub fn with_go_previous_bulk(
        mut self,
        primitive: impl NavPrimitive + 'static,
        stride: usize,
    ) -> Self {
        self.go_previous_bulk = Some(Arc::new(primitive));
        self.previous_bulk_pages = stride;
        self
    }

    /// Set `goToPage`
    #[must_use]
    pub fn with_go_to_page(mut self, primitive: impl PageJump + 'static) -> Self {
        self.go_to_page = Some(Arc::new(primitive));
        self
    }

    /// `goToPage`, if offered
    #[must_use]
    pub fn go_to_page(&self) -> Option<&dyn PageJump> {
        self.go_to_page.as_deref()
    }

    /// Forward bulk stride
    #[must_use]
    pub const fn next_bulk_pages(&self) -> usize {
        self.next_bulk_pages
    }

    /// Backward bulk stride
    #[must_use]
    pub const fn previous_bulk_pages(&self) -> usize {
        self.previous_bulk_pages
    }

    /// The step primitive a planned step invokes, if offered
    #[must_use]
    pub fn for_step(&self, step: &NavStep) -> Option<&dyn NavPrimitive> {
        let slot = match step {
            NavStep::Next(_) => &self.go_next,
            NavStep::NextBulk(_) => &self.go_next_bulk,
            NavStep::Previous(_) => &self.go_previous,
            NavStep::PreviousBulk(_) => &self.go_previous_bulk,
            NavStep::GoToPage(_) => return None,
        };
        slot.as_deref()
    }

    /// What the planner may use
    #[must_use]
    pub fn capabilities(&self) -> PrimitiveSet {
        PrimitiveSet {
            go_next: self.go_next.is_some(),
            go_previous: self.go_previous.is_some(),
            go_next_bulk: self
                .go_next_bulk
                .as_ref()
                .map(|_| self.next_bulk_pages)
                .filter(|stride| *stride > 0),
            go_previous_bulk: self
                .go_previous_bulk
                .as_ref()
                .map(|_| self.previous_bulk_pages)
                .filter(|stride| *stride > 0),
            go_to_page: self.go_to_page.is_some(),
        }
    }

    /// Whether no primitive is offered at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capabilities() == PrimitiveSet::none()
    }
}
