//! Stabilization Engine
//!
//! Confirms that a UI action (click, scroll, key press) visibly changed the
//! rendered rows before navigation moves on.
//!
//! The action runs exactly once; only the fingerprint is polled. A timeout is
//! not an error: an action that changes nothing (last page, end of a list)
//! reports `Ok(false)`.

use crate::config::StabilizeOptions;
use crate::driver::GridDriver;
use crate::fingerprint::{capture, Fingerprint, FingerprintScope};
use crate::result::TableResult;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Settle delay used when no loading indicator is configured (500ms)
pub const LOADING_SETTLE_MS: u64 = 500;

/// Capture a fingerprint, perform `action` once, then poll until the
/// fingerprint differs or `options.timeout_ms` elapses.
///
/// Returns `Ok(true)` when the content changed. Errors come only from the
/// driver or from the action itself.
pub async fn stabilize<F, Fut>(
    driver: &dyn GridDriver,
    rows_selector: &str,
    options: &StabilizeOptions,
    action: F,
) -> TableResult<bool>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = TableResult<()>>,
{
    let before = capture(driver, rows_selector, options.scope, &options.separator).await?;
    action().await?;
    poll_for_change(driver, rows_selector, options, &before).await
}

/// Poll without acting until the fingerprint differs from `before`
pub(crate) async fn poll_for_change(
    driver: &dyn GridDriver,
    rows_selector: &str,
    options: &StabilizeOptions,
    before: &Fingerprint,
) -> TableResult<bool> {
    let start = Instant::now();
    let timeout = options.timeout();
    let mut polls = 0usize;

    loop {
        let current = capture(driver, rows_selector, options.scope, &options.separator).await?;
        if &current != before {
            debug!(
                scope = %options.scope,
                polls,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "content changed"
            );
            return Ok(true);
        }
        if start.elapsed() >= timeout {
            debug!(
                scope = %options.scope,
                polls,
                timeout_ms = options.timeout_ms,
                "content unchanged before timeout"
            );
            return Ok(false);
        }
        trace!(polls, fingerprint = %current, "waiting for content change");
        driver.wait(options.poll_interval()).await;
        polls += 1;
    }
}

/// Wait for a busy indicator to disappear.
///
/// With no indicator configured this waits [`LOADING_SETTLE_MS`] and reports
/// success optimistically.
pub async fn wait_for_loading_indicator(
    driver: &dyn GridDriver,
    indicator: Option<&str>,
    options: &StabilizeOptions,
) -> TableResult<bool> {
    let Some(indicator) = indicator else {
        driver.wait(Duration::from_millis(LOADING_SETTLE_MS)).await;
        return Ok(true);
    };

    let start = Instant::now();
    loop {
        if !driver.is_visible(indicator).await? {
            debug!(indicator, elapsed_ms = start.elapsed().as_millis() as u64, "loading finished");
            return Ok(true);
        }
        if start.elapsed() >= options.timeout() {
            debug!(indicator, timeout_ms = options.timeout_ms, "loading indicator still visible");
            return Ok(false);
        }
        driver.wait(options.poll_interval()).await;
    }
}

/// Poll until more than `before` rows are rendered
pub async fn wait_for_row_count_increase(
    driver: &dyn GridDriver,
    rows_selector: &str,
    before: usize,
    options: &StabilizeOptions,
) -> TableResult<bool> {
    let start = Instant::now();
    loop {
        let count = driver.count(rows_selector).await?;
        if count > before {
            debug!(before, count, "row count increased");
            return Ok(true);
        }
        if start.elapsed() >= options.timeout() {
            debug!(before, count, "row count did not increase");
            return Ok(false);
        }
        driver.wait(options.poll_interval()).await;
    }
}

/// How a strategy confirms that its action took effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stabilization {
    /// Fingerprint of the given scope must change
    ContentChange(FingerprintScope),
    /// Number of rendered rows must grow
    RowCountIncrease,
    /// The given busy indicator must disappear
    LoadingIndicator(String),
    /// Trust the action without verification
    None,
}

impl Default for Stabilization {
    fn default() -> Self {
        Self::ContentChange(FingerprintScope::First)
    }
}

impl Stabilization {
    /// Perform `action` once and confirm it with this stabilization
    pub async fn run<F, Fut>(
        &self,
        driver: &dyn GridDriver,
        rows_selector: &str,
        options: &StabilizeOptions,
        action: F,
    ) -> TableResult<bool>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = TableResult<()>>,
    {
        match self {
            Self::ContentChange(scope) => {
                let options = options.clone().with_scope(*scope);
                stabilize(driver, rows_selector, &options, action).await
            }
            Self::RowCountIncrease => {
                let before = driver.count(rows_selector).await?;
                action().await?;
                wait_for_row_count_increase(driver, rows_selector, before, options).await
            }
            Self::LoadingIndicator(indicator) => {
                action().await?;
                wait_for_loading_indicator(driver, Some(indicator), options).await
            }
            Self::None => {
                action().await?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockGrid, RenderMode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn paged(rows: usize, lag: usize) -> MockGrid {
        MockGrid::numbered(rows, RenderMode::Paged { page_size: 10 }).with_render_lag(lag)
    }

    mod stabilize_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_action_invoked_exactly_once_across_polls() {
            let grid = paged(30, 7);
            let invocations = AtomicUsize::new(0);
            let options = StabilizeOptions::default();

            let changed = stabilize(&grid, MockGrid::ROWS, &options, || {
                invocations.fetch_add(1, Ordering::SeqCst);
                grid.click(MockGrid::NEXT, 0)
            })
            .await
            .unwrap();

            assert!(changed);
            assert_eq!(invocations.load(Ordering::SeqCst), 1);
            assert_eq!(grid.call_count("click:"), 1);
            assert_eq!(grid.first_visible_row(), 10);
        }

        #[tokio::test(start_paused = true)]
        async fn test_action_invoked_once_when_nothing_changes() {
            let grid = paged(30, 0);
            let invocations = AtomicUsize::new(0);
            let options = StabilizeOptions::new().with_timeout(1_000);

            let changed = stabilize(&grid, MockGrid::ROWS, &options, || {
                invocations.fetch_add(1, Ordering::SeqCst);
                grid.press_key("Tab")
            })
            .await
            .unwrap();

            assert!(!changed);
            assert_eq!(invocations.load(Ordering::SeqCst), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_timeout_returns_false_not_error() {
            let grid = paged(10, 0);
            let start = Instant::now();
            let options = StabilizeOptions::new().with_timeout(300);

            let changed = stabilize(&grid, MockGrid::ROWS, &options, || grid.click(MockGrid::NEXT, 0))
                .await
                .unwrap();

            assert!(!changed);
            assert!(start.elapsed() >= Duration::from_millis(300));
            assert!(start.elapsed() < Duration::from_millis(500));
        }

        #[tokio::test(start_paused = true)]
        async fn test_count_scope_detects_append() {
            let grid = MockGrid::numbered(30, RenderMode::Append { batch: 10 }).with_render_lag(2);
            let options = StabilizeOptions::new().with_scope(FingerprintScope::Count);

            let changed = stabilize(&grid, MockGrid::ROWS, &options, || {
                grid.click(MockGrid::LOAD_MORE, 0)
            })
            .await
            .unwrap();

            assert!(changed);
            assert_eq!(grid.count(MockGrid::ROWS).await.unwrap(), 20);
        }

        #[tokio::test(start_paused = true)]
        async fn test_action_error_propagates() {
            let grid = paged(10, 0);
            let result = stabilize(&grid, MockGrid::ROWS, &StabilizeOptions::default(), || {
                grid.click(".missing", 0)
            })
            .await;
            assert!(result.is_err());
        }
    }

    mod loading_indicator_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_no_indicator_is_optimistic() {
            let grid = paged(10, 0);
            let start = Instant::now();
            let done = wait_for_loading_indicator(&grid, None, &StabilizeOptions::default())
                .await
                .unwrap();
            assert!(done);
            assert!(start.elapsed() >= Duration::from_millis(LOADING_SETTLE_MS));
        }

        #[tokio::test(start_paused = true)]
        async fn test_waits_until_indicator_hidden() {
            let grid = paged(30, 3);
            grid.click(MockGrid::NEXT, 0).await.unwrap();
            assert!(grid.is_visible(MockGrid::LOADING).await.unwrap());

            let done = wait_for_loading_indicator(
                &grid,
                Some(MockGrid::LOADING),
                &StabilizeOptions::default(),
            )
            .await
            .unwrap();

            assert!(done);
            assert_eq!(grid.first_visible_row(), 10);
        }

        #[tokio::test(start_paused = true)]
        async fn test_indicator_timeout() {
            let grid = paged(30, 100);
            grid.click(MockGrid::NEXT, 0).await.unwrap();
            let options = StabilizeOptions::new().with_timeout(500);
            let done = wait_for_loading_indicator(&grid, Some(MockGrid::LOADING), &options)
                .await
                .unwrap();
            assert!(!done);
        }
    }

    mod stabilization_kind_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_row_count_increase() {
            let grid = MockGrid::numbered(25, RenderMode::Append { batch: 10 }).with_render_lag(1);
            let changed = Stabilization::RowCountIncrease
                .run(&grid, MockGrid::ROWS, &StabilizeOptions::default(), || {
                    grid.click(MockGrid::LOAD_MORE, 0)
                })
                .await
                .unwrap();
            assert!(changed);
        }

        #[tokio::test(start_paused = true)]
        async fn test_content_change_all_scope() {
            let grid = paged(30, 1);
            let changed = Stabilization::ContentChange(FingerprintScope::All)
                .run(&grid, MockGrid::ROWS, &StabilizeOptions::default(), || {
                    grid.click(MockGrid::NEXT, 0)
                })
                .await
                .unwrap();
            assert!(changed);
        }

        #[tokio::test(start_paused = true)]
        async fn test_none_trusts_action() {
            let grid = paged(10, 0);
            let changed = Stabilization::None
                .run(&grid, MockGrid::ROWS, &StabilizeOptions::default(), || {
                    grid.press_key("Tab")
                })
                .await
                .unwrap();
            assert!(changed);
            assert_eq!(grid.call_count("key:Tab"), 1);
        }

        #[test]
        fn test_default_is_first_row_change() {
            assert_eq!(
                Stabilization::default(),
                Stabilization::ContentChange(FingerprintScope::First)
            );
        }
    }
}
