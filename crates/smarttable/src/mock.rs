//! MockGrid: an in-memory [`GridDriver`].
//!
//! Simulates the grid families SmartTable has to cope with, without a
//! browser:
//!
//! - [`RenderMode::Paged`]: a pager with next/previous buttons, a windowed
//!   bar of numbered page links and `PageDown`/`PageUp` keys.
//! - [`RenderMode::Append`]: a growing list fed by a "load more" button or
//!   by scrolling the last row into view.
//! - [`RenderMode::Virtualized`]: a fixed window of recycled row nodes driven
//!   by the container's scroll offset.
//! - [`RenderMode::Canvas`]: like `Virtualized`, but wheel events move the
//!   content while the container's scroll offset never changes.
//!
//! Every state change can be delayed by a render lag: the new content only
//! becomes visible after N calls to [`GridDriver::wait`], and the loading
//! indicator is shown meanwhile.

use crate::driver::{BoundingBox, ElementHandle, GridDriver};
use crate::result::{TableError, TableResult};
use async_trait::async_trait;
use std::ops::Range;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How the mock renders its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Fixed-size pages
    Paged {
        /// Rows per page
        page_size: usize,
    },
    /// Append-only growth in batches
    Append {
        /// Rows added per load
        batch: usize,
    },
    /// Recycling window driven by scroll offset
    Virtualized {
        /// Rendered rows
        window: usize,
    },
    /// Recycling window driven by wheel events only
    Canvas {
        /// Rendered rows
        window: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct View {
    offset: usize,
    loaded: usize,
}

#[derive(Debug, Default)]
struct MockState {
    view: View,
    pending: Option<(usize, View)>,
    scroll_top: f64,
    calls: Vec<String>,
}

impl MockState {
    fn latest(&self) -> View {
        self.pending.map_or(self.view, |(_, view)| view)
    }
}

/// In-memory grid implementing [`GridDriver`]
#[derive(Debug)]
pub struct MockGrid {
    headers: Vec<String>,
    data: Vec<Vec<String>>,
    mode: RenderMode,
    row_height: f64,
    render_lag: usize,
    page_link_radius: usize,
    state: Mutex<MockState>,
}

impl MockGrid {
    /// Data rows
    pub const ROWS: &'static str = "tbody tr";
    /// Cells inside a row
    pub const CELLS: &'static str = "td";
    /// Header cells
    pub const HEADERS: &'static str = "thead th";
    /// Next-page button
    pub const NEXT: &'static str = "button.next";
    /// Previous-page button
    pub const PREVIOUS: &'static str = "button.prev";
    /// Load-more button
    pub const LOAD_MORE: &'static str = "button.load-more";
    /// Busy indicator
    pub const LOADING: &'static str = ".loading";
    /// Scroll container
    pub const CONTAINER: &'static str = ".viewport";
    /// Numbered page links
    pub const PAGE_LINKS: &'static str = ".pager a";

    /// Create a grid over explicit headers and rows
    #[must_use]
    pub fn new(headers: Vec<String>, data: Vec<Vec<String>>, mode: RenderMode) -> Self {
        let loaded = match mode {
            RenderMode::Append { batch } => batch.min(data.len()),
            _ => data.len(),
        };
        Self {
            headers,
            data,
            mode,
            row_height: 20.0,
            render_lag: 0,
            page_link_radius: 2,
            state: Mutex::new(MockState {
                view: View { offset: 0, loaded },
                ..MockState::default()
            }),
        }
    }

    /// Grid of `rows` rows with columns `Name` ("Row 1", "Row 2", ...) and
    /// `Team` (cycling red/green/blue)
    #[must_use]
    pub fn numbered(rows: usize, mode: RenderMode) -> Self {
        const TEAMS: [&str; 3] = ["red", "green", "blue"];
        let data = (0..rows)
            .map(|i| vec![format!("Row {}", i + 1), TEAMS[i % TEAMS.len()].to_string()])
            .collect();
        Self::new(vec!["Name".to_string(), "Team".to_string()], data, mode)
    }

    /// Delay every change by `waits` calls to [`GridDriver::wait`]
    #[must_use]
    pub fn with_render_lag(mut self, waits: usize) -> Self {
        self.render_lag = waits;
        self
    }

    /// Number of page links shown on each side of the current page
    #[must_use]
    pub fn with_page_link_radius(mut self, radius: usize) -> Self {
        self.page_link_radius = radius;
        self
    }

    /// Row height in pixels
    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Start at `position`: a page index for `Paged`, a row offset for
    /// `Virtualized` and `Canvas`. Ignored for `Append`.
    #[must_use]
    pub fn with_start(self, position: usize) -> Self {
        {
            let mut state = self.lock();
            match self.mode {
                RenderMode::Paged { page_size } => {
                    state.view.offset = (position * page_size).min(self.max_offset());
                }
                RenderMode::Virtualized { .. } => {
                    let offset = position.min(self.max_offset());
                    state.view.offset = offset;
                    state.scroll_top = offset as f64 * self.row_height;
                }
                RenderMode::Canvas { .. } => {
                    state.view.offset = position.min(self.max_offset());
                }
                RenderMode::Append { .. } => {}
            }
        }
        self
    }

    /// Every recorded interaction, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of recorded interactions starting with `prefix`
    #[must_use]
    pub fn call_count(&self, prefix: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Forget recorded interactions
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Global index of the first rendered row
    #[must_use]
    pub fn first_visible_row(&self) -> usize {
        self.rendered_range(self.lock().view).start
    }

    /// Current page index (`Paged` mode), otherwise 0
    #[must_use]
    pub fn current_page(&self) -> usize {
        match self.mode {
            RenderMode::Paged { page_size } => self.lock().view.offset / page_size.max(1),
            _ => 0,
        }
    }

    /// Texts of the rows currently rendered
    #[must_use]
    pub fn rendered_texts(&self) -> Vec<String> {
        let view = self.lock().view;
        self.rendered_range(view)
            .map(|i| self.data[i].join("\t"))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn rendered_range(&self, view: View) -> Range<usize> {
        let len = self.data.len();
        match self.mode {
            RenderMode::Paged { page_size } => view.offset..(view.offset + page_size).min(len),
            RenderMode::Append { .. } => 0..view.loaded.min(len),
            RenderMode::Virtualized { window } | RenderMode::Canvas { window } => {
                view.offset..(view.offset + window).min(len)
            }
        }
    }

    fn max_offset(&self) -> usize {
        let len = self.data.len();
        match self.mode {
            RenderMode::Paged { page_size } => {
                let page_size = page_size.max(1);
                len.saturating_sub(1) / page_size * page_size
            }
            RenderMode::Virtualized { window } | RenderMode::Canvas { window } => {
                len.saturating_sub(window)
            }
            RenderMode::Append { .. } => 0,
        }
    }

    fn row_id(&self, global: usize) -> String {
        match self.mode {
            RenderMode::Virtualized { window } | RenderMode::Canvas { window } => {
                format!("slot-{}", global % window.max(1))
            }
            _ => format!("row-{global}"),
        }
    }

    fn schedule(&self, state: &mut MockState, next: View) {
        if next == state.latest() {
            return;
        }
        if self.render_lag == 0 {
            state.view = next;
            state.pending = None;
        } else {
            state.pending = Some((self.render_lag, next));
        }
    }

    fn shift_rows(&self, state: &mut MockState, delta: isize) {
        let latest = state.latest();
        let offset = latest
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
        self.schedule(state, View { offset, ..latest });
    }

    fn scroll_to(&self, state: &mut MockState, top: f64) {
        let max_top = self.max_offset() as f64 * self.row_height;
        let top = top.clamp(0.0, max_top);
        state.scroll_top = top;
        let offset = ((top / self.row_height).floor() as usize).min(self.max_offset());
        let latest = state.latest();
        self.schedule(state, View { offset, ..latest });
    }

    fn load_more(&self, state: &mut MockState) {
        if let RenderMode::Append { batch } = self.mode {
            let latest = state.latest();
            let loaded = (latest.loaded + batch).min(self.data.len());
            self.schedule(state, View { loaded, ..latest });
        }
    }

    fn go_to_page(&self, state: &mut MockState, page: usize) {
        if let RenderMode::Paged { page_size } = self.mode {
            let latest = state.latest();
            let offset = (page * page_size).min(self.max_offset());
            self.schedule(state, View { offset, ..latest });
        }
    }

    fn page_links(&self, view: View) -> Vec<usize> {
        let RenderMode::Paged { page_size } = self.mode else {
            return Vec::new();
        };
        if self.data.is_empty() {
            return Vec::new();
        }
        let page_size = page_size.max(1);
        let current = view.offset / page_size;
        let last = (self.data.len() - 1) / page_size;
        (current.saturating_sub(self.page_link_radius)..=(current + self.page_link_radius).min(last))
            .collect()
    }

    fn has_next(&self, view: View) -> bool {
        match self.mode {
            RenderMode::Paged { page_size } => view.offset + page_size < self.data.len(),
            _ => false,
        }
    }

    fn has_previous(&self, view: View) -> bool {
        matches!(self.mode, RenderMode::Paged { .. }) && view.offset > 0
    }

    fn has_more(&self, view: View) -> bool {
        matches!(self.mode, RenderMode::Append { .. }) && view.loaded < self.data.len()
    }

    fn not_found(selector: &str) -> TableError {
        TableError::ElementNotFound {
            selector: selector.to_string(),
        }
    }
}

#[async_trait]
impl GridDriver for MockGrid {
    async fn count(&self, selector: &str) -> TableResult<usize> {
        let state = self.lock();
        let count = match selector {
            Self::ROWS => self.rendered_range(state.view).len(),
            Self::HEADERS => self.headers.len(),
            Self::PAGE_LINKS => self.page_links(state.view).len(),
            Self::LOADING => usize::from(state.pending.is_some()),
            Self::NEXT => usize::from(self.has_next(state.view)),
            Self::PREVIOUS => usize::from(self.has_previous(state.view)),
            Self::LOAD_MORE => usize::from(self.has_more(state.view)),
            Self::CONTAINER => 1,
            _ => 0,
        };
        Ok(count)
    }

    async fn inner_texts(&self, selector: &str) -> TableResult<Vec<String>> {
        let state = self.lock();
        let texts = match selector {
            Self::ROWS => self
                .rendered_range(state.view)
                .map(|i| self.data[i].join("\t"))
                .collect(),
            Self::HEADERS => self.headers.clone(),
            Self::PAGE_LINKS => self
                .page_links(state.view)
                .into_iter()
                .map(|p| (p + 1).to_string())
                .collect(),
            _ => Vec::new(),
        };
        Ok(texts)
    }

    async fn element_handles(&self, selector: &str) -> TableResult<Vec<ElementHandle>> {
        let state = self.lock();
        let handles = match selector {
            Self::ROWS => self
                .rendered_range(state.view)
                .enumerate()
                .map(|(slot, i)| {
                    ElementHandle::new(self.row_id(i))
                        .with_text(self.data[i].join("\t"))
                        .with_bounding_box(BoundingBox::new(
                            0.0,
                            (slot as f64 * self.row_height) as f32,
                            800.0,
                            self.row_height as f32,
                        ))
                })
                .collect(),
            Self::HEADERS => self
                .headers
                .iter()
                .enumerate()
                .map(|(i, h)| ElementHandle::new(format!("th-{i}")).with_text(h.clone()))
                .collect(),
            _ => Vec::new(),
        };
        Ok(handles)
    }

    async fn child_texts(
        &self,
        parent: &str,
        index: usize,
        child: &str,
    ) -> TableResult<Vec<String>> {
        if parent != Self::ROWS || child != Self::CELLS {
            return Err(Self::not_found(child));
        }
        let state = self.lock();
        self.rendered_range(state.view)
            .nth(index)
            .map(|i| self.data[i].clone())
            .ok_or_else(|| Self::not_found(&format!("{parent} >> nth={index}")))
    }

    async fn is_visible(&self, selector: &str) -> TableResult<bool> {
        let state = self.lock();
        let visible = match selector {
            Self::ROWS => !self.rendered_range(state.view).is_empty(),
            Self::HEADERS | Self::CONTAINER => true,
            Self::PAGE_LINKS => matches!(self.mode, RenderMode::Paged { .. }),
            Self::LOADING => state.pending.is_some(),
            Self::NEXT => self.has_next(state.view),
            Self::PREVIOUS => self.has_previous(state.view),
            Self::LOAD_MORE => self.has_more(state.view),
            _ => false,
        };
        Ok(visible)
    }

    async fn is_enabled(&self, selector: &str) -> TableResult<bool> {
        self.is_visible(selector).await
    }

    async fn bounding_box(&self, selector: &str, index: usize) -> TableResult<Option<BoundingBox>> {
        if selector != Self::ROWS {
            return Ok(None);
        }
        let state = self.lock();
        let rendered = self.rendered_range(state.view).len();
        Ok((index < rendered).then(|| {
            BoundingBox::new(
                0.0,
                (index as f64 * self.row_height) as f32,
                800.0,
                self.row_height as f32,
            )
        }))
    }

    async fn click(&self, selector: &str, index: usize) -> TableResult<()> {
        let mut state = self.lock();
        state.calls.push(format!("click:{selector}:{index}"));
        let view = state.view;
        match selector {
            Self::NEXT => {
                if self.has_next(view) {
                    let page = view.offset / self.page_size() + 1;
                    self.go_to_page(&mut state, page);
                }
            }
            Self::PREVIOUS => {
                if self.has_previous(view) {
                    let page = view.offset / self.page_size() - 1;
                    self.go_to_page(&mut state, page);
                }
            }
            Self::LOAD_MORE => self.load_more(&mut state),
            Self::PAGE_LINKS => {
                let page = *self
                    .page_links(view)
                    .get(index)
                    .ok_or_else(|| Self::not_found(&format!("{selector} >> nth={index}")))?;
                self.go_to_page(&mut state, page);
            }
            _ => return Err(Self::not_found(selector)),
        }
        Ok(())
    }

    async fn press_key(&self, key: &str) -> TableResult<()> {
        let mut state = self.lock();
        state.calls.push(format!("key:{key}"));
        let view = state.latest();
        match (self.mode, key) {
            (RenderMode::Paged { page_size }, "PageDown") => {
                self.go_to_page(&mut state, view.offset / page_size.max(1) + 1);
            }
            (RenderMode::Paged { page_size }, "PageUp") => {
                let page = (view.offset / page_size.max(1)).saturating_sub(1);
                self.go_to_page(&mut state, page);
            }
            (RenderMode::Virtualized { window }, "PageDown") => {
                let top = state.scroll_top + window as f64 * self.row_height;
                self.scroll_to(&mut state, top);
            }
            (RenderMode::Virtualized { window }, "PageUp") => {
                let top = state.scroll_top - window as f64 * self.row_height;
                self.scroll_to(&mut state, top);
            }
            (RenderMode::Virtualized { .. }, "ArrowDown") => {
                let top = state.scroll_top + self.row_height;
                self.scroll_to(&mut state, top);
            }
            (RenderMode::Virtualized { .. }, "ArrowUp") => {
                let top = state.scroll_top - self.row_height;
                self.scroll_to(&mut state, top);
            }
            (RenderMode::Canvas { window }, "PageDown") => {
                self.shift_rows(&mut state, window as isize);
            }
            (RenderMode::Canvas { window }, "PageUp") => {
                self.shift_rows(&mut state, -(window as isize));
            }
            (RenderMode::Canvas { .. }, "ArrowDown") => self.shift_rows(&mut state, 1),
            (RenderMode::Canvas { .. }, "ArrowUp") => self.shift_rows(&mut state, -1),
            _ => {}
        }
        Ok(())
    }

    async fn mouse_wheel(&self, selector: &str, delta_x: f64, delta_y: f64) -> TableResult<()> {
        if selector != Self::CONTAINER {
            return Err(Self::not_found(selector));
        }
        let mut state = self.lock();
        state.calls.push(format!("wheel:{selector}:{delta_x}:{delta_y}"));
        match self.mode {
            RenderMode::Virtualized { .. } => {
                let top = state.scroll_top + delta_y;
                self.scroll_to(&mut state, top);
            }
            RenderMode::Canvas { .. } => {
                let rows = (delta_y / self.row_height).trunc() as isize;
                self.shift_rows(&mut state, rows);
            }
            RenderMode::Append { .. } => {
                if delta_y > 0.0 {
                    self.load_more(&mut state);
                }
            }
            RenderMode::Paged { .. } => {}
        }
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &str, index: usize) -> TableResult<()> {
        let mut state = self.lock();
        state.calls.push(format!("scroll_into_view:{selector}:{index}"));
        if selector == Self::ROWS {
            let view = state.view;
            if index + 1 >= self.rendered_range(view).len() {
                self.load_more(&mut state);
            }
        }
        Ok(())
    }

    async fn scroll_offset(&self, selector: &str) -> TableResult<f64> {
        if selector != Self::CONTAINER {
            return Err(Self::not_found(selector));
        }
        Ok(self.lock().scroll_top)
    }

    async fn set_scroll_offset(&self, selector: &str, offset: f64) -> TableResult<()> {
        if selector != Self::CONTAINER {
            return Err(Self::not_found(selector));
        }
        let mut state = self.lock();
        state.calls.push(format!("set_scroll:{selector}:{offset}"));
        if matches!(self.mode, RenderMode::Virtualized { .. }) {
            self.scroll_to(&mut state, offset);
        }
        Ok(())
    }

    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
        let mut state = self.lock();
        if let Some((remaining, view)) = state.pending {
            if remaining <= 1 {
                state.view = view;
                state.pending = None;
            } else {
                state.pending = Some((remaining - 1, view));
            }
        }
    }
}

impl MockGrid {
    fn page_size(&self) -> usize {
        match self.mode {
            RenderMode::Paged { page_size } => page_size.max(1),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod paged_tests {
        use super::*;

        #[tokio::test]
        async fn test_first_page_rendered() {
            let grid = MockGrid::numbered(25, RenderMode::Paged { page_size: 10 });
            assert_eq!(grid.count(MockGrid::ROWS).await.unwrap(), 10);
            assert_eq!(
                grid.inner_text(MockGrid::ROWS, 0).await.unwrap().as_deref(),
                Some("Row 1\tred")
            );
            assert!(grid.is_visible(MockGrid::NEXT).await.unwrap());
            assert!(!grid.is_visible(MockGrid::PREVIOUS).await.unwrap());
        }

        #[tokio::test]
        async fn test_next_until_last_page() {
            let grid = MockGrid::numbered(25, RenderMode::Paged { page_size: 10 });
            grid.click(MockGrid::NEXT, 0).await.unwrap();
            grid.click(MockGrid::NEXT, 0).await.unwrap();
            assert_eq!(grid.current_page(), 2);
            assert_eq!(grid.count(MockGrid::ROWS).await.unwrap(), 5);
            assert!(!grid.is_visible(MockGrid::NEXT).await.unwrap());

            grid.click(MockGrid::NEXT, 0).await.unwrap();
            assert_eq!(grid.current_page(), 2);
            assert_eq!(grid.call_count("click:button.next"), 3);
        }

        #[tokio::test]
        async fn test_page_links_are_windowed() {
            let grid = MockGrid::numbered(100, RenderMode::Paged { page_size: 10 })
                .with_page_link_radius(2)
                .with_start(5);
            let labels = grid.inner_texts(MockGrid::PAGE_LINKS).await.unwrap();
            assert_eq!(labels, vec!["4", "5", "6", "7", "8"]);

            grid.click(MockGrid::PAGE_LINKS, 4).await.unwrap();
            assert_eq!(grid.current_page(), 7);
        }

        #[tokio::test]
        async fn test_page_keys() {
            let grid = MockGrid::numbered(30, RenderMode::Paged { page_size: 10 });
            grid.press_key("PageDown").await.unwrap();
            grid.press_key("PageDown").await.unwrap();
            grid.press_key("PageUp").await.unwrap();
            assert_eq!(grid.current_page(), 1);
        }

        #[tokio::test]
        async fn test_unknown_selector_click_fails() {
            let grid = MockGrid::numbered(5, RenderMode::Paged { page_size: 10 });
            assert!(grid.click("#nope", 0).await.is_err());
        }
    }

    mod lag_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_change_visible_after_lag() {
            let grid = MockGrid::numbered(30, RenderMode::Paged { page_size: 10 }).with_render_lag(2);
            grid.click(MockGrid::NEXT, 0).await.unwrap();
            assert_eq!(grid.first_visible_row(), 0);
            assert!(grid.is_visible(MockGrid::LOADING).await.unwrap());

            grid.wait(Duration::from_millis(100)).await;
            assert_eq!(grid.first_visible_row(), 0);
            grid.wait(Duration::from_millis(100)).await;
            assert_eq!(grid.first_visible_row(), 10);
            assert!(!grid.is_visible(MockGrid::LOADING).await.unwrap());
        }
    }

    mod append_tests {
        use super::*;

        #[tokio::test]
        async fn test_load_more_and_scroll_into_view() {
            let grid = MockGrid::numbered(25, RenderMode::Append { batch: 10 });
            assert!(grid.is_visible(MockGrid::LOAD_MORE).await.unwrap());
            grid.click(MockGrid::LOAD_MORE, 0).await.unwrap();
            assert_eq!(grid.count(MockGrid::ROWS).await.unwrap(), 20);

            grid.scroll_into_view(MockGrid::ROWS, 19).await.unwrap();
            assert_eq!(grid.count(MockGrid::ROWS).await.unwrap(), 25);
            assert!(!grid.is_visible(MockGrid::LOAD_MORE).await.unwrap());
        }

        #[tokio::test]
        async fn test_append_ids_are_stable() {
            let grid = MockGrid::numbered(20, RenderMode::Append { batch: 10 });
            let before = grid.element_handles(MockGrid::ROWS).await.unwrap();
            grid.click(MockGrid::LOAD_MORE, 0).await.unwrap();
            let after = grid.element_handles(MockGrid::ROWS).await.unwrap();
            assert_eq!(before[..], after[..10]);
        }
    }

    mod virtualized_tests {
        use super::*;

        #[tokio::test]
        async fn test_wheel_recycles_slots() {
            let grid = MockGrid::numbered(100, RenderMode::Virtualized { window: 10 });
            let before = grid.element_handles(MockGrid::ROWS).await.unwrap();
            grid.mouse_wheel(MockGrid::CONTAINER, 0.0, 20.0).await.unwrap();
            let after = grid.element_handles(MockGrid::ROWS).await.unwrap();

            assert_eq!(grid.first_visible_row(), 1);
            assert_eq!(grid.scroll_offset(MockGrid::CONTAINER).await.unwrap(), 20.0);
            // Row 11 now occupies the node that used to show Row 1
            assert_eq!(after[9].id, before[0].id);
            assert_eq!(after[9].text(), "Row 11\tgreen");
        }

        #[tokio::test]
        async fn test_scroll_clamps_at_bottom() {
            let grid = MockGrid::numbered(100, RenderMode::Virtualized { window: 10 });
            grid.set_scroll_offset(MockGrid::CONTAINER, 10_000.0).await.unwrap();
            assert_eq!(grid.first_visible_row(), 90);
            assert_eq!(grid.scroll_offset(MockGrid::CONTAINER).await.unwrap(), 1_800.0);
        }

        #[tokio::test]
        async fn test_canvas_wheel_moves_content_not_container() {
            let grid = MockGrid::numbered(50, RenderMode::Canvas { window: 10 });
            grid.mouse_wheel(MockGrid::CONTAINER, 0.0, 100.0).await.unwrap();
            assert_eq!(grid.first_visible_row(), 5);
            assert_eq!(grid.scroll_offset(MockGrid::CONTAINER).await.unwrap(), 0.0);
        }
    }
}
