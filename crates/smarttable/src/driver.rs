//! GridDriver - Abstract Browser Capability Trait
//!
//! SmartTable never talks to a browser engine directly. Whatever automation
//! layer hosts it (CDP, WebDriver, an in-page harness, or [`MockGrid`]) only
//! has to provide the capabilities below:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  GridDriver (Abstract Trait)                                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │  query    count / inner_texts / element_handles / child_texts │
//! │           is_visible / is_enabled / bounding_box              │
//! │  inject   click / press_key / mouse_wheel / scroll_into_view  │
//! │           scroll_offset / set_scroll_offset                   │
//! │  time     wait                                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`MockGrid`]: crate::mock::MockGrid

use crate::result::TableResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounding box for an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X position
    pub x: f32,
    /// Y position
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Handle to a rendered element.
///
/// `id` is the element's identity as seen by the driver. A virtualized grid
/// that recycles a node keeps its `id` while `text_content` changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Stable identity of the DOM node
    pub id: String,
    /// Element text content
    pub text_content: Option<String>,
    /// Bounding box if visible
    pub bounding_box: Option<BoundingBox>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text_content: None,
            bounding_box: None,
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Set the bounding box
    #[must_use]
    pub const fn with_bounding_box(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox);
        self
    }

    /// Text content, empty when the element has none
    #[must_use]
    pub fn text(&self) -> &str {
        self.text_content.as_deref().unwrap_or("")
    }

    /// Check if element is visible
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.bounding_box.is_some()
    }
}

/// Capability contract supplied by the host automation layer.
///
/// Selectors are opaque strings; their syntax belongs to the driver.
/// Indexed operations address the n-th match of a selector.
#[async_trait]
pub trait GridDriver: Send + Sync {
    /// Number of elements matching `selector`
    async fn count(&self, selector: &str) -> TableResult<usize>;

    /// Inner text of every element matching `selector`, in document order
    async fn inner_texts(&self, selector: &str) -> TableResult<Vec<String>>;

    /// Handles (identity + text) of every element matching `selector`
    async fn element_handles(&self, selector: &str) -> TableResult<Vec<ElementHandle>>;

    /// Inner texts of `child` elements inside the `index`-th `parent` match
    async fn child_texts(&self, parent: &str, index: usize, child: &str)
        -> TableResult<Vec<String>>;

    /// Whether the first match of `selector` exists and is visible
    async fn is_visible(&self, selector: &str) -> TableResult<bool>;

    /// Whether the first match of `selector` exists and is enabled
    async fn is_enabled(&self, selector: &str) -> TableResult<bool>;

    /// Geometry of the `index`-th match, `None` when not rendered
    async fn bounding_box(&self, selector: &str, index: usize)
        -> TableResult<Option<BoundingBox>>;

    /// Click the `index`-th match of `selector`
    async fn click(&self, selector: &str, index: usize) -> TableResult<()>;

    /// Press a keyboard key (e.g. `PageDown`)
    async fn press_key(&self, key: &str) -> TableResult<()>;

    /// Dispatch a mouse-wheel event over the first match of `selector`
    async fn mouse_wheel(&self, selector: &str, delta_x: f64, delta_y: f64) -> TableResult<()>;

    /// Scroll the `index`-th match of `selector` into the viewport
    async fn scroll_into_view(&self, selector: &str, index: usize) -> TableResult<()>;

    /// Current vertical scroll offset of the first match of `selector`
    async fn scroll_offset(&self, selector: &str) -> TableResult<f64>;

    /// Force the vertical scroll offset of the first match of `selector`
    async fn set_scroll_offset(&self, selector: &str, offset: f64) -> TableResult<()>;

    /// Await a fixed duration
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Inner text of the `index`-th match, `None` when out of range
    async fn inner_text(&self, selector: &str, index: usize) -> TableResult<Option<String>> {
        Ok(self.inner_texts(selector).await?.into_iter().nth(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_element_handle_creation() {
            let elem = ElementHandle::new("row-1");
            assert_eq!(elem.id, "row-1");
            assert!(elem.text_content.is_none());
            assert_eq!(elem.text(), "");
        }

        #[test]
        fn test_element_handle_with_text() {
            let elem = ElementHandle::new("row-1").with_text("Alice|30");
            assert_eq!(elem.text(), "Alice|30");
        }

        #[test]
        fn test_element_handle_visibility() {
            let elem = ElementHandle::new("elem");
            assert!(!elem.is_visible());

            let elem = elem.with_bounding_box(BoundingBox::new(0.0, 0.0, 100.0, 20.0));
            assert!(elem.is_visible());
        }
    }
}
