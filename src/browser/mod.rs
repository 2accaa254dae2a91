//! Browser seam for the picker session.
//!
//! [`PickerBrowser`] and [`PagePort`] abstract over the browser engine
//! (currently Chromium via chromiumoxide). The session speaks only these
//! traits, so the whole interaction runs against a fake page in tests.

pub mod chromium;
pub mod overlay;

use crate::dom::ElementCapture;
use crate::i18n::Locale;
use crate::picker::{Cursor, ElementId, Popup};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A raw UI event reported by the injected overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayEvent {
    /// Pointer entered (`enter: true`) or left an element.
    Hover { element: ElementId, enter: bool },
    /// Pointer click, with page coordinates and whether the click landed
    /// on the popup surface.
    Click {
        element: ElementId,
        x: f64,
        y: f64,
        inside_popup: bool,
    },
    /// The popup's confirm control was pressed.
    Commit { choice: String, custom: String },
}

/// A browser engine that can open picker-instrumented pages.
#[async_trait]
pub trait PickerBrowser: Send + Sync {
    /// Open a page, navigate it to `url`, and install the overlay.
    async fn open_page(&self, url: &str) -> Result<Box<dyn PagePort>>;
    /// Shut down the browser engine.
    async fn shutdown(&self) -> Result<()>;
}

/// One instrumented page the picker session drives.
#[async_trait]
pub trait PagePort: Send {
    /// Current page URL.
    async fn url(&self) -> Result<String>;
    /// Drain queued overlay events.
    async fn poll_events(&self) -> Result<Vec<OverlayEvent>>;
    /// Set the pointer cursor; crosshair doubles as the overlay's armed
    /// flag for its capture listeners.
    async fn set_cursor(&self, cursor: Cursor) -> Result<()>;
    /// Add or remove the hover highlight class on an element.
    async fn set_hover(&self, element: ElementId, on: bool) -> Result<()>;
    /// Render the options popup, disposing any existing one first.
    async fn show_popup(&self, popup: &Popup, locale: Locale) -> Result<()>;
    /// Dispose the options popup if present.
    async fn close_popup(&self) -> Result<()>;
    /// Show a blocking acknowledgment; resolves when dismissed.
    async fn alert(&self, message: &str) -> Result<()>;
    /// Snapshot an element for extraction. `None` when the element is no
    /// longer known to the page.
    async fn capture_element(
        &self,
        element: ElementId,
        custom: Option<&str>,
    ) -> Result<Option<ElementCapture>>;
    /// Snapshot the first element matching a CSS selector. `None` when
    /// nothing matches. Used by the non-interactive grab path.
    async fn capture_selector(
        &self,
        selector: &str,
        custom: Option<&str>,
    ) -> Result<Option<ElementCapture>>;
    /// Close the page.
    async fn close(self: Box<Self>) -> Result<()>;
}
