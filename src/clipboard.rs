//! Clipboard seam.
//!
//! The session writes through the [`Clipboard`] trait; the binary wires in
//! the system clipboard via `arboard`, tests use [`MemClipboard`].

use anyhow::{Context, Result};

/// A destination for extracted content.
pub trait Clipboard: Send {
    /// Replace the clipboard contents with `text`.
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("failed to open the system clipboard")?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_string())
            .context("clipboard write failed")
    }
}

/// In-memory clipboard for tests; remembers the last copied string.
#[derive(Debug, Default)]
pub struct MemClipboard {
    pub contents: Option<String>,
}

impl MemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
