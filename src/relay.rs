//! Activation relay: turns the host-level "user invoked the tool"
//! affordance into a toggle signal for the page session.
//!
//! The signal is payload-free and best-effort: if the session is gone (or
//! the page is not a navigable web page) the toggle is dropped silently.
//! First-ever invocation opens the localized tutorial once, tracked by a
//! marker file under `~/.magpie`.

use crate::i18n::{Locale, MessageKey};
use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;
use url::Url;

/// The payload-free toggle signal.
#[derive(Debug, Clone, Copy)]
pub struct ToggleSignal;

/// Relay endpoint held by the host affordance (CLI, hotkey, ...).
pub struct ActivationRelay {
    tx: mpsc::UnboundedSender<ToggleSignal>,
    marker: PathBuf,
}

impl ActivationRelay {
    /// Create a relay and the receiving end the session listens on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ToggleSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let relay = Self {
            tx,
            marker: first_run_marker(),
        };
        (relay, rx)
    }

    /// Send one toggle toward the page at `page_url`.
    ///
    /// No-op for non-web schemes (internal pages must not arm the picker)
    /// and when the session is no longer listening; neither case is an
    /// error.
    pub fn toggle(&self, page_url: &str) {
        if !is_web_page(page_url) {
            tracing::debug!(url = page_url, "toggle ignored for non-web page");
            return;
        }
        if self.tx.send(ToggleSignal).is_err() {
            tracing::debug!("toggle dropped, session closed");
        }
    }

    /// On the first ever run, open the localized tutorial resource.
    /// Subsequent runs are no-ops.
    pub fn maybe_open_tutorial(&self, locale: Locale) -> Result<()> {
        if self.marker.exists() {
            return Ok(());
        }
        if let Some(dir) = self.marker.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.marker, b"")?;
        let url = locale.message(MessageKey::Tutorial);
        tracing::info!(url, "first run, opening tutorial");
        open::that(url)?;
        Ok(())
    }

    #[cfg(test)]
    fn with_marker(marker: PathBuf) -> (Self, mpsc::UnboundedReceiver<ToggleSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, marker }, rx)
    }
}

/// Whether a URL points at a navigable web page (http or https).
pub fn is_web_page(url: &str) -> bool {
    matches!(
        Url::parse(url).map(|u| u.scheme().to_string()).as_deref(),
        Ok("http") | Ok("https")
    )
}

fn first_run_marker() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".magpie")
        .join("first_run")
}
