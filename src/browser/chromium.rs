//! Chromium backend using chromiumoxide.
//!
//! Launches a visible (headful) Chromium so the user can actually point at
//! elements; the one-shot `grab` path runs headless instead.

use super::{overlay, OverlayEvent, PagePort, PickerBrowser};
use crate::dom::ElementCapture;
use crate::i18n::Locale;
use crate::picker::{Cursor, ElementId, Popup};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. MAGPIE_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("MAGPIE_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. ~/.magpie/chromium/
    if let Some(home) = dirs::home_dir() {
        let candidates = if cfg!(target_os = "macos") {
            vec![
                home.join(".magpie/chromium/chrome-mac-arm64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".magpie/chromium/chrome-mac-x64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".magpie/chromium/chrome"),
            ]
        } else {
            vec![
                home.join(".magpie/chromium/chrome-linux64/chrome"),
                home.join(".magpie/chromium/chrome"),
            ]
        };
        for c in candidates {
            if c.exists() {
                return Some(c);
            }
        }
    }

    // 3. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 4. Common macOS locations
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Chromium-based picker browser.
pub struct ChromiumBrowser {
    browser: Browser,
}

impl ChromiumBrowser {
    /// Launch Chromium. `headful` shows the window so the user can click
    /// elements; the non-interactive grab path passes `false`.
    pub async fn launch(headful: bool) -> Result<Self> {
        let chrome_path =
            find_chromium().context("Chromium not found. Install Chrome or Chromium.")?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--no-first-run");
        if headful {
            builder = builder.with_head();
        } else {
            builder = builder.arg("--headless=new").arg("--disable-gpu");
        }
        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // Pump the CDP event stream for the lifetime of the browser.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self { browser })
    }
}

#[async_trait]
impl PickerBrowser for ChromiumBrowser {
    async fn open_page(&self, url: &str) -> Result<Box<dyn PagePort>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;
        let mut port = ChromiumPage { page };
        port.navigate(url, 30_000).await?;
        port.install_overlay().await?;
        Ok(Box::new(port))
    }

    async fn shutdown(&self) -> Result<()> {
        // Browser process exits when ChromiumBrowser is dropped
        Ok(())
    }
}

/// A single instrumented Chromium page.
pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()> {
        let result = tokio::time::timeout(
            std::time::Duration::from_millis(timeout_ms),
            self.page.goto(url),
        )
        .await;
        match result {
            Ok(Ok(_)) => {
                let _ = self.page.wait_for_navigation().await;
                Ok(())
            }
            Ok(Err(e)) => bail!("navigation failed: {e}"),
            Err(_) => bail!("navigation timed out after {timeout_ms}ms"),
        }
    }

    async fn install_overlay(&self) -> Result<()> {
        let ok = self.execute_js(overlay::install_script()).await?;
        if ok.as_bool() != Some(true) {
            bail!("overlay installation failed");
        }
        Ok(())
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("JS execution failed")?;
        result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert JS result: {e:?}"))
    }
}

#[async_trait]
impl PagePort for ChromiumPage {
    async fn url(&self) -> Result<String> {
        let url = self
            .page
            .url()
            .await
            .context("failed to get URL")?
            .map(|u| u.to_string())
            .unwrap_or_default();
        Ok(url)
    }

    async fn poll_events(&self) -> Result<Vec<OverlayEvent>> {
        let value = self.execute_js(overlay::drain_events_script()).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).context("failed to decode overlay events")
    }

    async fn set_cursor(&self, cursor: Cursor) -> Result<()> {
        let crosshair = matches!(cursor, Cursor::Crosshair);
        self.execute_js(&overlay::set_cursor_script(crosshair))
            .await?;
        Ok(())
    }

    async fn set_hover(&self, element: ElementId, on: bool) -> Result<()> {
        self.execute_js(&overlay::set_hover_script(element, on))
            .await?;
        Ok(())
    }

    async fn show_popup(&self, popup: &Popup, locale: Locale) -> Result<()> {
        self.execute_js(&overlay::show_popup_script(popup, locale))
            .await?;
        Ok(())
    }

    async fn close_popup(&self) -> Result<()> {
        self.execute_js(overlay::close_popup_script()).await?;
        Ok(())
    }

    async fn alert(&self, message: &str) -> Result<()> {
        // Resolves when the user dismisses the dialog; the session loop is
        // modal to the page for that span, matching the platform alert.
        self.execute_js(&overlay::alert_script(message)).await?;
        Ok(())
    }

    async fn capture_element(
        &self,
        element: ElementId,
        custom: Option<&str>,
    ) -> Result<Option<ElementCapture>> {
        let value = self
            .execute_js(&overlay::capture_script(element, custom))
            .await?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(ElementCapture::from_json(value)?))
    }

    async fn capture_selector(
        &self,
        selector: &str,
        custom: Option<&str>,
    ) -> Result<Option<ElementCapture>> {
        let value = self
            .execute_js(&overlay::capture_by_selector_script(selector, custom))
            .await?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(ElementCapture::from_json(value)?))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let _ = self.page.close().await;
        Ok(())
    }
}
