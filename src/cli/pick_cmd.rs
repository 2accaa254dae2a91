//! Interactive pick session.
//!
//! Opens a visible browser on the target page. Pressing Enter in the
//! terminal is the host affordance that toggles the picker; clicking an
//! element opens the options popup in the page, and the chosen
//! representation lands on the system clipboard.

use crate::browser::chromium::ChromiumBrowser;
use crate::browser::PickerBrowser;
use crate::clipboard::SystemClipboard;
use crate::events::{EventBus, PickerEvent};
use crate::i18n::Locale;
use crate::relay::{self, ActivationRelay};
use crate::session::PickerSession;
use anyhow::{bail, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(url: &str, locale: Option<&str>) -> Result<()> {
    let locale = locale.map(Locale::from_tag).unwrap_or_else(Locale::detect);
    if !relay::is_web_page(url) {
        bail!("magpie can only pick from http/https pages, got {url}");
    }

    let (relay, toggles) = ActivationRelay::new();
    if let Err(e) = relay.maybe_open_tutorial(locale) {
        tracing::warn!(error = %e, "could not open the tutorial");
    }

    let browser = ChromiumBrowser::launch(true).await?;
    let page = browser.open_page(url).await?;
    let clipboard = SystemClipboard::new()?;
    let bus = EventBus::new();

    // Progress echo in the terminal.
    let mut events = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                PickerEvent::Armed => println!("  armed: click an element in the browser"),
                PickerEvent::Disarmed => println!("  idle"),
                PickerEvent::Copied { kind, chars } => {
                    println!("  copied {chars} chars ({kind})")
                }
                PickerEvent::MissingProperty { kind } => {
                    println!("  element has no {kind} property")
                }
                PickerEvent::NoKindChosen => println!("  choose a property first"),
                _ => {}
            }
        }
    });

    // Enter in the terminal toggles the picker.
    let page_url = url.to_string();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            relay.toggle(&page_url);
        }
    });

    println!("Opened {url}");
    println!("Press Enter to toggle the picker; Ctrl+C to quit.");

    let session = PickerSession::new(page, Box::new(clipboard), locale, bus.clone());
    tokio::select! {
        result = session.run(toggles) => result?,
        _ = tokio::signal::ctrl_c() => {
            println!();
        }
    }
    browser.shutdown().await
}
