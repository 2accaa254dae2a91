//! Non-interactive one-shot grab.
//!
//! Navigates headlessly, snapshots the first element matching a CSS
//! selector, and runs the same extraction policy the interactive popup
//! uses. The result is printed and, unless `--no-copy`, placed on the
//! clipboard.

use crate::browser::chromium::ChromiumBrowser;
use crate::browser::PickerBrowser;
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::extract::{extract, ContentKind, Extraction};
use anyhow::{bail, Result};

pub async fn run(
    url: &str,
    selector: &str,
    kind: &str,
    property: Option<&str>,
    no_copy: bool,
) -> Result<()> {
    let kind = parse_kind(kind, property)?;
    if !crate::relay::is_web_page(url) {
        bail!("magpie can only grab from http/https pages, got {url}");
    }

    let browser = ChromiumBrowser::launch(false).await?;
    let page = browser.open_page(url).await?;
    let custom = match &kind {
        ContentKind::Custom(name) => Some(name.as_str()),
        _ => None,
    };
    let capture = page.capture_selector(selector, custom).await?;
    let result = match capture {
        Some(capture) => extract(Some(&kind), &capture),
        None => {
            page.close().await?;
            browser.shutdown().await?;
            bail!("no element matches selector {selector:?}");
        }
    };
    page.close().await?;
    browser.shutdown().await?;

    match result {
        Extraction::Content(content) => {
            if !no_copy {
                SystemClipboard::new()?.copy(&content)?;
            }
            println!("{content}");
            Ok(())
        }
        Extraction::MissingProperty => {
            bail!("the selected element has no {} to extract", kind.label())
        }
        // parse_kind never returns a missing kind
        Extraction::NoKindChosen => bail!("no kind chosen"),
    }
}

/// Map CLI kind names onto the policy's [`ContentKind`].
fn parse_kind(kind: &str, property: Option<&str>) -> Result<ContentKind> {
    Ok(match kind {
        "text" => ContentKind::Text,
        "html" => ContentKind::Html,
        "table" => ContentKind::Table,
        "value" => ContentKind::Value,
        "src" => ContentKind::Src,
        "href" => ContentKind::Href,
        "background-image" => ContentKind::BackgroundImage,
        "custom" => match property {
            Some(name) if !name.is_empty() => ContentKind::Custom(name.to_string()),
            _ => bail!("--kind custom requires --property <NAME>"),
        },
        other => bail!(
            "unknown kind {other:?}; expected one of text, html, table, value, src, href, background-image, custom"
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_names() {
        assert_eq!(parse_kind("text", None).unwrap(), ContentKind::Text);
        assert_eq!(
            parse_kind("background-image", None).unwrap(),
            ContentKind::BackgroundImage
        );
        assert_eq!(
            parse_kind("custom", Some("tagName")).unwrap(),
            ContentKind::Custom("tagName".into())
        );
    }

    #[test]
    fn test_custom_requires_property() {
        assert!(parse_kind("custom", None).is_err());
        assert!(parse_kind("custom", Some("")).is_err());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(parse_kind("innerText", None).is_err());
    }
}
