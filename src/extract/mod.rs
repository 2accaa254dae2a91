//! Content extraction policy.
//!
//! Maps a chosen [`ContentKind`] and a selected element to the string that
//! lands on the clipboard. The policy is total: a missing attribute or an
//! unparsable style value comes back as [`Extraction::MissingProperty`],
//! never as an error or a magic sentinel string.

pub mod style;
pub mod table;

use crate::dom::ElementTarget;
use serde::{Deserialize, Serialize};

/// What representation of the selected element to extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ContentKind {
    /// Rendered visible text.
    Text,
    /// Serialized markup.
    Html,
    /// Tab-separated rendering of a table.
    Table,
    /// Form-control value.
    Value,
    /// Source URL attribute.
    Src,
    /// Link URL attribute.
    Href,
    /// URL parsed out of the computed background-image style.
    BackgroundImage,
    /// Arbitrary named property supplied by the user.
    Custom(String),
}

impl ContentKind {
    /// Map a popup selector choice (plus the free-text property field) to a
    /// kind. Unknown choices map to `None`, which commits as "no kind
    /// chosen".
    pub fn from_popup_choice(choice: &str, custom: &str) -> Option<ContentKind> {
        match choice {
            "outerText" => Some(ContentKind::Text),
            "outerHTML" => Some(ContentKind::Html),
            "table" => Some(ContentKind::Table),
            "value" => Some(ContentKind::Value),
            "src" => Some(ContentKind::Src),
            "href" => Some(ContentKind::Href),
            "background-image" => Some(ContentKind::BackgroundImage),
            "custom" => Some(ContentKind::Custom(custom.to_string())),
            _ => None,
        }
    }

    /// The property name this kind reads through the generic accessor, if
    /// it is a property lookup at all.
    pub fn property_name(&self) -> Option<&str> {
        match self {
            ContentKind::Value => Some("value"),
            ContentKind::Src => Some("src"),
            ContentKind::Href => Some("href"),
            ContentKind::Custom(name) => Some(name),
            _ => None,
        }
    }

    /// Short label for logging and CLI output.
    pub fn label(&self) -> &str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Html => "html",
            ContentKind::Table => "table",
            ContentKind::Value => "value",
            ContentKind::Src => "src",
            ContentKind::Href => "href",
            ContentKind::BackgroundImage => "background-image",
            ContentKind::Custom(_) => "custom",
        }
    }
}

/// Outcome of one extraction. Missing data and missing intent are distinct
/// tagged outcomes, never compared against localized strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Extracted content, ready for the clipboard.
    Content(String),
    /// The element lacks the requested property (or the style value did
    /// not parse).
    MissingProperty,
    /// The user confirmed without choosing a kind.
    NoKindChosen,
}

/// Run the extraction policy against a selected element.
///
/// Total over its inputs: every path returns an `Extraction`.
pub fn extract(kind: Option<&ContentKind>, element: &dyn ElementTarget) -> Extraction {
    let Some(kind) = kind else {
        return Extraction::NoKindChosen;
    };
    match kind {
        ContentKind::Text => Extraction::Content(element.text()),
        ContentKind::Html => Extraction::Content(element.markup()),
        ContentKind::Table => match element.table() {
            Some(grid) => Extraction::Content(table::encode_table(&grid)),
            None => Extraction::MissingProperty,
        },
        ContentKind::BackgroundImage => match element
            .background_image()
            .as_deref()
            .and_then(style::parse_css_url)
        {
            Some(url) => Extraction::Content(url),
            None => Extraction::MissingProperty,
        },
        ContentKind::Value | ContentKind::Src | ContentKind::Href | ContentKind::Custom(_) => {
            // property_name is always Some for these four kinds
            let name = kind.property_name().unwrap_or_default();
            match element.property(name) {
                Some(v) if !v.is_empty() => Extraction::Content(v),
                _ => Extraction::MissingProperty,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementCapture;

    #[test]
    fn test_text_and_html() {
        let el = ElementCapture::default()
            .with_text("hello world")
            .with_markup("<span>hello world</span>");
        assert_eq!(
            extract(Some(&ContentKind::Text), &el),
            Extraction::Content("hello world".into())
        );
        assert_eq!(
            extract(Some(&ContentKind::Html), &el),
            Extraction::Content("<span>hello world</span>".into())
        );
    }

    #[test]
    fn test_href_present_and_absent() {
        let anchor = ElementCapture::default().with_property("href", "https://example.com/");
        assert_eq!(
            extract(Some(&ContentKind::Href), &anchor),
            Extraction::Content("https://example.com/".into())
        );
        let bare = ElementCapture::default().with_text("not a link");
        assert_eq!(
            extract(Some(&ContentKind::Href), &bare),
            Extraction::MissingProperty
        );
    }

    #[test]
    fn test_empty_value_is_missing() {
        let input = ElementCapture::default().with_property("value", "");
        assert_eq!(
            extract(Some(&ContentKind::Value), &input),
            Extraction::MissingProperty
        );
    }

    #[test]
    fn test_custom_property_passthrough() {
        let div = ElementCapture::default().with_property("tagName", "DIV");
        assert_eq!(
            extract(Some(&ContentKind::Custom("tagName".into())), &div),
            Extraction::Content("DIV".into())
        );
        assert_eq!(
            extract(Some(&ContentKind::Custom("nonsense".into())), &div),
            Extraction::MissingProperty
        );
    }

    #[test]
    fn test_background_image() {
        let el = ElementCapture::default()
            .with_background_image(r#"url("https://example.com/bg.png")"#);
        assert_eq!(
            extract(Some(&ContentKind::BackgroundImage), &el),
            Extraction::Content("https://example.com/bg.png".into())
        );
        let plain = ElementCapture::default().with_background_image("none");
        assert_eq!(
            extract(Some(&ContentKind::BackgroundImage), &plain),
            Extraction::MissingProperty
        );
    }

    #[test]
    fn test_table_kind() {
        let el = ElementCapture::default().with_table(vec![
            vec!["a".into(), "b".into()],
            vec!["c\nd".into(), "e".into()],
        ]);
        assert_eq!(
            extract(Some(&ContentKind::Table), &el),
            Extraction::Content("a\tb\n\"c\nd\"\te\n".into())
        );
        let not_a_table = ElementCapture::default();
        assert_eq!(
            extract(Some(&ContentKind::Table), &not_a_table),
            Extraction::MissingProperty
        );
    }

    #[test]
    fn test_no_kind_chosen_is_distinct() {
        let el = ElementCapture::default().with_text("x");
        assert_eq!(extract(None, &el), Extraction::NoKindChosen);
        assert_ne!(extract(None, &el), Extraction::MissingProperty);
    }

    #[test]
    fn test_popup_choice_mapping() {
        assert_eq!(
            ContentKind::from_popup_choice("outerText", ""),
            Some(ContentKind::Text)
        );
        assert_eq!(
            ContentKind::from_popup_choice("background-image", ""),
            Some(ContentKind::BackgroundImage)
        );
        assert_eq!(
            ContentKind::from_popup_choice("custom", "dataset"),
            Some(ContentKind::Custom("dataset".into()))
        );
        assert_eq!(ContentKind::from_popup_choice("", ""), None);
        assert_eq!(ContentKind::from_popup_choice("bogus", ""), None);
    }
}
