//! Options popup model.
//!
//! The popup itself is rendered into the page by the browser binding; this
//! module models only what the state machine and renderer need to agree
//! on: the anchor point and the fixed set of kind choices.

use crate::i18n::{Locale, MessageKey};

/// A floating options popup anchored at page coordinates. At most one
/// exists at any time; the state machine enforces that.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub x: f64,
    pub y: f64,
}

impl Popup {
    pub fn at(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Label source for a kind choice: localized or literal, matching the
/// original surface (text/html/custom are localized, the rest are shown as
/// their raw property names).
#[derive(Debug, Clone, Copy)]
pub enum ChoiceLabel {
    Localized(MessageKey),
    Literal(&'static str),
}

/// One entry of the popup's kind selector.
#[derive(Debug, Clone, Copy)]
pub struct KindChoice {
    /// Machine-readable option value, fed back through
    /// [`crate::extract::ContentKind::from_popup_choice`].
    pub value: &'static str,
    pub label: ChoiceLabel,
}

impl KindChoice {
    pub fn label_text(&self, locale: Locale) -> &'static str {
        match self.label {
            ChoiceLabel::Localized(key) => locale.message(key),
            ChoiceLabel::Literal(s) => s,
        }
    }
}

/// The eight kind choices, in display order. The first entry is
/// preselected.
pub const KIND_CHOICES: [KindChoice; 8] = [
    KindChoice {
        value: "outerText",
        label: ChoiceLabel::Localized(MessageKey::Text),
    },
    KindChoice {
        value: "outerHTML",
        label: ChoiceLabel::Localized(MessageKey::Html),
    },
    KindChoice {
        value: "table",
        label: ChoiceLabel::Literal("table"),
    },
    KindChoice {
        value: "value",
        label: ChoiceLabel::Literal("value"),
    },
    KindChoice {
        value: "src",
        label: ChoiceLabel::Literal("src"),
    },
    KindChoice {
        value: "href",
        label: ChoiceLabel::Literal("href"),
    },
    KindChoice {
        value: "background-image",
        label: ChoiceLabel::Literal("background image"),
    },
    KindChoice {
        value: "custom",
        label: ChoiceLabel::Localized(MessageKey::Custom),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ContentKind;

    #[test]
    fn test_every_choice_maps_to_a_kind() {
        for choice in KIND_CHOICES {
            assert!(
                ContentKind::from_popup_choice(choice.value, "x").is_some(),
                "choice {} does not map to a kind",
                choice.value
            );
        }
    }

    #[test]
    fn test_labels_resolve() {
        for choice in KIND_CHOICES {
            assert!(!choice.label_text(Locale::En).is_empty());
            assert!(!choice.label_text(Locale::ZhCn).is_empty());
        }
    }
}
