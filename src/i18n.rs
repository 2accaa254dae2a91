//! Localized user-facing strings.
//!
//! A closed key set resolved against a small built-in catalog (English and
//! Simplified Chinese). Locale detection reads the usual environment
//! variables and falls back to English.

/// Every user-visible message the picker emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// First-run tutorial URL.
    Tutorial,
    /// Popup label for the text kind.
    Text,
    /// Popup label for the html kind.
    Html,
    /// Popup label for the custom kind.
    Custom,
    /// Placeholder for the custom property input.
    EnterProperty,
    /// Confirm button label.
    Extract,
    /// Alert shown when the element lacks the requested property.
    NoProperty,
    /// Alert shown when no kind was chosen.
    NeedSelectProperty,
    /// Acknowledgment after a successful copy.
    Copied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    ZhCn,
}

impl Locale {
    /// Resolve the locale from `LC_ALL`/`LC_MESSAGES`/`LANG`, falling back
    /// to English.
    pub fn detect() -> Locale {
        for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
            if let Ok(v) = std::env::var(var) {
                if !v.is_empty() {
                    return Locale::from_tag(&v);
                }
            }
        }
        Locale::En
    }

    /// Parse a locale tag like `zh-CN`, `zh_CN.UTF-8`, or `en-US`.
    pub fn from_tag(tag: &str) -> Locale {
        if tag.to_ascii_lowercase().starts_with("zh") {
            Locale::ZhCn
        } else {
            Locale::En
        }
    }

    /// Look up a message by key.
    pub fn message(&self, key: MessageKey) -> &'static str {
        use MessageKey::*;
        match self {
            Locale::En => match key {
                Tutorial => "https://github.com/magpie-dev/magpie/blob/main/README.md",
                Text => "text",
                Html => "html",
                Custom => "custom property",
                EnterProperty => "enter a property name",
                Extract => "extract",
                NoProperty => "The element has no such property",
                NeedSelectProperty => "Please choose a property to extract",
                Copied => "Copied",
            },
            Locale::ZhCn => match key {
                Tutorial => "https://github.com/magpie-dev/magpie/blob/main/README.md",
                Text => "文本",
                Html => "源代码",
                Custom => "自定义属性",
                EnterProperty => "输入属性名",
                Extract => "提取",
                NoProperty => "该元素没有这个属性",
                NeedSelectProperty => "请选择要提取的属性",
                Copied => "已复制",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing() {
        assert_eq!(Locale::from_tag("zh-CN"), Locale::ZhCn);
        assert_eq!(Locale::from_tag("zh_CN.UTF-8"), Locale::ZhCn);
        assert_eq!(Locale::from_tag("en-US"), Locale::En);
        assert_eq!(Locale::from_tag("fr_FR"), Locale::En);
    }

    #[test]
    fn test_every_key_resolves_nonempty() {
        use MessageKey::*;
        for key in [
            Tutorial,
            Text,
            Html,
            Custom,
            EnterProperty,
            Extract,
            NoProperty,
            NeedSelectProperty,
            Copied,
        ] {
            assert!(!Locale::En.message(key).is_empty());
            assert!(!Locale::ZhCn.message(key).is_empty());
        }
    }

    #[test]
    fn test_tutorial_is_shared_url() {
        assert_eq!(
            Locale::En.message(MessageKey::Tutorial),
            Locale::ZhCn.message(MessageKey::Tutorial)
        );
    }
}
