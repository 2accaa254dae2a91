//! Element access seam between the extraction policy and the page.
//!
//! The policy in [`crate::extract`] is a pure function over the
//! [`ElementTarget`] trait, so it never touches a live DOM directly. The
//! browser binding materializes one [`ElementCapture`] per commit (a single
//! JS round trip) and hands it to the policy; tests build captures by hand.

use crate::extract::table::TableGrid;
use serde::Deserialize;
use std::collections::HashMap;

/// Typed accessors over a selected page element.
pub trait ElementTarget {
    /// Rendered visible text (`outerText`).
    fn text(&self) -> String;
    /// Serialized markup (`outerHTML`).
    fn markup(&self) -> String;
    /// Generic named property lookup; `None` when absent.
    fn property(&self, name: &str) -> Option<String>;
    /// Computed `background-image` style value, unparsed.
    fn background_image(&self) -> Option<String>;
    /// Cell grid, for table elements only.
    fn table(&self) -> Option<TableGrid>;
}

/// A one-shot snapshot of a page element, decoded from the overlay's
/// capture script output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementCapture {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub markup: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub table: Option<Vec<Vec<String>>>,
}

impl ElementCapture {
    /// Decode a capture from the JSON the overlay script returns.
    pub fn from_json(value: serde_json::Value) -> anyhow::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_markup(mut self, markup: &str) -> Self {
        self.markup = markup.to_string();
        self
    }

    pub fn with_property(mut self, name: &str, value: &str) -> Self {
        self.properties.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_background_image(mut self, style: &str) -> Self {
        self.background_image = Some(style.to_string());
        self
    }

    pub fn with_table(mut self, rows: Vec<Vec<String>>) -> Self {
        self.table = Some(rows);
        self
    }
}

impl ElementTarget for ElementCapture {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn markup(&self) -> String {
        self.markup.clone()
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }

    fn background_image(&self) -> Option<String> {
        self.background_image.clone()
    }

    fn table(&self) -> Option<TableGrid> {
        self.table.clone().map(TableGrid::new)
    }
}
