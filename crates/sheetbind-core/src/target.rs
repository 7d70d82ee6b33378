//! Bind targets: the elements a dispatch pass writes into.

use std::collections::HashMap;

/// One element a dispatch pass may write into.
///
/// Abstracts the two write slots of a page element: the value of
/// input-like controls and the text content of everything else.
pub trait BindTarget {
    /// Read a `data-sheet*` attribute, `None` when absent.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Whether writes should go to the value slot (input-like or
    /// editable elements) rather than text content.
    fn is_editable(&self) -> bool;

    fn set_text(&mut self, text: &str);

    fn set_value(&mut self, value: &str);
}

/// In-memory element, used by the CLI and in tests.
#[derive(Clone, Debug, Default)]
pub struct PageElement {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    value: String,
    content_editable: bool,
}

impl PageElement {
    pub fn new(tag: &str) -> PageElement {
        PageElement {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> PageElement {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Mark the element content-editable, routing writes to its value.
    pub fn editable(mut self) -> PageElement {
        self.content_editable = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl BindTarget for PageElement {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn is_editable(&self) -> bool {
        self.content_editable || matches!(self.tag.as_str(), "input" | "textarea")
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }
}
