//! Document - Lookup over an element tree.
//!
//! Supports the simple selectors instance construction needs:
//! `#id`, `.class`, `[attr]`, `[attr=value]` (value optionally quoted) and
//! bare tag names.

use super::element::Element;

/// A parsed simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
    Tag(String),
}

impl Selector {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(id) = input.strip_prefix('#') {
            return Some(Self::Id(id.to_string()));
        }
        if let Some(class) = input.strip_prefix('.') {
            return Some(Self::Class(class.to_string()));
        }
        if let Some(inner) = input.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return Some(match inner.split_once('=') {
                Some((name, value)) => Self::Attribute {
                    name: name.trim().to_string(),
                    value: Some(value.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string()),
                },
                None => Self::Attribute {
                    name: inner.trim().to_string(),
                    value: None,
                },
            });
        }
        Some(Self::Tag(input.to_string()))
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Id(id) => element.id().as_deref() == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Attribute { name, value: None } => element.has_attribute(name),
            Self::Attribute { name, value: Some(value) } => {
                element.attribute(name).as_deref() == Some(value.as_str())
            }
            Self::Tag(tag) => element.tag().eq_ignore_ascii_case(tag),
        }
    }
}

/// Root of a caller-owned element tree.
#[derive(Debug, Clone)]
pub struct Document {
    body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
        }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    /// Append a top-level element.
    pub fn append(&self, element: &Element) {
        self.body.append_child(element);
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.query_selector(&format!("#{}", id))
    }

    /// First element in document order matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        let selector = Selector::parse(selector)?;
        self.body.descendants().into_iter().find(|el| selector.matches(el))
    }

    /// Every element in document order matching `selector`.
    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.body
            .descendants()
            .into_iter()
            .filter(|el| selector.matches(el))
            .collect()
    }
}
