//! Core types shared across the engine.

use std::fmt;

use crate::dom::Element;

// =============================================================================
// Fold References
// =============================================================================

/// Reference to a fold: by position, or by the name declared in
/// `{schema}-fold` on its trigger or panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FoldRef {
    Index(usize),
    Name(String),
}

impl From<usize> for FoldRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for FoldRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FoldRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for FoldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Name(name) => f.write_str(name),
        }
    }
}

// =============================================================================
// Event Names
// =============================================================================

/// Events delivered through a scope's bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// After a fold expanded.
    Expand,
    /// After a fold collapsed.
    Collapse,
    /// After a trigger received focus.
    Focus,
    /// Before a toggle; a handler returning `false` vetoes it.
    Toggle,
    /// After the whole instance was torn down. Carries no fold.
    Destroy,
}

impl EventName {
    pub const ALL: [EventName; 5] = [
        Self::Expand,
        Self::Collapse,
        Self::Focus,
        Self::Toggle,
        Self::Destroy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expand => "expand",
            Self::Collapse => "collapse",
            Self::Focus => "focus",
            Self::Toggle => "toggle",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Trigger Interactions
// =============================================================================

/// User interactions a trigger element can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// Click, Enter or Space.
    Activate,
    Focus,
    Blur,
}

// =============================================================================
// Construction Targets
// =============================================================================

/// What `Relapse::create` should turn into accordion instances.
#[derive(Debug, Clone)]
pub enum Target {
    /// A direct element reference.
    Element(Element),
    /// `#id` resolves one element; any other selector is a batch query.
    Selector(String),
    /// A batch of elements, one instance each.
    Elements(Vec<Element>),
}

impl From<Element> for Target {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&Element> for Target {
    fn from(element: &Element) -> Self {
        Self::Element(element.clone())
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<Vec<Element>> for Target {
    fn from(elements: Vec<Element>) -> Self {
        Self::Elements(elements)
    }
}

// =============================================================================
// Pre-existing Markers (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Presentational markers found on a trigger/panel pair before the
    /// engine takes it over.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Markers: u8 {
        const INITIAL = 1 << 0;
        const OPENED = 1 << 1;
        const DISABLED = 1 << 2;
        const EXPANDED = 1 << 3;
        const ARIA_EXPANDED = 1 << 4;
        const ARIA_DISABLED = 1 << 5;
    }
}

impl Markers {
    /// Any open/expanded/initial marker.
    pub fn wants_expanded(self) -> bool {
        self.intersects(Self::INITIAL | Self::OPENED | Self::EXPANDED | Self::ARIA_EXPANDED)
    }

    /// Any disabled marker.
    pub fn wants_disabled(self) -> bool {
        self.intersects(Self::DISABLED | Self::ARIA_DISABLED)
    }
}
