//! Fold - State machine for one trigger/panel pair.
//!
//! ```text
//!                 expand                     collapse
//! CollapsedEnabled ────────► Expanded{Enabled,Disabled} ────────► CollapsedEnabled
//!        ▲  │ disable                 │ disable (persist)
//! enable │  ▼                         ▼
//! CollapsedDisabled            ExpandedDisabled
//!
//! any ──destroy──► Destroyed (terminal)
//! ```
//!
//! The transitions here are pure; [`super::render`] turns a `(from, to)`
//! pair into presentational patches and [`super::scope`] sequences them
//! under the group policy.

use crate::dom::{Element, ListenerId};
use crate::error::Result;

use super::scope::Scope;

// =============================================================================
// Fold State
// =============================================================================

/// Closed set of fold states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldState {
    CollapsedEnabled,
    CollapsedDisabled,
    ExpandedEnabled,
    ExpandedDisabled,
    Destroyed,
}

impl FoldState {
    pub fn from_flags(expanded: bool, disabled: bool) -> Self {
        match (expanded, disabled) {
            (false, false) => Self::CollapsedEnabled,
            (false, true) => Self::CollapsedDisabled,
            (true, false) => Self::ExpandedEnabled,
            (true, true) => Self::ExpandedDisabled,
        }
    }

    pub fn is_expanded(self) -> bool {
        matches!(self, Self::ExpandedEnabled | Self::ExpandedDisabled)
    }

    pub fn is_disabled(self) -> bool {
        matches!(self, Self::CollapsedDisabled | Self::ExpandedDisabled)
    }

    pub fn is_destroyed(self) -> bool {
        self == Self::Destroyed
    }

    /// Open. Under persist the opened fold is disabled, guarding it as the
    /// fold that must stay open; an already disabled fold stays disabled.
    pub fn expand(self, persist: bool) -> Self {
        match self {
            Self::CollapsedEnabled => Self::from_flags(true, persist),
            Self::CollapsedDisabled => Self::ExpandedDisabled,
            other => other,
        }
    }

    /// Close. Collapsing always re-enables.
    pub fn collapse(self) -> Self {
        match self {
            Self::Destroyed => Self::Destroyed,
            _ => Self::CollapsedEnabled,
        }
    }

    pub fn enable(self) -> Self {
        match self {
            Self::CollapsedDisabled => Self::CollapsedEnabled,
            Self::ExpandedDisabled => Self::ExpandedEnabled,
            other => other,
        }
    }

    /// Expanded folds are only disabled under persist; collapsed folds
    /// always are.
    pub fn disable(self, persist: bool) -> Self {
        match self {
            Self::CollapsedEnabled => Self::CollapsedDisabled,
            Self::ExpandedEnabled if persist => Self::ExpandedDisabled,
            other => other,
        }
    }
}

// =============================================================================
// Fold Record
// =============================================================================

/// One collapsible unit. Handlers receive a snapshot of this record.
#[derive(Debug, Clone)]
pub struct Fold {
    pub(crate) index: usize,
    pub(crate) id: String,
    pub(crate) state: FoldState,
    pub(crate) focused: bool,
    pub(crate) trigger: Element,
    pub(crate) panel: Element,
    pub(crate) bindings: Vec<ListenerId>,
}

impl Fold {
    pub(crate) fn new(index: usize, id: String, state: FoldState, trigger: Element, panel: Element) -> Self {
        Self {
            index,
            id,
            state,
            focused: false,
            trigger,
            panel,
            bindings: Vec::new(),
        }
    }

    /// Position in the scope; stable for the fold's lifetime.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> FoldState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.is_disabled()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn trigger(&self) -> &Element {
        &self.trigger
    }

    pub fn panel(&self) -> &Element {
        &self.panel
    }

    /// Name declared under `attribute` on the trigger, else the panel.
    pub fn name(&self, attribute: &str) -> Option<String> {
        self.trigger
            .attribute(attribute)
            .or_else(|| self.panel.attribute(attribute))
    }
}

// =============================================================================
// Fold Handle
// =============================================================================

/// Operations on one fold of a live scope.
///
/// Methods taking `index` act on that fold instead of this one, which lets
/// one trigger drive another panel. Either way this fold becomes the
/// scope's active fold.
#[derive(Debug, Clone)]
pub struct FoldHandle {
    scope: Scope,
    index: usize,
}

impl FoldHandle {
    pub(crate) fn new(scope: Scope, index: usize) -> Self {
        Self { scope, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Current snapshot of the fold.
    pub fn get(&self) -> Fold {
        self.scope.fold_snapshot(self.index)
    }

    pub fn open(&self, index: Option<usize>) -> Result<()> {
        self.scope.open_fold(self.index, index)
    }

    pub fn close(&self, index: Option<usize>) -> Result<()> {
        self.scope.close_fold(self.index, index)
    }

    pub fn enable(&self, index: Option<usize>) -> Result<()> {
        self.scope.enable_fold(self.index, index)
    }

    pub fn disable(&self, index: Option<usize>) -> Result<()> {
        self.scope.disable_fold(self.index, index)
    }

    pub fn focus(&self) -> Result<()> {
        self.scope.focus_fold(self.index)
    }

    pub fn blur(&self) -> Result<()> {
        self.scope.blur_fold(self.index)
    }

    /// Emit `toggle`; unless vetoed, close if expanded else open.
    pub fn toggle(&self) -> Result<()> {
        self.scope.toggle_fold(self.index)
    }

    /// Close, unbind the trigger and optionally detach both elements.
    pub fn destroy(&self, remove: bool) -> Result<()> {
        self.scope.destroy_fold(self.index, remove)
    }
}
