//! # relapse
//!
//! Accordion fold state engine.
//!
//! Given a container whose children alternate trigger/panel, relapse tracks
//! which panels are expanded, enforces the group policy (single-open vs
//! multi-open, persist at least one open fold, enable/disable), mirrors that
//! state onto the elements' attributes and classes, and notifies observers.
//!
//! ```ignore
//! use relapse::{Document, EventName, Options, Relapse};
//!
//! let relapse = Relapse::new(document);
//! let scope = relapse.create("#faq", Options::new().multiple(true))?.unwrap();
//!
//! scope.on(EventName::Expand, |scope, fold| {
//!     tracing::info!(open = scope.count(), fold = fold.map(|f| f.index()), "expanded");
//! });
//! scope.expand(0)?;
//! scope.collapse("shipping")?;
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Fold references, event names, targets, markers
//! - [`config`] - Options, class names, attribute overrides
//! - [`dom`] - Caller-owned element surface and key bridging
//! - [`engine`] - Fold state machine, policy, scope, registry
//! - [`error`] - Error taxonomy

pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod types;

pub use config::{ClassOverrides, Classes, Config, Options, DEFAULT_SCHEMA};
pub use dom::{Document, Element, ListenerId};
pub use engine::{
    Fold, FoldHandle, FoldState, HandlerId, HandlerOutput, Registry, Relapse, Scope,
};
pub use error::{RelapseError, Result};
pub use types::{EventName, FoldRef, Interaction, Markers, Target};
