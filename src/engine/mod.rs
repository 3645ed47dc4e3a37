//! Accordion Engine - Fold state machines, group policy and instances.
//!
//! - Events: per-instance handler registry with a veto signal
//! - Fold: closed state enumeration, pure transitions, operation handle
//! - Policy: single-open / persist decisions over fold states
//! - Render: presentational patches derived from state changes
//! - Reconcile: pairing children and deriving initial state from markup
//! - Scope: one instance, sequencing transitions and events
//! - Registry: key → Scope map and the `Relapse` construction context
//!
//! # Architecture
//!
//! Transitions are decided on plain [`FoldState`] values and only then
//! rendered:
//!
//! ```text
//! Scope op → policy (which folds move) → FoldState::{expand,collapse,..}
//!          → render::transition(from, to) → render::apply(elements)
//!          → refresh count → emit event
//! ```

pub mod events;
mod fold;
pub mod policy;
mod reconcile;
mod registry;
pub mod render;
mod scope;

pub use events::{EventBus, HandlerId, HandlerOutput};
pub use fold::*;
pub use reconcile::{initial_state, pair, read_markers};
pub use registry::*;
pub use scope::*;
