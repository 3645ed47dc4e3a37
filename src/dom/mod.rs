//! DOM Surface - Caller-owned elements the engine annotates.
//!
//! The engine never owns markup. Callers build (or bridge) an element tree,
//! hand containers to [`crate::Relapse::create`], and keep ownership of every
//! node. The engine only:
//! - reads and writes attributes, classes and the `max-height` style
//! - attaches/detaches interaction listeners on triggers
//! - detaches trigger/panel from their parent on `destroy(.., remove = true)`
//!
//! - [`Element`] - shared element handle
//! - [`Document`] - id and selector lookup over a tree
//! - [`input`] - crossterm key bridging for triggers

mod document;
mod element;
pub mod input;

pub use document::*;
pub use element::*;
