//! Event Bus - Named publish/subscribe with a veto signal.
//!
//! Handlers run in registration order. A handler may return `()` or `bool`;
//! only an explicit `false` requests cancellation, and every handler still
//! runs after a cancel. Whether cancellation matters is up to the emitter:
//! `toggle` is vetoable, the other events are after-the-fact notifications.
//!
//! # Example
//!
//! ```ignore
//! let id = scope.on(EventName::Toggle, |_scope, fold| {
//!     // Keep the first fold pinned open
//!     fold.map_or(true, |f| f.index() != 0)
//! });
//! scope.off(EventName::Toggle, id);
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use crate::types::EventName;

/// Identifies a registered handler for `off`.
pub type HandlerId = usize;

/// What a handler returned, reduced to "did it ask to cancel".
pub trait HandlerOutput {
    fn cancels(self) -> bool;
}

impl HandlerOutput for () {
    fn cancels(self) -> bool {
        false
    }
}

impl HandlerOutput for bool {
    fn cancels(self) -> bool {
        !self
    }
}

/// Type-erased handler. Returns true when it requested cancellation.
pub type Handler<C, T> = Rc<dyn Fn(&C, Option<&T>) -> bool>;

/// Per-instance handler registry.
///
/// `C` is the context handed to every handler (the scope), `T` the
/// affected item (the fold).
pub struct EventBus<C, T> {
    handlers: HashMap<EventName, Vec<(HandlerId, Handler<C, T>)>>,
    next_id: HandlerId,
}

impl<C, T> Default for EventBus<C, T> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<C: 'static, T: 'static> EventBus<C, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `name`. Returns its id.
    pub fn on<F, R>(&mut self, name: EventName, handler: F) -> HandlerId
    where
        F: Fn(&C, Option<&T>) -> R + 'static,
        R: HandlerOutput,
    {
        let id = self.next_id;
        self.next_id += 1;
        let handler: Handler<C, T> = Rc::new(move |ctx: &C, item: Option<&T>| handler(ctx, item).cancels());
        self.handlers.entry(name).or_default().push((id, handler));
        id
    }

    /// Remove exactly the handler registered under `id`.
    pub fn off(&mut self, name: EventName, id: HandlerId) -> bool {
        let Some(list) = self.handlers.get_mut(&name) else {
            return false;
        };
        let before = list.len();
        list.retain(|(handler_id, _)| *handler_id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.handlers.remove(&name);
        }
        removed
    }

    /// Snapshot of the handlers for `name`, in registration order.
    ///
    /// Emitters take a snapshot and release their borrow before invoking,
    /// so handlers may re-enter the owner.
    pub fn handlers(&self, name: EventName) -> Vec<Handler<C, T>> {
        self.handlers
            .get(&name)
            .map(|list| list.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, name: EventName) -> usize {
        self.handlers.get(&name).map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

/// Invoke every handler in order. Returns true if any requested cancellation.
pub fn emit<C, T>(handlers: &[Handler<C, T>], ctx: &C, item: Option<&T>) -> bool {
    let mut cancelled = false;
    for handler in handlers {
        if handler(ctx, item) {
            cancelled = true;
        }
    }
    cancelled
}
