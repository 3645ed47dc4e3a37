//! Scope - One accordion instance.
//!
//! Owns the ordered folds, the resolved config, the event bus and the
//! reactive `count`/`active` state. All operations run to completion
//! synchronously. Handlers and effects always run with no internal borrow
//! held, so they may call back into the scope; every step re-reads the
//! current fold states instead of trusting earlier reads.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::dom::Element;
use crate::error::{RelapseError, Result};
use crate::types::{EventName, FoldRef, Interaction};

use super::events::{self, EventBus, HandlerId, HandlerOutput};
use super::fold::{Fold, FoldHandle, FoldState};
use super::policy;
use super::registry::WeakRegistry;
use super::render;

struct ScopeState {
    folds: Vec<Fold>,
    events: EventBus<Scope, Fold>,
    destroyed: bool,
}

struct ScopeShared {
    id: String,
    key: String,
    element: Element,
    config: Config,
    state: RefCell<ScopeState>,
    count: Signal<usize>,
    active: Signal<Option<usize>>,
    registry: WeakRegistry,
}

/// Handle to one accordion instance. Clones share the instance.
#[derive(Clone)]
pub struct Scope(Rc<ScopeShared>);

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.0.id)
            .field("key", &self.0.key)
            .field("folds", &self.len())
            .finish()
    }
}

impl Scope {
    pub(crate) fn new(
        id: String,
        key: String,
        element: Element,
        config: Config,
        folds: Vec<Fold>,
        registry: WeakRegistry,
    ) -> Self {
        let states: Vec<FoldState> = folds.iter().map(|f| f.state).collect();
        let count = policy::count_expanded(&states);
        Self(Rc::new(ScopeShared {
            id,
            key,
            element,
            config,
            state: RefCell::new(ScopeState {
                folds,
                events: EventBus::new(),
                destroyed: false,
            }),
            count: signal(count),
            active: signal(None),
            registry,
        }))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Generated instance id (`A{n}`), unique among live instances of the
    /// registry. Generated fold ids are derived from it.
    pub fn id(&self) -> &str {
        &self.0.id
    }

    /// Registry key.
    pub fn key(&self) -> &str {
        &self.0.key
    }

    pub fn element(&self) -> &Element {
        &self.0.element
    }

    pub fn config(&self) -> &Config {
        &self.0.config
    }

    /// Number of expanded folds.
    pub fn count(&self) -> usize {
        self.0.count.get()
    }

    /// Index of the most recently focused/operated fold.
    pub fn active(&self) -> Option<usize> {
        self.0.active.get()
    }

    /// Reactive view of [`Scope::count`].
    pub fn count_signal(&self) -> Signal<usize> {
        self.0.count.clone()
    }

    /// Reactive view of [`Scope::active`].
    pub fn active_signal(&self) -> Signal<Option<usize>> {
        self.0.active.clone()
    }

    pub fn len(&self) -> usize {
        self.0.state.borrow().folds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_destroyed(&self) -> bool {
        self.0.state.borrow().destroyed
    }

    /// Snapshot of every fold.
    pub fn folds(&self) -> Vec<Fold> {
        self.0.state.borrow().folds.clone()
    }

    /// Operations handle for the fold at `index`.
    pub fn fold(&self, index: usize) -> Result<FoldHandle> {
        self.check_index(index)?;
        Ok(FoldHandle::new(self.clone(), index))
    }

    pub(crate) fn fold_snapshot(&self, index: usize) -> Fold {
        self.0.state.borrow().folds[index].clone()
    }

    // =========================================================================
    // Public API
    // =========================================================================

    /// Subscribe to `name`. Return `false` from a `toggle` handler to veto.
    pub fn on<F, R>(&self, name: EventName, handler: F) -> HandlerId
    where
        F: Fn(&Scope, Option<&Fold>) -> R + 'static,
        R: HandlerOutput,
    {
        self.0.state.borrow_mut().events.on(name, handler)
    }

    pub fn off(&self, name: EventName, id: HandlerId) -> bool {
        self.0.state.borrow_mut().events.off(name, id)
    }

    /// Open the referenced fold.
    pub fn expand(&self, fold: impl Into<FoldRef>) -> Result<()> {
        let index = self.find(&fold.into())?;
        self.open_fold(index, None)
    }

    /// Close the referenced fold, subject to persist.
    pub fn collapse(&self, fold: impl Into<FoldRef>) -> Result<()> {
        let index = self.find(&fold.into())?;
        self.close_fold(index, None)
    }

    /// Without a fold: tear down every fold, unregister and emit `destroy`.
    /// With a fold: tear down only that fold; the instance stays registered.
    pub fn destroy(&self, fold: Option<FoldRef>, remove: bool) -> Result<()> {
        if let Some(fold) = fold {
            let index = self.find(&fold)?;
            return self.destroy_fold(index, remove);
        }

        if self.is_destroyed() {
            return Ok(());
        }

        for index in 0..self.len() {
            if !self.state_of(index).is_destroyed() {
                self.destroy_fold(index, remove)?;
            }
        }

        self.0.element.remove_attribute("aria-multiselectable");
        self.0.state.borrow_mut().destroyed = true;
        if self.0.active.get().is_some() {
            self.0.active.set(None);
        }
        self.emit(EventName::Destroy, None);
        self.0.state.borrow_mut().events.clear();

        if let Some(registry) = self.0.registry.upgrade() {
            registry.remove(&self.0.key);
        }
        info!(scope = %self.0.id, key = %self.0.key, "instance destroyed");
        Ok(())
    }

    /// Resolve a reference to a fold index.
    pub fn find(&self, fold: &FoldRef) -> Result<usize> {
        match fold {
            FoldRef::Index(index) => {
                self.check_index(*index)?;
                Ok(*index)
            }
            FoldRef::Name(name) => {
                let not_found = || RelapseError::FoldNotFound { name: name.clone() };
                let attribute = self.0.config.fold_attribute().ok_or_else(not_found)?;
                self.0
                    .state
                    .borrow()
                    .folds
                    .iter()
                    .find(|f| f.name(&attribute).as_deref() == Some(name.as_str()))
                    .map(|f| f.index)
                    .ok_or_else(not_found)
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index < len {
            Ok(())
        } else {
            Err(RelapseError::InvalidFoldIndex { index, len })
        }
    }

    fn state_of(&self, index: usize) -> FoldState {
        self.0.state.borrow().folds[index].state
    }

    fn states(&self) -> Vec<FoldState> {
        self.0.state.borrow().folds.iter().map(|f| f.state).collect()
    }

    /// Validate `target` (default: `caller`) and record `caller` as active.
    fn resolve(&self, caller: usize, target: Option<usize>) -> Result<usize> {
        let index = target.unwrap_or(caller);
        self.check_index(index)?;
        if self.state_of(index).is_destroyed() {
            return Err(RelapseError::FoldDestroyed { index });
        }
        self.set_active(caller);
        Ok(index)
    }

    fn set_active(&self, index: usize) {
        if self.0.active.get() != Some(index) {
            self.0.active.set(Some(index));
        }
    }

    /// Recompute the open count from the fold flags.
    fn refresh_count(&self) {
        let count = policy::count_expanded(&self.states());
        if self.0.count.get() != count {
            self.0.count.set(count);
        }
    }

    /// Move fold `index` to `to`, writing the presentational diff.
    /// Returns the updated snapshot.
    fn transition(&self, index: usize, to: FoldState) -> Fold {
        let mut state = self.0.state.borrow_mut();
        let fold = &mut state.folds[index];
        let from = fold.state;
        fold.state = to;
        render::apply(&render::transition(from, to, &self.0.config.classes), fold);
        debug!(scope = %self.0.id, fold = index, ?from, ?to, "fold transition");
        fold.clone()
    }

    fn emit(&self, name: EventName, fold: Option<&Fold>) -> bool {
        let handlers = self.0.state.borrow().events.handlers(name);
        events::emit(&handlers, self, fold)
    }

    /// Collapse an expanded fold and announce it.
    fn collapse_now(&self, index: usize) {
        let from = self.state_of(index);
        if !from.is_expanded() {
            return;
        }
        let fold = self.transition(index, from.collapse());
        self.refresh_count();
        self.emit(EventName::Collapse, Some(&fold));
    }

    // =========================================================================
    // Fold Transitions
    // =========================================================================

    pub(crate) fn open_fold(&self, caller: usize, target: Option<usize>) -> Result<()> {
        let index = self.resolve(caller, target)?;
        if self.state_of(index).is_expanded() {
            return Ok(());
        }

        // A collapse handler may open another fold, so keep making room
        // until the target is the only candidate left
        while let Some(other) = policy::make_room(&self.states(), index, &self.0.config) {
            self.collapse_now(other);
        }

        // Handlers of the collapses above may have moved things along
        let from = self.state_of(index);
        if from.is_expanded() || from.is_destroyed() {
            return Ok(());
        }

        let fold = self.transition(index, from.expand(self.0.config.persist));
        self.refresh_count();
        self.emit(EventName::Expand, Some(&fold));
        Ok(())
    }

    pub(crate) fn close_fold(&self, caller: usize, target: Option<usize>) -> Result<()> {
        let index = self.resolve(caller, target)?;
        self.close_now(index);
        Ok(())
    }

    /// Collapse `index` if the close rule allows it.
    fn close_now(&self, index: usize) {
        if !self.state_of(index).is_expanded() {
            return;
        }

        let count = policy::count_expanded(&self.states());
        if !policy::may_close(count, &self.0.config) {
            debug!(scope = %self.0.id, fold = index, "close refused: last open fold under persist");
            return;
        }

        self.collapse_now(index);
    }

    pub(crate) fn enable_fold(&self, caller: usize, target: Option<usize>) -> Result<()> {
        let index = self.resolve(caller, target)?;
        let from = self.state_of(index);
        if from.is_disabled() {
            self.transition(index, from.enable());
        }
        Ok(())
    }

    pub(crate) fn disable_fold(&self, caller: usize, target: Option<usize>) -> Result<()> {
        let index = self.resolve(caller, target)?;
        let from = self.state_of(index);
        if from.is_disabled() {
            return Ok(());
        }

        if from.is_expanded() {
            self.transition(index, from.disable(self.0.config.persist));
        } else {
            // Force the collapsed markup, clearing anything stale
            let to = from.disable(self.0.config.persist);
            {
                let mut state = self.0.state.borrow_mut();
                let fold = &mut state.folds[index];
                fold.state = to;
                render::apply(&render::sync(to, &self.0.config.classes), fold);
            }
            debug!(scope = %self.0.id, fold = index, ?from, ?to, "fold disabled");
            self.refresh_count();
        }
        Ok(())
    }

    pub(crate) fn focus_fold(&self, index: usize) -> Result<()> {
        let index = self.resolve(index, None)?;
        let fold = {
            let mut state = self.0.state.borrow_mut();
            let fold = &mut state.folds[index];
            fold.focused = true;
            render::apply(&render::focus(true, &self.0.config.classes), fold);
            fold.clone()
        };
        self.emit(EventName::Focus, Some(&fold));
        Ok(())
    }

    pub(crate) fn blur_fold(&self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let mut state = self.0.state.borrow_mut();
        let fold = &mut state.folds[index];
        if fold.state.is_destroyed() {
            return Err(RelapseError::FoldDestroyed { index });
        }
        fold.focused = false;
        render::apply(&render::focus(false, &self.0.config.classes), fold);
        Ok(())
    }

    pub(crate) fn toggle_fold(&self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let fold = self.fold_snapshot(index);
        if fold.state.is_destroyed() {
            return Err(RelapseError::FoldDestroyed { index });
        }

        if self.emit(EventName::Toggle, Some(&fold)) {
            debug!(scope = %self.0.id, fold = index, "toggle vetoed");
            return Ok(());
        }

        match self.state_of(index) {
            FoldState::Destroyed => Ok(()),
            state if state.is_expanded() => self.close_fold(index, None),
            _ => self.open_fold(index, None),
        }
    }

    /// Teardown does not count as operating the fold, so `active` is untouched.
    pub(crate) fn destroy_fold(&self, index: usize, remove: bool) -> Result<()> {
        self.check_index(index)?;
        if self.state_of(index).is_destroyed() {
            return Err(RelapseError::FoldDestroyed { index });
        }
        self.close_now(index);

        let from = self.state_of(index);
        if from.is_destroyed() {
            return Ok(());
        }
        let fold = self.transition(index, FoldState::Destroyed);
        let bindings = {
            let mut state = self.0.state.borrow_mut();
            let fold = &mut state.folds[index];
            fold.focused = false;
            std::mem::take(&mut fold.bindings)
        };
        for id in bindings {
            fold.trigger.remove_listener(id);
        }
        if remove {
            fold.panel.remove();
            fold.trigger.remove();
        }

        self.refresh_count();
        debug!(scope = %self.0.id, fold = index, ?from, remove, "fold destroyed");
        Ok(())
    }

    // =========================================================================
    // Trigger Bindings
    // =========================================================================

    /// Wire activation/focus/blur on every trigger.
    pub(crate) fn bind(&self) {
        let triggers: Vec<Element> = self
            .0
            .state
            .borrow()
            .folds
            .iter()
            .map(|f| f.trigger.clone())
            .collect();

        for (index, trigger) in triggers.into_iter().enumerate() {
            let ids = [Interaction::Activate, Interaction::Focus, Interaction::Blur]
                .map(|interaction| {
                    let weak = Rc::downgrade(&self.0);
                    trigger.add_listener(interaction, move || on_interaction(&weak, index, interaction))
                });
            self.0.state.borrow_mut().folds[index].bindings.extend(ids);
        }
    }
}

/// Listener body. Errors cannot propagate out of a listener, so they are logged.
fn on_interaction(weak: &Weak<ScopeShared>, index: usize, interaction: Interaction) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let scope = Scope(shared);

    let result = match interaction {
        Interaction::Activate => {
            if scope.state_of(index) == FoldState::CollapsedDisabled {
                debug!(scope = %scope.id(), fold = index, "activation ignored: fold disabled");
                return;
            }
            scope.toggle_fold(index)
        }
        Interaction::Focus => scope.focus_fold(index),
        Interaction::Blur => scope.blur_fold(index),
    };

    if let Err(err) = result {
        warn!(scope = %scope.id(), fold = index, ?interaction, %err, "trigger interaction failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::engine::Relapse;
    use crate::dom::{Document, Element};
    use std::cell::{Cell, RefCell};

    fn accordion(pairs: usize) -> Element {
        let el = Element::new("div");
        for i in 0..pairs {
            el.append_child(&Element::new("button").with_attribute("data-relapse-fold", &format!("f{}", i)));
            el.append_child(&Element::new("div").with_extent(10 * (i as u32 + 1)));
        }
        el
    }

    fn setup(pairs: usize, options: Options) -> (Relapse, Scope) {
        let relapse = Relapse::new(Document::new());
        let el = accordion(pairs);
        relapse.document().append(&el);
        let scope = relapse.create(&el, options).unwrap().unwrap();
        (relapse, scope)
    }

    fn expanded(scope: &Scope) -> Vec<bool> {
        scope.folds().iter().map(Fold::is_expanded).collect()
    }

    #[test]
    fn test_single_open_switches() {
        let (_relapse, scope) = setup(2, Options::new());

        scope.expand(0).unwrap();
        assert_eq!(expanded(&scope), vec![true, false]);
        assert_eq!(scope.count(), 1);

        scope.expand(1).unwrap();
        assert_eq!(expanded(&scope), vec![false, true]);
        assert_eq!(scope.count(), 1);

        // Persist refuses closing the last open fold
        scope.collapse(1).unwrap();
        assert_eq!(expanded(&scope), vec![false, true]);
        assert_eq!(scope.count(), 1);
    }

    #[test]
    fn test_multi_open_without_persist() {
        let (_relapse, scope) = setup(3, Options::new().multiple(true).persist(false));

        scope.expand(0).unwrap();
        scope.expand(1).unwrap();
        assert_eq!(scope.count(), 2);

        scope.collapse(0).unwrap();
        assert_eq!(scope.count(), 1);
        scope.collapse(1).unwrap();
        assert_eq!(scope.count(), 0);
    }

    #[test]
    fn test_multi_open_with_persist_keeps_last() {
        let (_relapse, scope) = setup(3, Options::new().multiple(true));

        scope.expand(0).unwrap();
        scope.expand(2).unwrap();
        scope.collapse(0).unwrap();
        assert_eq!(expanded(&scope), vec![false, false, true]);

        scope.collapse(2).unwrap();
        assert_eq!(expanded(&scope), vec![false, false, true]);
    }

    #[test]
    fn test_refused_close_emits_nothing() {
        let (_relapse, scope) = setup(2, Options::new());
        let collapses = Rc::new(Cell::new(0));
        let c = collapses.clone();
        scope.on(EventName::Collapse, move |_, _| c.set(c.get() + 1));

        scope.expand(0).unwrap();
        scope.collapse(0).unwrap();
        assert_eq!(collapses.get(), 0);

        scope.expand(1).unwrap();
        assert_eq!(collapses.get(), 1);
    }

    #[test]
    fn test_open_emits_collapse_before_expand() {
        let (_relapse, scope) = setup(2, Options::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        scope.on(EventName::Collapse, move |_, f| l.borrow_mut().push(("collapse", f.unwrap().index())));
        let l = log.clone();
        scope.on(EventName::Expand, move |_, f| l.borrow_mut().push(("expand", f.unwrap().index())));

        scope.expand(0).unwrap();
        scope.expand(1).unwrap();
        assert_eq!(*log.borrow(), vec![("expand", 0), ("collapse", 0), ("expand", 1)]);
    }

    #[test]
    fn test_toggle_veto() {
        let (_relapse, scope) = setup(2, Options::new().persist(false));
        scope.expand(0).unwrap();

        let collapses = Rc::new(Cell::new(0));
        let c = collapses.clone();
        scope.on(EventName::Collapse, move |_, _| c.set(c.get() + 1));
        let veto = scope.on(EventName::Toggle, |_, _| false);

        scope.fold(0).unwrap().toggle().unwrap();
        assert!(scope.folds()[0].is_expanded());
        assert_eq!(collapses.get(), 0);

        scope.off(EventName::Toggle, veto);
        scope.fold(0).unwrap().toggle().unwrap();
        assert!(!scope.folds()[0].is_expanded());
        assert_eq!(collapses.get(), 1);
    }

    #[test]
    fn test_open_other_index_records_caller_active() {
        let (_relapse, scope) = setup(3, Options::new());
        scope.fold(0).unwrap().open(Some(2)).unwrap();
        assert_eq!(expanded(&scope), vec![false, false, true]);
        assert_eq!(scope.active(), Some(0));

        let err = scope.fold(0).unwrap().open(Some(7)).unwrap_err();
        assert_eq!(err, RelapseError::InvalidFoldIndex { index: 7, len: 3 });
    }

    #[test]
    fn test_disable_and_enable() {
        let (_relapse, scope) = setup(2, Options::new().persist(false));
        let fold = scope.fold(1).unwrap();

        fold.disable(None).unwrap();
        assert_eq!(fold.get().state(), FoldState::CollapsedDisabled);
        assert!(fold.get().trigger().has_class("disabled"));

        // Programmatic opens are not blocked by disabled
        fold.open(None).unwrap();
        assert_eq!(fold.get().state(), FoldState::ExpandedDisabled);

        fold.enable(None).unwrap();
        assert_eq!(fold.get().state(), FoldState::ExpandedEnabled);
        assert_eq!(fold.get().trigger().attribute("aria-disabled").as_deref(), Some("false"));

        // Expanded without persist: disable leaves it alone
        fold.disable(None).unwrap();
        assert_eq!(fold.get().state(), FoldState::ExpandedEnabled);
    }

    #[test]
    fn test_focus_and_blur() {
        let (_relapse, scope) = setup(2, Options::new());
        let focused = Rc::new(Cell::new(None));
        let f = focused.clone();
        scope.on(EventName::Focus, move |_, fold| f.set(fold.map(Fold::index)));

        let trigger = scope.folds()[1].trigger().clone();
        trigger.dispatch(Interaction::Focus);
        assert_eq!(focused.get(), Some(1));
        assert_eq!(scope.active(), Some(1));
        assert!(trigger.has_class("focused"));

        trigger.dispatch(Interaction::Blur);
        assert!(!trigger.has_class("focused"));
        assert_eq!(scope.active(), Some(1));
    }

    #[test]
    fn test_activation_toggles_and_skips_disabled() {
        let (_relapse, scope) = setup(2, Options::new().persist(false));
        let trigger = scope.folds()[0].trigger().clone();

        trigger.dispatch(Interaction::Activate);
        assert!(scope.folds()[0].is_expanded());
        trigger.dispatch(Interaction::Activate);
        assert!(!scope.folds()[0].is_expanded());

        scope.fold(0).unwrap().disable(None).unwrap();
        trigger.dispatch(Interaction::Activate);
        assert!(!scope.folds()[0].is_expanded());
    }

    #[test]
    fn test_reentrant_handler() {
        let (_relapse, scope) = setup(3, Options::new().multiple(true).persist(false));

        // Opening fold 0 also opens fold 2 from inside the handler
        scope.on(EventName::Expand, |scope, fold| {
            if fold.map(Fold::index) == Some(0) {
                scope.expand(2).unwrap();
            }
        });

        scope.expand(0).unwrap();
        assert_eq!(expanded(&scope), vec![true, false, true]);
        assert_eq!(scope.count(), 2);
    }

    #[test]
    fn test_reentrant_open_during_make_room_keeps_single_open() {
        let (_relapse, scope) = setup(3, Options::new().persist(false));
        scope.expand(0).unwrap();

        // Collapsing fold 0 opens fold 2 from inside the handler
        let collapsed = Rc::new(RefCell::new(Vec::new()));
        let c = collapsed.clone();
        scope.on(EventName::Collapse, move |scope, fold| {
            let index = fold.map(Fold::index);
            c.borrow_mut().push(index);
            if index == Some(0) {
                scope.expand(2).unwrap();
            }
        });

        scope.expand(1).unwrap();
        assert_eq!(expanded(&scope), vec![false, true, false]);
        assert_eq!(scope.count(), 1);
        assert_eq!(*collapsed.borrow(), vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_count_signal_is_reactive() {
        let (_relapse, scope) = setup(2, Options::new().multiple(true).persist(false));
        let runs = Rc::new(Cell::new(0));
        let seen = Rc::new(Cell::new(0));

        let count = scope.count_signal();
        let (r, s) = (runs.clone(), seen.clone());
        let _effect = spark_signals::effect(move || {
            s.set(count.get());
            r.set(r.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        scope.expand(0).unwrap();
        scope.expand(1).unwrap();
        assert_eq!(seen.get(), 2);
        assert_eq!(runs.get(), 3);
    }

    #[test]
    fn test_find_by_name() {
        let (_relapse, scope) = setup(3, Options::new());
        assert_eq!(scope.find(&FoldRef::from("f2")).unwrap(), 2);
        assert_eq!(
            scope.expand("no-such-fold").unwrap_err(),
            RelapseError::FoldNotFound { name: "no-such-fold".into() }
        );
    }

    #[test]
    fn test_destroy_single_fold_keeps_scope() {
        let (relapse, scope) = setup(2, Options::new().persist(false));
        scope.expand(1).unwrap();

        scope.destroy(Some(FoldRef::Index(1)), true).unwrap();
        let fold = &scope.folds()[1];
        assert_eq!(fold.state(), FoldState::Destroyed);
        assert_eq!(fold.trigger().listener_count(), 0);
        assert!(fold.trigger().parent().is_none());
        assert_eq!(scope.count(), 0);
        assert!(relapse.get(scope.key()).is_some());

        assert_eq!(
            scope.expand(1).unwrap_err(),
            RelapseError::FoldDestroyed { index: 1 }
        );
        assert_eq!(
            scope.destroy(Some(FoldRef::Index(1)), false).unwrap_err(),
            RelapseError::FoldDestroyed { index: 1 }
        );
    }

    #[test]
    fn test_destroy_leaves_active_alone() {
        let (_relapse, scope) = setup(3, Options::new().persist(false));
        scope.fold(0).unwrap().focus().unwrap();
        scope.expand(0).unwrap();
        assert_eq!(scope.active(), Some(0));

        scope.fold(2).unwrap().destroy(false).unwrap();
        assert_eq!(scope.active(), Some(0));

        // Tearing down the whole instance clears it
        scope.destroy(None, false).unwrap();
        assert_eq!(scope.active(), None);
        assert_eq!(scope.count(), 0);
    }

    #[test]
    fn test_destroy_scope() {
        let (relapse, scope) = setup(2, Options::new());
        scope.expand(0).unwrap();
        let destroyed = Rc::new(Cell::new(false));
        let d = destroyed.clone();
        scope.on(EventName::Destroy, move |_, fold| d.set(fold.is_none()));

        scope.destroy(None, false).unwrap();
        assert!(destroyed.get());
        assert!(scope.is_destroyed());
        assert!(relapse.get(scope.key()).is_none());
        assert!(!scope.element().has_attribute("aria-multiselectable"));
        assert!(scope.folds().iter().all(|f| f.state() == FoldState::Destroyed));
        assert!(scope.folds().iter().all(|f| f.trigger().listener_count() == 0));
        // Elements stay attached without `remove`
        assert_eq!(scope.element().children().len(), 4);
    }
}
