//! Reconciliation - Turn a container's children into folds.
//!
//! Children pair up in document order as (trigger, panel). Each pair's
//! starting state comes from whatever markers the markup already carries:
//!
//! 1. any open marker (`initial`/`opened` class on the trigger, `expanded`
//!    class on the panel, `aria-expanded="true"`) ⇒ expanded and disabled
//! 2. else any disabled marker (`disabled` class, `aria-disabled="true"`)
//!    ⇒ collapsed and disabled
//! 3. else collapsed and enabled
//!
//! The markup is then forced into agreement with the chosen state and the
//! `initial` marker is consumed.

use tracing::debug;

use crate::config::{Classes, Config};
use crate::dom::Element;
use crate::error::{RelapseError, Result};
use crate::types::Markers;

use super::fold::{Fold, FoldState};
use super::render;

/// Split the container's children into (trigger, panel) pairs.
pub fn pair(container: &Element) -> Result<Vec<(Element, Element)>> {
    let children = container.children();
    if children.len() % 2 != 0 {
        return Err(RelapseError::UnpairedChild {
            index: children.len() - 1,
        });
    }
    Ok(children
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect())
}

/// Markers present on a pair before the engine touched it.
pub fn read_markers(trigger: &Element, panel: &Element, classes: &Classes) -> Markers {
    let mut markers = Markers::empty();
    markers.set(Markers::INITIAL, trigger.has_class(&classes.initial));
    markers.set(Markers::OPENED, trigger.has_class(&classes.opened));
    markers.set(Markers::DISABLED, trigger.has_class(&classes.disabled));
    markers.set(Markers::EXPANDED, panel.has_class(&classes.expanded));
    markers.set(
        Markers::ARIA_EXPANDED,
        trigger.attribute("aria-expanded").as_deref() == Some("true"),
    );
    markers.set(
        Markers::ARIA_DISABLED,
        trigger.attribute("aria-disabled").as_deref() == Some("true"),
    );
    markers
}

/// Starting state for a pair. `open_taken` is set when single-open mode
/// already has its one expanded fold.
pub fn initial_state(markers: Markers, open_taken: bool) -> FoldState {
    if markers.wants_expanded() && !open_taken {
        FoldState::ExpandedDisabled
    } else if markers.wants_disabled() {
        FoldState::CollapsedDisabled
    } else {
        FoldState::CollapsedEnabled
    }
}

/// Build folds for `pairs`, writing ids, linkage and state markers.
pub fn reconcile(scope_id: &str, config: &Config, pairs: Vec<(Element, Element)>) -> Vec<Fold> {
    let classes = &config.classes;
    let mut folds = Vec::with_capacity(pairs.len());
    let mut open_taken = false;

    for (index, (trigger, panel)) in pairs.into_iter().enumerate() {
        let markers = read_markers(&trigger, &panel, classes);
        let state = initial_state(markers, open_taken);

        if markers.wants_expanded() && !state.is_expanded() {
            debug!(scope = %scope_id, fold = index, "second pre-opened fold collapsed in single-open mode");
        }
        if state.is_expanded() && !config.multiple {
            open_taken = true;
        }

        let id = panel
            .id()
            .or_else(|| trigger.id())
            .unwrap_or_else(|| format!("{}F{}", scope_id, index));
        if trigger.id().is_none() {
            trigger.set_id(&format!("B{}", id));
        }
        if panel.id().is_none() {
            panel.set_id(&format!("C{}", id));
        }

        trigger.remove_class(&classes.initial);
        if let Some(panel_id) = panel.id() {
            trigger.set_attribute("aria-controls", &panel_id);
        }
        if let Some(trigger_id) = trigger.id() {
            panel.set_attribute("aria-labelledby", &trigger_id);
        }
        panel.set_attribute("role", "region");

        let fold = Fold::new(index, id, state, trigger, panel);
        render::apply(&render::sync(state, classes), &fold);
        folds.push(fold);
    }

    folds
}
