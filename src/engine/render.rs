//! Render - Presentational patches for fold state changes.
//!
//! State transitions produce a description of the required attribute/class
//! updates; [`apply`] writes them onto the bound elements. Markers are a pure
//! function of [`FoldState`]:
//!
//! | state      | trigger                                   | panel            |
//! |------------|-------------------------------------------|------------------|
//! | expanded   | `aria-expanded=true`, class `opened`      | class `expanded`, `max-height: {extent}px` |
//! | collapsed  | `aria-expanded=false`                     | `max-height: 0`  |
//! | disabled   | `aria-disabled=true`, class `disabled`    |                  |
//! | enabled    | `aria-disabled=false`                     |                  |
//! | destroyed  | collapsed + enabled, focus cleared        | collapsed        |

use crate::config::Classes;
use crate::dom::Element;

use super::fold::{Fold, FoldState};

/// Which element of the pair a patch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Trigger,
    Panel,
}

/// Panel sizing for the open/close transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// The panel's full content extent.
    Full,
    Zero,
}

/// One presentational update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    AddClass(Part, String),
    RemoveClass(Part, String),
    SetAttribute(Part, &'static str, String),
    MaxHeight(Extent),
}

fn expanded_patches(expanded: bool, classes: &Classes, out: &mut Vec<Patch>) {
    out.push(Patch::SetAttribute(Part::Trigger, "aria-expanded", expanded.to_string()));
    if expanded {
        out.push(Patch::AddClass(Part::Trigger, classes.opened.clone()));
        out.push(Patch::AddClass(Part::Panel, classes.expanded.clone()));
        out.push(Patch::MaxHeight(Extent::Full));
    } else {
        out.push(Patch::RemoveClass(Part::Trigger, classes.opened.clone()));
        out.push(Patch::RemoveClass(Part::Panel, classes.expanded.clone()));
        out.push(Patch::MaxHeight(Extent::Zero));
    }
}

fn disabled_patches(disabled: bool, classes: &Classes, out: &mut Vec<Patch>) {
    out.push(Patch::SetAttribute(Part::Trigger, "aria-disabled", disabled.to_string()));
    if disabled {
        out.push(Patch::AddClass(Part::Trigger, classes.disabled.clone()));
    } else {
        out.push(Patch::RemoveClass(Part::Trigger, classes.disabled.clone()));
    }
}

/// Patches for the dimensions that differ between `from` and `to`.
pub fn transition(from: FoldState, to: FoldState, classes: &Classes) -> Vec<Patch> {
    if to.is_destroyed() {
        let mut out = sync(FoldState::CollapsedEnabled, classes);
        out.extend(focus(false, classes));
        return out;
    }

    let mut out = Vec::new();
    if from.is_destroyed() || from.is_expanded() != to.is_expanded() {
        expanded_patches(to.is_expanded(), classes, &mut out);
    }
    if from.is_destroyed() || from.is_disabled() != to.is_disabled() {
        disabled_patches(to.is_disabled(), classes, &mut out);
    }
    out
}

/// Full set of patches forcing the markup to agree with `state`.
pub fn sync(state: FoldState, classes: &Classes) -> Vec<Patch> {
    if state.is_destroyed() {
        return transition(state, state, classes);
    }
    let mut out = Vec::new();
    expanded_patches(state.is_expanded(), classes, &mut out);
    disabled_patches(state.is_disabled(), classes, &mut out);
    out
}

pub fn focus(focused: bool, classes: &Classes) -> Vec<Patch> {
    if focused {
        vec![Patch::AddClass(Part::Trigger, classes.focused.clone())]
    } else {
        vec![Patch::RemoveClass(Part::Trigger, classes.focused.clone())]
    }
}

fn element(fold: &Fold, part: Part) -> &Element {
    match part {
        Part::Trigger => &fold.trigger,
        Part::Panel => &fold.panel,
    }
}

/// Write `patches` onto the fold's trigger and panel.
pub fn apply(patches: &[Patch], fold: &Fold) {
    for patch in patches {
        match patch {
            Patch::AddClass(part, class) => element(fold, *part).add_class(class),
            Patch::RemoveClass(part, class) => element(fold, *part).remove_class(class),
            Patch::SetAttribute(part, name, value) => element(fold, *part).set_attribute(name, value),
            Patch::MaxHeight(Extent::Full) => {
                let extent = fold.panel.content_extent();
                fold.panel.set_style("max-height", &format!("{}px", extent));
            }
            Patch::MaxHeight(Extent::Zero) => fold.panel.set_style("max-height", "0"),
        }
    }
}
