//! Group policy - pure decisions over a scope's fold states.

use crate::config::Config;

use super::fold::FoldState;

/// Number of expanded folds.
pub fn count_expanded(states: &[FoldState]) -> usize {
    states.iter().filter(|s| s.is_expanded()).count()
}

/// Whether an expanded fold may close given the current open count.
///
/// Single-open mode never has more than one fold open, so under persist the
/// open fold can never be closed directly.
pub fn may_close(count: usize, config: &Config) -> bool {
    !config.persist || count > 1
}

/// Single-open mode: the fold that has to collapse before `target` opens.
///
/// Scans in index order and stops at the first expanded fold. Persist does
/// not apply here since `target` takes over as the open fold.
pub fn make_room(states: &[FoldState], target: usize, config: &Config) -> Option<usize> {
    if config.multiple {
        return None;
    }
    states
        .iter()
        .enumerate()
        .find(|(index, state)| *index != target && state.is_expanded())
        .map(|(index, _)| index)
}
