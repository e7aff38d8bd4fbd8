//! Resolution of a released gesture.

use crate::event::PatternEvent;
use crate::state::PatternState;

/// Fewest connected targets that count as an entered pattern.
pub const MIN_PATTERN_LEN: usize = 2;

/// What a finished gesture amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternOutcome {
    Entered(Vec<usize>),
    Abandoned,
}

impl PatternOutcome {
    pub fn from_selection(selection: &[usize]) -> Self {
        if selection.len() >= MIN_PATTERN_LEN {
            PatternOutcome::Entered(selection.to_vec())
        } else {
            PatternOutcome::Abandoned
        }
    }

    pub fn into_event(self) -> PatternEvent {
        match self {
            PatternOutcome::Entered(sequence) => PatternEvent::PatternEntered(sequence),
            PatternOutcome::Abandoned => PatternEvent::PatternAbandoned,
        }
    }
}

/// Evaluate the selection once the release debounce has elapsed, then clear
/// it and reopen the input gate.
pub fn resolve(state: &mut PatternState) -> PatternOutcome {
    let outcome = PatternOutcome::from_selection(&state.selection);
    state.selection.clear();
    state.captured = false;
    state.gate.set_debouncing(false);
    state.request_redraw();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TargetCount;

    #[test]
    fn test_short_selections_are_abandoned() {
        assert_eq!(PatternOutcome::from_selection(&[]), PatternOutcome::Abandoned);
        assert_eq!(PatternOutcome::from_selection(&[3]), PatternOutcome::Abandoned);
    }

    #[test]
    fn test_order_is_preserved() {
        assert_eq!(
            PatternOutcome::from_selection(&[0, 4, 8]).into_event(),
            PatternEvent::PatternEntered(vec![0, 4, 8])
        );
        assert_eq!(
            PatternOutcome::from_selection(&[8, 0]),
            PatternOutcome::Entered(vec![8, 0])
        );
    }

    #[test]
    fn test_resolve_resets_state() {
        let mut state = PatternState::new(Some(TargetCount::Nine), 28.0);
        state.selection = vec![2, 1];
        state.gate.set_debouncing(true);

        let outcome = resolve(&mut state);

        assert_eq!(outcome, PatternOutcome::Entered(vec![2, 1]));
        assert!(state.selection.is_empty());
        assert!(state.is_enabled());
        assert!(state.take_redraw_request());
    }
}
