//! Shared widget state.
//!
//! Everything the gesture tracker and the transition animator mutate lives
//! in [`PatternState`]. Ownership is split by phase: the tracker writes the
//! selection, pointer region and debounce gate; the animator writes the
//! current target rectangles and the transition gate. The animator only runs
//! while input is gated off, so the two never write the same rectangle.

use crate::layout::{Target, TargetCount, TargetGrid};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Widget visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Visible,
    /// Not drawn, but keeps its layout.
    Invisible,
    /// Not drawn; the host has hidden it entirely.
    Gone,
}

/// Conditions that close the input gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputGate {
    host_enabled: bool,
    debouncing: bool,
    transitioning: bool,
}

impl Default for InputGate {
    fn default() -> Self {
        Self {
            host_enabled: true,
            debouncing: false,
            transitioning: false,
        }
    }
}

impl InputGate {
    /// True when pointer input and new transitions are accepted.
    pub fn is_open(&self) -> bool {
        self.host_enabled && !self.debouncing && !self.transitioning
    }

    pub fn host_enabled(&self) -> bool {
        self.host_enabled
    }

    pub fn is_debouncing(&self) -> bool {
        self.debouncing
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub(crate) fn set_host_enabled(&mut self, enabled: bool) {
        self.host_enabled = enabled;
    }

    pub(crate) fn set_debouncing(&mut self, debouncing: bool) {
        self.debouncing = debouncing;
    }

    pub(crate) fn set_transitioning(&mut self, transitioning: bool) {
        self.transitioning = transitioning;
    }
}

/// Mutable state of one pattern widget.
#[derive(Debug, Clone)]
pub struct PatternState {
    /// Target rectangles, canonical and current.
    pub grid: TargetGrid,
    /// Active target count; `None` when the configured count is unsupported.
    pub active: Option<TargetCount>,
    /// Indices connected so far in the current gesture.
    pub selection: Vec<usize>,
    /// Hit-box following the pointer; zero-area when no pointer is down.
    pub pointer_region: Rect,
    /// Whether the current gesture hit a target on pointer-down.
    pub captured: bool,
    pub gate: InputGate,
    pub visibility: Visibility,
    redraw_requested: bool,
}

impl PatternState {
    pub fn new(active: Option<TargetCount>, diameter: f64) -> Self {
        Self {
            grid: TargetGrid::new(diameter),
            active,
            selection: Vec::new(),
            pointer_region: Rect::ZERO,
            captured: false,
            gate: InputGate::default(),
            visibility: Visibility::default(),
            redraw_requested: false,
        }
    }

    /// Active index set in hit-test order (empty when unsupported).
    pub fn active_indices(&self) -> &'static [usize] {
        self.active.map(TargetCount::indices).unwrap_or(&[])
    }

    /// Active targets at their current positions.
    pub fn active_targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.active_indices()
            .iter()
            .map(move |&index| self.grid.target(index))
    }

    /// Both an active set and canonical geometry exist.
    pub fn is_laid_out(&self) -> bool {
        self.active.is_some() && self.grid.is_laid_out()
    }

    pub fn is_enabled(&self) -> bool {
        self.gate.is_open()
    }

    /// Pointer input is only processed for enabled, visible widgets.
    pub fn accepts_input(&self) -> bool {
        self.gate.is_open() && self.visibility == Visibility::Visible
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Return and clear the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_defaults_open() {
        let gate = InputGate::default();
        assert!(gate.is_open());
    }

    #[test]
    fn test_gate_any_condition_closes() {
        let mut gate = InputGate::default();
        gate.set_debouncing(true);
        assert!(!gate.is_open());
        gate.set_debouncing(false);
        gate.set_transitioning(true);
        assert!(!gate.is_open());
        gate.set_transitioning(false);
        gate.set_host_enabled(false);
        assert!(!gate.is_open());
    }

    #[test]
    fn test_unsupported_count_has_no_indices() {
        let state = PatternState::new(None, 28.0);
        assert!(state.active_indices().is_empty());
        assert!(!state.is_laid_out());
    }

    #[test]
    fn test_redraw_request_is_taken_once() {
        let mut state = PatternState::new(Some(TargetCount::Nine), 28.0);
        state.request_redraw();
        assert!(state.take_redraw_request());
        assert!(!state.take_redraw_request());
    }

    #[test]
    fn test_hidden_widget_refuses_input() {
        let mut state = PatternState::new(Some(TargetCount::Nine), 28.0);
        assert!(state.accepts_input());
        state.visibility = Visibility::Invisible;
        assert!(!state.accepts_input());
        assert!(state.is_enabled());
    }
}
