//! Pointer gesture tracking and hit-testing.
//!
//! Hit-testing intersects a square region around the pointer with each
//! target's bounding box. It is a rectangle test, not a circular distance
//! test, so a pointer near a circle's corner can still connect it. Targets
//! are tested in active-index order and the lower index wins ties.

use crate::state::PatternState;
use kurbo::{Point, Rect, Size};

/// Square hit-box of side `size` centred on `position`.
pub fn pointer_region(position: Point, size: f64) -> Rect {
    Rect::from_center_size(position, Size::new(size, size))
}

/// Strict overlap test. Touching edges and zero-area rectangles never hit.
pub fn intersects(a: Rect, b: Rect) -> bool {
    if a.is_zero_area() || b.is_zero_area() {
        return false;
    }
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Active targets hit by `region`, in active-index order.
pub fn hits(state: &PatternState, region: Rect) -> Vec<usize> {
    if !state.grid.is_laid_out() {
        return Vec::new();
    }
    state
        .active_targets()
        .filter(|target| intersects(region, target.bounds))
        .map(|target| target.index)
        .collect()
}

/// Turns pointer down/move/up into a selection sequence.
#[derive(Debug, Clone, Copy)]
pub struct GestureTracker {
    touch_size: f64,
}

impl GestureTracker {
    pub fn new(touch_size: f64) -> Self {
        Self { touch_size }
    }

    pub fn touch_size(&self) -> f64 {
        self.touch_size
    }

    /// Start a gesture. Returns true if a target was hit and the gesture is
    /// now being tracked.
    pub fn begin(&self, state: &mut PatternState, position: Point) -> bool {
        if !state.accepts_input() {
            log::debug!("Pointer down ignored: input disabled");
            return false;
        }

        state.selection.clear();
        state.captured = false;
        state.pointer_region = pointer_region(position, self.touch_size);

        let Some(&first) = hits(state, state.pointer_region).first() else {
            return false;
        };
        state.selection.push(first);
        state.captured = true;
        state.request_redraw();
        true
    }

    /// Extend the gesture with every newly touched target.
    pub fn move_to(&self, state: &mut PatternState, position: Point) {
        if !state.accepts_input() || !state.captured {
            return;
        }

        state.pointer_region = pointer_region(position, self.touch_size);
        for index in hits(state, state.pointer_region) {
            if !state.selection.contains(&index) {
                state.selection.push(index);
            }
        }
        state.request_redraw();
    }

    /// Release the pointer and close the debounce gate.
    ///
    /// Returns true when the release was accepted; the caller is then
    /// responsible for resolving the selection once the debounce elapses.
    pub fn end(&self, state: &mut PatternState) -> bool {
        if !state.accepts_input() {
            log::debug!("Pointer up ignored: input disabled");
            return false;
        }

        state.gate.set_debouncing(true);
        state.pointer_region = Rect::ZERO;
        state.captured = false;
        state.request_redraw();
        true
    }

    /// Drop the current gesture without reporting an outcome.
    pub fn cancel(&self, state: &mut PatternState) {
        if !state.captured && state.selection.is_empty() {
            return;
        }
        state.selection.clear();
        state.pointer_region = Rect::ZERO;
        state.captured = false;
        state.request_redraw();
    }
}
