//! The pattern view: the host-facing facade tying layout, gestures, result
//! delivery and transitions together.
//!
//! All work happens on the caller's thread. Time only moves when the host
//! calls [`ConnectPatternView::advance`] or [`ConnectPatternView::advance_to`];
//! delayed work (release debounce, layout retries) and animation frames are
//! processed there, in clock order.

use crate::animation::{AnimatorPhase, TransitionAnimator, TransitionKind};
use crate::config::PatternConfig;
use crate::event::{EventDispatcher, PatternEvent};
use crate::gesture::GestureTracker;
use crate::input::PointerEvent;
use crate::layout::{Target, TargetCount};
use crate::outcome;
use crate::schedule::{Deferred, Scheduler};
use crate::state::{PatternState, Visibility};
use kurbo::{Point, Rect};
use std::time::Duration;

/// A connect-the-dots pattern widget, independent of any UI toolkit.
#[derive(Debug)]
pub struct ConnectPatternView {
    config: PatternConfig,
    state: PatternState,
    tracker: GestureTracker,
    animator: TransitionAnimator,
    scheduler: Scheduler,
    events: EventDispatcher,
    surface: Option<Rect>,
    display_height: f64,
}

impl ConnectPatternView {
    /// Create a view. An unsupported target count or invalid geometry is
    /// logged and leaves the view inert rather than failing.
    pub fn new(config: PatternConfig) -> Self {
        let active = match config
            .validate()
            .and_then(|()| TargetCount::try_from(config.target_count))
        {
            Ok(count) => {
                log::debug!("Pattern view with {} targets", count.count());
                Some(count)
            }
            Err(e) => {
                log::warn!("{}; the pattern view will not accept input", e);
                None
            }
        };

        Self {
            state: PatternState::new(active, config.diameter()),
            tracker: GestureTracker::new(config.touch_size),
            animator: TransitionAnimator::new(config.animation, config.animation_duration()),
            scheduler: Scheduler::new(),
            events: EventDispatcher::new(),
            surface: None,
            display_height: config.display_height,
            config,
        }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Read-only access to the full widget state.
    pub fn state(&self) -> &PatternState {
        &self.state
    }

    /// Register the event listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl FnMut(&PatternEvent) + 'static) {
        self.events.set_listener(listener);
    }

    pub fn clear_listener(&mut self) {
        self.events.clear_listener();
    }

    // --- Layout ---

    /// The surface the widget occupies changed size or position.
    ///
    /// Targets are laid out inside `bounds` minus the configured padding. A
    /// degenerate content area leaves the view unlaid-out.
    pub fn layout_surface_changed(&mut self, bounds: Rect) {
        self.surface = Some(bounds);
        let padding = self.config.padding;
        let content = Rect::new(
            bounds.x0 + padding.x0,
            bounds.y0 + padding.y0,
            bounds.x1 - padding.x1,
            bounds.y1 - padding.y1,
        );

        if content.width() > 0.0 && content.height() > 0.0 {
            // A running transition keeps driving the current rectangles and
            // settles on the new canonical ones when it ends.
            let reset_current = !self.animator.is_active();
            self.state.grid.layout(content, reset_current);
            log::debug!("Laid out targets in {:?}", content);
        } else {
            log::debug!("Surface {:?} leaves no room for targets", bounds);
            self.state.grid.clear();
        }
        self.state.request_redraw();
    }

    pub fn surface_bounds(&self) -> Option<Rect> {
        self.surface
    }

    /// Height used by the bottom transition while the surface is unmeasured.
    pub fn set_display_height(&mut self, height: f64) {
        self.display_height = height;
    }

    pub fn is_laid_out(&self) -> bool {
        self.state.is_laid_out()
    }

    /// Where bottom transitions start and end.
    fn bottom_edge(&self) -> f64 {
        self.surface
            .map(|bounds| bounds.y1)
            .filter(|bottom| *bottom > 0.0)
            .unwrap_or(self.display_height)
    }

    // --- Pointer input ---

    /// Begin a gesture. Returns true if it hit a target and should keep
    /// being tracked.
    pub fn pointer_down(&mut self, position: Point) -> bool {
        self.tracker.begin(&mut self.state, position)
    }

    pub fn pointer_move(&mut self, position: Point) {
        self.tracker.move_to(&mut self.state, position);
    }

    /// Release the pointer. The outcome is reported one animation duration
    /// later; input stays disabled until then.
    pub fn pointer_up(&mut self) {
        if self.tracker.end(&mut self.state) {
            self.scheduler
                .schedule_after(self.config.animation_duration(), Deferred::DeliverResult);
        }
    }

    /// Abandon the gesture silently.
    pub fn pointer_cancel(&mut self) {
        self.tracker.cancel(&mut self.state);
    }

    /// Dispatch a pointer event. Returns true when the event was consumed.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => {
                let tracking = self.is_tracking();
                self.pointer_move(position);
                tracking
            }
            PointerEvent::Up => {
                let accepted = self.state.accepts_input();
                self.pointer_up();
                accepted
            }
            PointerEvent::Cancel => {
                self.pointer_cancel();
                false
            }
        }
    }

    /// A gesture is captured and still in progress.
    pub fn is_tracking(&self) -> bool {
        self.state.captured
    }

    // --- Transitions ---

    /// Play the appear transition after `delay`.
    pub fn animate_in(&mut self, delay: Duration) {
        self.request_transition(TransitionKind::Appear, delay, 0);
    }

    /// Play the disappear transition after `delay`.
    pub fn animate_out(&mut self, delay: Duration) {
        self.request_transition(TransitionKind::Disappear, delay, 0);
    }

    /// Stop the running transition, settling targets at rest and reporting
    /// its end as if it had completed.
    pub fn cancel_animation(&mut self) {
        if let Some(kind) = self.animator.cancel(&mut self.state) {
            self.events.emit(kind.end_event());
        }
    }

    fn request_transition(&mut self, kind: TransitionKind, delay: Duration, attempt: u32) {
        if !self.state.is_enabled() {
            log::debug!("Ignoring {} request: widget disabled", kind);
            return;
        }
        if kind == TransitionKind::Appear && self.state.visibility == Visibility::Gone {
            self.state.visibility = Visibility::Invisible;
        }

        if !self.state.is_laid_out() {
            if attempt >= self.config.max_layout_retries {
                log::warn!(
                    "Dropping {} request after {} retries: layout never became ready",
                    kind,
                    attempt
                );
                return;
            }
            log::debug!("Deferring {} until layout is ready (attempt {})", kind, attempt + 1);
            self.scheduler.schedule_after(
                self.config.animation_duration(),
                Deferred::RetryTransition {
                    kind,
                    delay,
                    attempt: attempt + 1,
                },
            );
            return;
        }

        let now = self.scheduler.now();
        let floor = self.bottom_edge();
        if self.animator.start(&mut self.state, kind, now, delay, floor) {
            self.events.emit(kind.start_event());
            // Zero-length transitions complete right away
            self.step_transition();
        }
    }

    pub fn phase(&self) -> AnimatorPhase {
        self.animator.phase()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    // --- Host controls ---

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.gate.set_host_enabled(enabled);
    }

    /// Whether input and transition requests are currently accepted.
    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    pub fn visibility(&self) -> Visibility {
        self.state.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        if self.state.visibility != visibility {
            self.state.visibility = visibility;
            self.state.request_redraw();
        }
    }

    // --- Clock ---

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Advance the clock by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.scheduler.now() + elapsed;
        self.advance_to(target);
    }

    /// Advance the clock to `now`, firing due timers and animation frames in
    /// order. Earlier times are ignored.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some(action) = self.scheduler.pop_due(now) {
            self.step_transition();
            self.fire(action);
        }
        self.scheduler.advance_to(now);
        self.step_transition();
    }

    /// Earliest clock value at which something will change on its own.
    pub fn next_deadline(&self) -> Option<Duration> {
        if self.animator.is_active() {
            return Some(self.scheduler.now());
        }
        self.scheduler.next_due()
    }

    fn step_transition(&mut self) {
        let now = self.scheduler.now();
        if let Some(kind) = self.animator.advance(&mut self.state, now) {
            self.events.emit(kind.end_event());
        }
    }

    fn fire(&mut self, action: Deferred) {
        match action {
            Deferred::DeliverResult => {
                let outcome = outcome::resolve(&mut self.state);
                self.events.emit(outcome.into_event());
            }
            Deferred::RetryTransition {
                kind,
                delay,
                attempt,
            } => self.request_transition(kind, delay, attempt),
        }
    }

    // --- Rendering queries ---

    /// Connected indices, in connection order.
    pub fn selection(&self) -> &[usize] {
        &self.state.selection
    }

    /// Hit-box following the pointer; zero-area when no pointer is down.
    pub fn pointer_region(&self) -> Rect {
        self.state.pointer_region
    }

    pub fn active_indices(&self) -> &'static [usize] {
        self.state.active_indices()
    }

    /// Active targets at their current positions.
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.state.active_targets()
    }

    /// Current geometry of an active target.
    pub fn target(&self, index: usize) -> Option<Target> {
        self.active_indices()
            .contains(&index)
            .then(|| self.state.grid.target(index))
    }

    /// Rest rectangle of a slot, if laid out.
    pub fn canonical_rect(&self, index: usize) -> Option<Rect> {
        self.state.grid.canonical(index)
    }

    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    /// Return and clear the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        self.state.take_redraw_request()
    }
}

impl Default for ConnectPatternView {
    fn default() -> Self {
        Self::new(PatternConfig::default())
    }
}
