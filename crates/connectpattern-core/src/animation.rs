//! Appear/disappear transitions.
//!
//! A transition is a set of scalar tracks, one per moving edge. Each track
//! names the slot it writes by index and is evaluated against the view's
//! clock, so no track holds a reference into the target grid.

use crate::event::PatternEvent;
use crate::layout::{Axis, CENTER_SLOT, TargetGrid};
use crate::state::{PatternState, Visibility};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Tension of the overshoot curve used when targets fly out of the centre.
pub const OVERSHOOT_TENSION: f64 = 2.0;

/// Motion style of the transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Instant repositioning.
    None,
    /// Targets spread out from and collapse into the centre slot.
    #[default]
    Middle,
    /// Targets rise from and sink below the bottom edge.
    Bottom,
}

/// Easing curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Passes the end value and settles back.
    Overshoot(f64),
    Decelerate,
    Accelerate,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Overshoot(tension) => {
                let t = t - 1.0;
                t * t * ((tension + 1.0) * t + tension) + 1.0
            }
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Accelerate => t * t,
        }
    }
}

/// Direction of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Appear,
    Disappear,
}

impl TransitionKind {
    pub fn start_event(self) -> PatternEvent {
        match self {
            TransitionKind::Appear => PatternEvent::AppearStart,
            TransitionKind::Disappear => PatternEvent::DisappearStart,
        }
    }

    pub fn end_event(self) -> PatternEvent {
        match self {
            TransitionKind::Appear => PatternEvent::AppearEnd,
            TransitionKind::Disappear => PatternEvent::DisappearEnd,
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionKind::Appear => write!(f, "appear"),
            TransitionKind::Disappear => write!(f, "disappear"),
        }
    }
}

/// One interpolated edge of one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    /// Slot whose rectangle this track writes.
    pub target: usize,
    pub axis: Axis,
    pub from: f64,
    pub to: f64,
    /// Stagger before this track starts moving.
    pub delay: Duration,
    pub easing: Easing,
}

impl Track {
    /// Value after `elapsed` time since the transition's start delay ended.
    pub fn value_at(&self, elapsed: Duration, duration: Duration) -> f64 {
        if elapsed < self.delay {
            return self.from;
        }
        let local = elapsed - self.delay;
        if duration.is_zero() || local >= duration {
            return self.to;
        }
        let progress = local.as_secs_f64() / duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }
}

/// An in-flight appear or disappear.
#[derive(Debug, Clone)]
pub struct Transition {
    kind: TransitionKind,
    started_at: Duration,
    start_delay: Duration,
    duration: Duration,
    tracks: Vec<Track>,
}

impl Transition {
    pub fn new(
        kind: TransitionKind,
        started_at: Duration,
        start_delay: Duration,
        duration: Duration,
        tracks: Vec<Track>,
    ) -> Self {
        Self {
            kind,
            started_at,
            start_delay,
            duration,
            tracks,
        }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Clock value at which the last track settles.
    pub fn end_time(&self) -> Duration {
        let longest_stagger = self
            .tracks
            .iter()
            .map(|track| track.delay)
            .max()
            .unwrap_or_default();
        self.started_at + self.start_delay + longest_stagger + self.duration
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.end_time()
    }

    /// Write every track's value at `now` into the grid.
    pub fn apply(&self, grid: &mut TargetGrid, now: Duration) {
        let elapsed = now.saturating_sub(self.started_at + self.start_delay);
        for track in &self.tracks {
            grid.set_leading_edge(track.target, track.axis, track.value_at(elapsed, self.duration));
        }
    }
}

/// Animator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPhase {
    Idle,
    AnimatingIn,
    AnimatingOut,
}

/// Plans and drives transitions, one at a time.
#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    kind: AnimationKind,
    duration: Duration,
    active: Option<Transition>,
}

impl TransitionAnimator {
    pub fn new(kind: AnimationKind, duration: Duration) -> Self {
        Self {
            kind,
            duration,
            active: None,
        }
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Per-track duration; zero for [`AnimationKind::None`].
    pub fn duration(&self) -> Duration {
        match self.kind {
            AnimationKind::None => Duration::ZERO,
            AnimationKind::Middle | AnimationKind::Bottom => self.duration,
        }
    }

    pub fn phase(&self) -> AnimatorPhase {
        match self.active.as_ref().map(Transition::kind) {
            None => AnimatorPhase::Idle,
            Some(TransitionKind::Appear) => AnimatorPhase::AnimatingIn,
            Some(TransitionKind::Disappear) => AnimatorPhase::AnimatingOut,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.active.as_ref()
    }

    /// Build the tracks for a transition from the canonical layout.
    ///
    /// `floor` is the vertical position targets sink to (or rise from) in
    /// the bottom variant. Returns no tracks when the grid is not laid out.
    pub fn plan(&self, kind: TransitionKind, state: &PatternState, floor: f64) -> Vec<Track> {
        let grid = &state.grid;
        let indices = state.active_indices();
        let Some(center) = grid.canonical(CENTER_SLOT) else {
            return Vec::new();
        };
        let stagger = match self.kind {
            AnimationKind::None => Duration::ZERO,
            AnimationKind::Middle | AnimationKind::Bottom => {
                self.duration / (indices.len().max(1) as u32)
            }
        };

        let mut tracks = Vec::with_capacity(indices.len() * 2);
        for (i, &index) in indices.iter().enumerate() {
            let Some(rest) = grid.canonical(index) else {
                continue;
            };
            match (self.kind, kind) {
                (AnimationKind::Middle, TransitionKind::Appear) => {
                    let easing = Easing::Overshoot(OVERSHOOT_TENSION);
                    tracks.push(Track {
                        target: index,
                        axis: Axis::Horizontal,
                        from: center.x0,
                        to: rest.x0,
                        delay: Duration::ZERO,
                        easing,
                    });
                    tracks.push(Track {
                        target: index,
                        axis: Axis::Vertical,
                        from: center.y0,
                        to: rest.y0,
                        delay: Duration::ZERO,
                        easing,
                    });
                }
                (AnimationKind::Middle, TransitionKind::Disappear) => {
                    let delay = stagger * i as u32;
                    tracks.push(Track {
                        target: index,
                        axis: Axis::Horizontal,
                        from: rest.x0,
                        to: center.x0,
                        delay,
                        easing: Easing::Decelerate,
                    });
                    tracks.push(Track {
                        target: index,
                        axis: Axis::Vertical,
                        from: rest.y0,
                        to: center.y0,
                        delay,
                        easing: Easing::Decelerate,
                    });
                }
                (bottom_or_none, kind) => {
                    let easing = match (bottom_or_none, kind) {
                        (AnimationKind::None, _) => Easing::Linear,
                        (_, TransitionKind::Appear) => Easing::Decelerate,
                        (_, TransitionKind::Disappear) => Easing::Accelerate,
                    };
                    let (from, to) = match kind {
                        TransitionKind::Appear => (floor, rest.y0),
                        TransitionKind::Disappear => (rest.y0, floor),
                    };
                    tracks.push(Track {
                        target: index,
                        axis: Axis::Vertical,
                        from,
                        to,
                        delay: stagger * (i % 3) as u32,
                        easing,
                    });
                }
            }
        }
        tracks
    }

    /// Start a transition at `now`, after `delay`.
    ///
    /// Targets jump to their start positions immediately and the input gate
    /// closes. Returns false if another transition is still in flight.
    pub fn start(
        &mut self,
        state: &mut PatternState,
        kind: TransitionKind,
        now: Duration,
        delay: Duration,
        floor: f64,
    ) -> bool {
        if let Some(current) = &self.active {
            log::warn!("Rejected {} while {} is in flight", kind, current.kind());
            return false;
        }

        let tracks = self.plan(kind, state, floor);
        let transition = Transition::new(kind, now, delay, self.duration(), tracks);
        transition.apply(&mut state.grid, now);

        state.gate.set_transitioning(true);
        if kind == TransitionKind::Appear {
            state.visibility = Visibility::Visible;
        }
        state.request_redraw();

        log::debug!("Starting {} ({} tracks)", kind, transition.tracks().len());
        self.active = Some(transition);
        true
    }

    /// Move the in-flight transition to `now`. Returns its kind once it has
    /// completed.
    pub fn advance(&mut self, state: &mut PatternState, now: Duration) -> Option<TransitionKind> {
        let transition = self.active.as_ref()?;
        transition.apply(&mut state.grid, now);
        state.request_redraw();

        if !transition.is_finished(now) {
            return None;
        }
        let kind = transition.kind();
        self.active = None;
        Self::finish(state);
        Some(kind)
    }

    /// Abort the in-flight transition, settling exactly as on completion.
    pub fn cancel(&mut self, state: &mut PatternState) -> Option<TransitionKind> {
        let transition = self.active.take()?;
        log::debug!("Cancelled {}", transition.kind());
        Self::finish(state);
        Some(transition.kind())
    }

    fn finish(state: &mut PatternState) {
        state.grid.reset_to_canonical();
        state.gate.set_transitioning(false);
        state.request_redraw();
    }
}
