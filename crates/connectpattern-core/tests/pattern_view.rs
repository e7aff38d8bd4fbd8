//! End-to-end behaviour of the pattern view as seen by a host.

use connectpattern_core::{
    AnimationKind, AnimatorPhase, ConnectPatternView, PatternConfig, PatternEvent, Visibility,
};
use kurbo::{Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const SURFACE: Rect = Rect::new(0.0, 0.0, 320.0, 320.0);

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

struct Harness {
    view: ConnectPatternView,
    events: Rc<RefCell<Vec<PatternEvent>>>,
}

impl Harness {
    fn new(config: PatternConfig) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let mut view = ConnectPatternView::new(config);
        view.set_listener(move |event| sink.borrow_mut().push(event.clone()));
        Self { view, events }
    }

    fn laid_out(config: PatternConfig) -> Self {
        let mut harness = Self::new(config);
        harness.view.layout_surface_changed(SURFACE);
        harness
    }

    fn center(&self, index: usize) -> Point {
        self.view.target(index).unwrap().center()
    }

    fn draw(&mut self, path: &[usize]) {
        let (first, rest) = path.split_first().unwrap();
        assert!(self.view.pointer_down(self.center(*first)));
        for &index in rest {
            let position = self.center(index);
            self.view.pointer_move(position);
        }
        self.view.pointer_up();
    }

    fn take_events(&self) -> Vec<PatternEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn assert_canonical(&self) {
        for target in self.view.targets() {
            assert_eq!(
                Some(target.bounds),
                self.view.canonical_rect(target.index),
                "target {} is not at rest",
                target.index
            );
        }
    }
}

#[test]
fn test_supported_counts_have_unique_indices() {
    for count in [2u8, 3, 5, 9] {
        let view = ConnectPatternView::new(PatternConfig::default().with_target_count(count));
        let indices = view.active_indices();
        assert_eq!(indices.len(), count as usize);
        let mut seen = [false; 9];
        for &index in indices {
            assert!(index <= 8);
            assert!(!seen[index]);
            seen[index] = true;
        }
    }
}

#[test]
fn test_unsupported_counts_are_inert() {
    for count in [0u8, 1, 4, 6, 7, 8, 10, 200] {
        let mut harness = Harness::laid_out(PatternConfig::default().with_target_count(count));
        assert!(harness.view.active_indices().is_empty());
        assert!(!harness.view.pointer_down(Point::new(14.0, 14.0)));
        harness.view.pointer_move(Point::new(160.0, 160.0));
        harness.view.animate_in(Duration::ZERO);
        // The appear request retries until it gives up; it never starts
        harness.view.advance(ms(60_000));
        assert!(!harness.take_events().contains(&PatternEvent::AppearStart));
        assert!(!harness.view.is_animating());
    }
}

#[test]
fn test_revisits_are_ignored() {
    let mut harness = Harness::laid_out(PatternConfig::default());
    harness.draw(&[0, 1, 0, 2]);
    harness.view.advance(ms(300));
    assert_eq!(
        harness.take_events(),
        vec![PatternEvent::PatternEntered(vec![0, 1, 2])]
    );
}

#[test]
fn test_diagonal_pattern_is_entered_in_order() {
    let mut harness = Harness::laid_out(PatternConfig::default());
    harness.draw(&[0, 4, 8]);
    harness.view.advance(ms(300));
    assert_eq!(
        harness.take_events(),
        vec![PatternEvent::PatternEntered(vec![0, 4, 8])]
    );
}

#[test]
fn test_single_target_is_abandoned() {
    let mut harness = Harness::laid_out(PatternConfig::default());
    harness.draw(&[5]);
    harness.view.advance(ms(300));
    assert_eq!(harness.take_events(), vec![PatternEvent::PatternAbandoned]);
}

#[test]
fn test_empty_release_is_abandoned() {
    let mut harness = Harness::laid_out(PatternConfig::default());
    assert!(!harness.view.pointer_down(Point::new(90.0, 90.0)));
    harness.view.pointer_up();
    harness.view.advance(ms(300));
    assert_eq!(harness.take_events(), vec![PatternEvent::PatternAbandoned]);
}

#[test]
fn test_input_rejected_during_debounce() {
    let mut harness = Harness::laid_out(PatternConfig::default());
    harness.draw(&[0, 1]);

    harness.view.advance(ms(150));
    assert!(!harness.view.pointer_down(harness.center(4)));
    harness.view.pointer_move(harness.center(8));
    harness.view.pointer_up();
    assert_eq!(harness.view.selection(), &[0, 1]);

    harness.view.advance(ms(150));
    assert_eq!(
        harness.take_events(),
        vec![PatternEvent::PatternEntered(vec![0, 1])]
    );

    // A second, rejected release must not produce another result
    harness.view.advance(ms(1000));
    assert!(harness.take_events().is_empty());
    assert!(harness.view.pointer_down(harness.center(4)));
}

#[test]
fn test_transitions_settle_at_rest() {
    for animation in [AnimationKind::None, AnimationKind::Middle, AnimationKind::Bottom] {
        let mut harness = Harness::laid_out(PatternConfig::default().with_animation(animation));

        harness.view.animate_in(Duration::ZERO);
        harness.view.advance(ms(1000));
        harness.assert_canonical();

        harness.view.animate_out(Duration::ZERO);
        harness.view.advance(ms(1000));
        harness.assert_canonical();

        assert_eq!(
            harness.take_events(),
            vec![
                PatternEvent::AppearStart,
                PatternEvent::AppearEnd,
                PatternEvent::DisappearStart,
                PatternEvent::DisappearEnd,
            ],
            "unexpected lifecycle for {:?}",
            animation
        );
    }
}

#[test]
fn test_input_disabled_for_whole_transition() {
    let mut harness = Harness::laid_out(PatternConfig::default());
    let target = harness.center(0);

    harness.view.animate_out(ms(100));
    for _ in 0..30 {
        assert!(!harness.view.pointer_down(target));
        harness.view.advance(ms(20));
    }
    harness.view.advance(ms(1000));
    assert_eq!(harness.view.phase(), AnimatorPhase::Idle);
    assert!(harness.view.pointer_down(target));
}

#[test]
fn test_animate_before_layout_is_deferred() {
    let mut harness = Harness::new(PatternConfig::default());

    harness.view.animate_in(Duration::ZERO);
    harness.view.advance(ms(900));
    assert!(harness.take_events().is_empty());
    assert!(!harness.view.is_animating());

    harness.view.layout_surface_changed(SURFACE);
    harness.view.advance(ms(300));
    assert_eq!(harness.take_events(), vec![PatternEvent::AppearStart]);

    harness.view.advance(ms(300));
    assert_eq!(harness.take_events(), vec![PatternEvent::AppearEnd]);
    harness.assert_canonical();
}

#[test]
fn test_animate_out_before_layout_is_deferred() {
    let mut harness = Harness::new(PatternConfig::default());

    harness.view.animate_out(Duration::ZERO);
    harness.view.advance(ms(300));
    assert!(harness.take_events().is_empty());
    assert!(!harness.view.is_animating());

    harness.view.layout_surface_changed(SURFACE);
    harness.view.advance(ms(300));
    assert_eq!(harness.take_events(), vec![PatternEvent::DisappearStart]);
    assert_eq!(harness.view.phase(), AnimatorPhase::AnimatingOut);

    harness.view.advance(ms(1000));
    assert_eq!(harness.take_events(), vec![PatternEvent::DisappearEnd]);
    harness.assert_canonical();
    assert!(harness.view.is_enabled());
}

#[test]
fn test_deferred_retries_are_capped() {
    let mut config = PatternConfig::default();
    config.max_layout_retries = 3;
    let mut harness = Harness::new(config);

    harness.view.animate_out(Duration::ZERO);
    harness.view.advance(ms(300 * 3));
    assert_eq!(harness.view.next_deadline(), None);

    // Layout arriving after the cap no longer triggers the dropped request
    harness.view.layout_surface_changed(SURFACE);
    harness.view.advance(ms(5000));
    assert!(harness.take_events().is_empty());
}

#[test]
fn test_overlapping_targets_prefer_lower_index() {
    let mut harness = Harness::new(PatternConfig::default());
    harness.view.layout_surface_changed(Rect::new(0.0, 0.0, 40.0, 40.0));

    assert!(harness.view.pointer_down(Point::new(20.0, 20.0)));
    assert_eq!(harness.view.selection(), &[0]);
}

#[test]
fn test_out_then_in_restores_initial_state() {
    for animation in [AnimationKind::None, AnimationKind::Middle, AnimationKind::Bottom] {
        let mut harness = Harness::laid_out(PatternConfig::default().with_animation(animation));
        let initial: Vec<_> = harness.view.targets().collect();

        harness.view.animate_out(Duration::ZERO);
        harness.view.advance(ms(1000));
        harness.view.animate_in(Duration::ZERO);
        harness.view.advance(ms(1000));

        assert_eq!(harness.view.visibility(), Visibility::Visible, "{:?}", animation);
        assert!(harness.view.is_enabled(), "{:?}", animation);
        assert_eq!(harness.view.phase(), AnimatorPhase::Idle, "{:?}", animation);
        assert_eq!(harness.view.targets().collect::<Vec<_>>(), initial, "{:?}", animation);
        assert!(harness.view.selection().is_empty());
        assert!(harness.view.pointer_region().is_zero_area());

        // Input works again after the round trip
        assert!(harness.view.pointer_down(harness.center(0)));
    }
}

#[test]
fn test_in_rejected_while_out_in_flight() {
    let mut harness = Harness::laid_out(PatternConfig::default());

    harness.view.animate_out(Duration::ZERO);
    harness.view.advance(ms(50));
    harness.view.animate_in(Duration::ZERO);
    assert_eq!(harness.view.phase(), AnimatorPhase::AnimatingOut);

    harness.view.advance(ms(1000));
    assert_eq!(
        harness.take_events(),
        vec![PatternEvent::DisappearStart, PatternEvent::DisappearEnd]
    );
}

#[test]
fn test_cancelled_disappear_still_reports_end() {
    let mut harness = Harness::laid_out(PatternConfig::default().with_animation(AnimationKind::Bottom));

    harness.view.animate_out(Duration::ZERO);
    harness.view.advance(ms(120));
    harness.view.cancel_animation();

    assert_eq!(
        harness.take_events(),
        vec![PatternEvent::DisappearStart, PatternEvent::DisappearEnd]
    );
    harness.assert_canonical();
    assert!(harness.view.is_enabled());
}

#[test]
fn test_pointer_far_outside_surface() {
    let mut harness = Harness::laid_out(PatternConfig::default());
    for position in [
        Point::new(-10_000.0, -10_000.0),
        Point::new(1e15, 3.0),
        Point::new(f64::MIN, f64::MAX),
    ] {
        assert!(!harness.view.pointer_down(position));
        harness.view.pointer_move(position);
    }

    assert!(harness.view.pointer_down(harness.center(0)));
    harness.view.pointer_move(Point::new(-10_000.0, 5e9));
    harness.view.pointer_up();
    harness.view.advance(ms(300));
    assert_eq!(harness.take_events(), vec![PatternEvent::PatternAbandoned]);
}
