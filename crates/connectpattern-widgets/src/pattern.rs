//! The pattern widget: hosts a [`ConnectPatternView`] inside an egui layout.

use connectpattern_core::ConnectPatternView;
use connectpattern_render::{PatternStyle, RenderContext, Renderer};
use egui::{Color32, CornerRadius, Event, PointerButton, Response, Sense, TextureId, Ui, Vec2, vec2};
use std::time::Duration;

use crate::painter::{EguiRenderer, from_pos2, from_rect};
use crate::sizing;

/// Shows a pattern view, forwarding primary-button pointer input and driving
/// its clock from egui's frame time.
///
/// The view is laid out in screen coordinates, so the bottom transition
/// starts and ends at the widget's bottom edge.
pub struct PatternWidget<'a> {
    view: &'a mut ConnectPatternView,
    style: &'a PatternStyle,
    stamp: Option<TextureId>,
    size: Option<Vec2>,
    background: Option<Color32>,
}

impl<'a> PatternWidget<'a> {
    pub fn new(view: &'a mut ConnectPatternView, style: &'a PatternStyle) -> Self {
        Self {
            view,
            style,
            stamp: None,
            size: None,
            background: None,
        }
    }

    /// Fixed widget size. Defaults to a square filling the available width.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    /// Texture for stamp images (see [`crate::load_stamp_texture`]).
    pub fn stamp_texture(mut self, texture: TextureId) -> Self {
        self.stamp = Some(texture);
        self
    }

    /// Fill the widget's rectangle before painting.
    pub fn background(mut self, color: Color32) -> Self {
        self.background = Some(color);
        self
    }

    fn desired_size(&self, ui: &Ui) -> Vec2 {
        if let Some(size) = self.size {
            return size;
        }
        let available = ui.available_width();
        let side = if available.is_finite() && available >= sizing::MIN_SIDE {
            available.min(sizing::DEFAULT_SIDE)
        } else {
            sizing::DEFAULT_SIDE
        };
        vec2(side, side)
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let desired = self.desired_size(ui);
        let (rect, mut response) = ui.allocate_exact_size(desired, Sense::drag());
        let view = self.view;

        let bounds = from_rect(rect);
        if view.surface_bounds() != Some(bounds) {
            view.layout_surface_changed(bounds);
        }

        let now = Duration::from_secs_f64(ui.input(|i| i.time).max(0.0));
        view.advance_to(now);

        forward_pointer_events(ui, view, &response, rect);

        let changed = view.take_redraw_request();
        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            if let Some(color) = self.background {
                painter.rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), color);
            }
            let mut renderer = EguiRenderer::new(&painter).with_stamp(self.stamp);
            renderer.build_scene(&RenderContext::new(view, self.style));
        }

        if let Some(deadline) = view.next_deadline() {
            let now = view.now();
            if deadline <= now {
                ui.ctx().request_repaint();
            } else {
                ui.ctx().request_repaint_after(deadline - now);
            }
        }

        if changed || view.is_tracking() {
            response.mark_changed();
        }
        response
    }
}

/// Feed this frame's primary-button pointer events to the view.
///
/// A press only starts a gesture inside the widget. The release is forwarded
/// only when that press hit a target, matching a platform that stops
/// delivering a gesture the widget declined.
fn forward_pointer_events(
    ui: &Ui,
    view: &mut ConnectPatternView,
    response: &Response,
    rect: egui::Rect,
) {
    let id = response.id;
    let mut captured = ui.data(|d| d.get_temp::<bool>(id)).unwrap_or(false);
    let events = ui.input(|i| i.events.clone());

    for event in events {
        match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                ..
            } => {
                if rect.contains(pos) {
                    captured = view.pointer_down(from_pos2(pos));
                }
            }
            Event::PointerMoved(pos) => {
                if captured {
                    view.pointer_move(from_pos2(pos));
                }
            }
            Event::PointerButton {
                button: PointerButton::Primary,
                pressed: false,
                ..
            } => {
                if captured {
                    view.pointer_up();
                    captured = false;
                }
            }
            Event::PointerGone => {
                if captured {
                    log::debug!("Pointer left the window mid-gesture");
                    view.pointer_cancel();
                    captured = false;
                }
            }
            _ => {}
        }
    }

    ui.data_mut(|d| d.insert_temp(id, captured));
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectpattern_core::{PatternConfig, PatternEvent, Visibility};
    use egui::{Modifiers, Pos2, RawInput};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Host {
        ctx: egui::Context,
        view: ConnectPatternView,
        style: PatternStyle,
        events: Rc<RefCell<Vec<PatternEvent>>>,
        time: f64,
    }

    impl Host {
        fn new(config: PatternConfig) -> Self {
            let events = Rc::new(RefCell::new(Vec::new()));
            let sink = events.clone();
            let style = PatternStyle::plain(&config);
            let mut view = ConnectPatternView::new(config);
            view.set_listener(move |event| sink.borrow_mut().push(event.clone()));
            Self {
                ctx: egui::Context::default(),
                view,
                style,
                events,
                time: 0.0,
            }
        }

        fn frame(&mut self, events: Vec<Event>) -> egui::FullOutput {
            let input = RawInput {
                time: Some(self.time),
                events,
                ..Default::default()
            };
            let view = &mut self.view;
            let style = &self.style;
            self.ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    PatternWidget::new(&mut *view, style)
                        .size(vec2(300.0, 300.0))
                        .show(ui);
                });
            })
        }

        fn wait(&mut self, seconds: f64) {
            self.time += seconds;
            self.frame(Vec::new());
        }

        fn center(&self, index: usize) -> Pos2 {
            let center = self.view.target(index).unwrap().center();
            Pos2::new(center.x as f32, center.y as f32)
        }
    }

    fn press(pos: Pos2) -> Vec<Event> {
        vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                modifiers: Modifiers::NONE,
            },
        ]
    }

    fn release(pos: Pos2) -> Vec<Event> {
        vec![Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Modifiers::NONE,
        }]
    }

    #[test]
    fn test_layout_follows_widget_rect() {
        let mut host = Host::new(PatternConfig::default());
        host.frame(Vec::new());

        let bounds = host.view.surface_bounds().unwrap();
        assert!((bounds.width() - 300.0).abs() < 1e-3);
        assert!((bounds.height() - 300.0).abs() < 1e-3);
        assert!(host.view.is_laid_out());
    }

    #[test]
    fn test_drag_enters_pattern() {
        let mut host = Host::new(PatternConfig::default());
        host.frame(Vec::new());
        let (a, b, c) = (host.center(0), host.center(4), host.center(8));

        host.frame(press(a));
        assert!(host.view.is_tracking());
        host.frame(vec![Event::PointerMoved(b), Event::PointerMoved(c)]);
        assert_eq!(host.view.selection(), &[0, 4, 8]);
        host.frame(release(c));
        assert!(host.events.borrow().is_empty());

        host.wait(0.35);
        assert_eq!(
            *host.events.borrow(),
            vec![PatternEvent::PatternEntered(vec![0, 4, 8])]
        );
    }

    #[test]
    fn test_press_outside_widget_is_ignored() {
        let mut host = Host::new(PatternConfig::default());
        host.frame(Vec::new());
        let bounds = host.view.surface_bounds().unwrap();
        let outside = Pos2::new(bounds.x1 as f32 + 50.0, bounds.y0 as f32 + 10.0);

        host.frame(press(outside));
        host.frame(release(outside));
        host.wait(1.0);
        assert!(!host.view.is_tracking());
        assert!(host.events.borrow().is_empty());
    }

    #[test]
    fn test_declined_press_reports_nothing() {
        let mut host = Host::new(PatternConfig::default());
        host.frame(Vec::new());
        let bounds = host.view.surface_bounds().unwrap();
        // Between the top-left and centre targets
        let gap = Pos2::new(bounds.x0 as f32 + 80.0, bounds.y0 as f32 + 80.0);

        host.frame(press(gap));
        host.frame(release(gap));
        host.wait(1.0);
        assert!(host.events.borrow().is_empty());
    }

    #[test]
    fn test_transition_requests_repaint() {
        let mut host = Host::new(PatternConfig::default());
        host.frame(Vec::new());

        host.view.animate_in(Duration::ZERO);
        let output = host.frame(Vec::new());
        let repaint = output.viewport_output[&egui::ViewportId::ROOT].repaint_delay;
        assert_eq!(repaint, Duration::ZERO);

        host.wait(1.0);
        assert_eq!(host.view.visibility(), Visibility::Visible);
        assert_eq!(
            *host.events.borrow(),
            vec![PatternEvent::AppearStart, PatternEvent::AppearEnd]
        );
    }
}
