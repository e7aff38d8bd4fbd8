//! Replays a [`Script`] against a pattern view, frame by frame.
//!
//! The session plays the part of a sample host application: it listens to
//! the widget's events, records them, renders a frame whenever the view asks
//! for one, and (unless disabled) reacts the way the sample app does.

use crate::script::{Script, ScriptError, ScriptResult, Step};
use connectpattern_core::{ConnectPatternView, PatternEvent, PointerEvent, Visibility};
use connectpattern_render::{DrawCommand, PatternStyle, RecordingRenderer, RenderContext, Renderer};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

/// Clock step between rendered frames.
pub const FRAME: Duration = Duration::from_millis(16);

/// Pattern length that sends the widget out.
pub const EXIT_PATTERN_LEN: usize = 3;

/// Pause before the widget comes back after disappearing.
pub const REAPPEAR_DELAY: Duration = Duration::from_millis(1000);

/// One observed widget event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    /// Frame time at which the host saw the event.
    pub at_ms: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Vec<usize>>,
}

impl TranscriptEntry {
    fn new(at: Duration, event: &PatternEvent) -> Self {
        let pattern = match event {
            PatternEvent::PatternEntered(pattern) => Some(pattern.clone()),
            _ => None,
        };
        Self {
            at_ms: at.as_millis() as u64,
            event: event.name(),
            pattern,
        }
    }
}

/// Outcome of a replayed script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub events: Vec<TranscriptEntry>,
    pub frames_rendered: usize,
    pub final_visibility: Visibility,
    pub elapsed_ms: u64,
}

/// A view plus the host around it.
pub struct Session {
    view: ConnectPatternView,
    style: PatternStyle,
    renderer: RecordingRenderer,
    inbox: Rc<RefCell<VecDeque<PatternEvent>>>,
    sample_host: bool,
    transcript: Vec<TranscriptEntry>,
    frames_rendered: usize,
    /// Clock time at which the hidden widget is brought back.
    reappear_at: Option<Duration>,
}

impl Session {
    /// Build the view described by `script` and lay it out.
    pub fn new(script: &Script) -> ScriptResult<Self> {
        let style = PatternStyle::from_config(&script.config)?;
        let mut view = ConnectPatternView::new(script.config.clone());

        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        let sink = inbox.clone();
        view.set_listener(move |event: &PatternEvent| sink.borrow_mut().push_back(event.clone()));
        view.layout_surface_changed(script.surface);

        Ok(Self {
            view,
            style,
            renderer: RecordingRenderer::new(),
            inbox,
            sample_host: script.sample_host,
            transcript: Vec::new(),
            frames_rendered: 0,
            reappear_at: None,
        })
    }

    /// Replay every step of `script` in a fresh session.
    pub fn run(script: &Script) -> ScriptResult<SessionReport> {
        let mut session = Self::new(script)?;
        for (index, step) in script.steps.iter().enumerate() {
            session.apply(index, step)?;
        }
        Ok(session.report())
    }

    pub fn apply(&mut self, index: usize, step: &Step) -> ScriptResult<()> {
        log::debug!("Step {}: {:?}", index, step);
        match step {
            Step::Pointer { event } => {
                self.view.handle_pointer_event(*event);
                self.frame();
            }
            Step::Trace { targets } => self.trace(index, targets)?,
            Step::Wait { ms } => self.wait(Duration::from_millis(*ms)),
            Step::AnimateIn { delay_ms } => {
                self.view.animate_in(Duration::from_millis(*delay_ms));
                self.frame();
            }
            Step::AnimateOut { delay_ms } => {
                self.view.animate_out(Duration::from_millis(*delay_ms));
                self.frame();
            }
            Step::CancelAnimation => {
                self.view.cancel_animation();
                self.frame();
            }
            Step::SetEnabled { enabled } => self.view.set_enabled(*enabled),
            Step::Resize { surface } => {
                self.view.layout_surface_changed(*surface);
                self.frame();
            }
        }
        self.react();
        Ok(())
    }

    /// Press on the first target, pass over the others, release; one frame
    /// between each pointer event.
    fn trace(&mut self, step: usize, targets: &[usize]) -> ScriptResult<()> {
        let centers = targets
            .iter()
            .map(|&index| {
                self.view
                    .target(index)
                    .map(|target| target.center())
                    .ok_or(ScriptError::UnknownTarget { step, index })
            })
            .collect::<ScriptResult<Vec<_>>>()?;
        let Some((&first, rest)) = centers.split_first() else {
            return Err(ScriptError::EmptyTrace { step });
        };

        self.view
            .handle_pointer_event(PointerEvent::Down { position: first });
        self.tick();
        for &position in rest {
            self.view.handle_pointer_event(PointerEvent::Move { position });
            self.tick();
        }
        self.view.handle_pointer_event(PointerEvent::Up);
        self.tick();
        Ok(())
    }

    /// Run the clock for `duration`, one frame at a time. A pending reappear
    /// cuts the frame short so it runs exactly when due.
    fn wait(&mut self, duration: Duration) {
        let end = self.view.now() + duration;
        loop {
            self.run_due_reappear();
            let now = self.view.now();
            if now >= end {
                break;
            }
            let mut next = (now + FRAME).min(end);
            if let Some(at) = self.reappear_at {
                next = next.min(at);
            }
            self.view.advance_to(next);
            self.frame();
            self.react();
        }
    }

    fn run_due_reappear(&mut self) {
        match self.reappear_at {
            Some(at) if at <= self.view.now() => {
                self.reappear_at = None;
                log::debug!("Bringing the pattern back");
                self.view.animate_in(Duration::ZERO);
                self.frame();
                self.react();
            }
            _ => {}
        }
    }

    fn tick(&mut self) {
        self.wait(FRAME);
    }

    /// Render if the view asked for it.
    fn frame(&mut self) {
        if !self.view.take_redraw_request() {
            return;
        }
        self.renderer
            .build_scene(&RenderContext::new(&self.view, &self.style));
        self.frames_rendered += 1;
    }

    /// Record queued events and run the sample host reactions.
    fn react(&mut self) {
        loop {
            let Some(event) = self.inbox.borrow_mut().pop_front() else {
                break;
            };
            let entry = TranscriptEntry::new(self.view.now(), &event);
            log::info!("{} ms: {}", entry.at_ms, event.name());
            self.transcript.push(entry);

            if !self.sample_host {
                continue;
            }
            match event {
                PatternEvent::PatternEntered(pattern) if pattern.len() == EXIT_PATTERN_LEN => {
                    self.view.animate_out(Duration::ZERO);
                }
                PatternEvent::DisappearEnd => {
                    self.view.set_visibility(Visibility::Gone);
                    self.reappear_at = Some(self.view.now() + REAPPEAR_DELAY);
                }
                _ => {}
            }
        }
    }

    pub fn view(&self) -> &ConnectPatternView {
        &self.view
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Commands of the most recently rendered frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        self.renderer.commands()
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            events: self.transcript.clone(),
            frames_rendered: self.frames_rendered,
            final_visibility: self.view.visibility(),
            elapsed_ms: self.view.now().as_millis() as u64,
        }
    }
}
