//! Events reported to the host.

use std::fmt;

/// Everything the widget tells its host about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternEvent {
    /// A gesture connected at least two targets, in this order.
    PatternEntered(Vec<usize>),
    /// A gesture ended with fewer than two targets.
    PatternAbandoned,
    AppearStart,
    AppearEnd,
    DisappearStart,
    DisappearEnd,
}

impl PatternEvent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            PatternEvent::PatternEntered(_) => "pattern-entered",
            PatternEvent::PatternAbandoned => "pattern-abandoned",
            PatternEvent::AppearStart => "appear-start",
            PatternEvent::AppearEnd => "appear-end",
            PatternEvent::DisappearStart => "disappear-start",
            PatternEvent::DisappearEnd => "disappear-end",
        }
    }
}

/// Callback receiving widget events.
pub type PatternListener = Box<dyn FnMut(&PatternEvent)>;

/// Synchronous dispatch to at most one listener.
#[derive(Default)]
pub struct EventDispatcher {
    listener: Option<PatternListener>,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listener.
    pub fn set_listener(&mut self, listener: impl FnMut(&PatternEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Deliver an event. Without a listener the event is only logged.
    pub fn emit(&mut self, event: PatternEvent) {
        match &event {
            PatternEvent::PatternEntered(sequence) => {
                log::info!("Pattern entered: {:?}", sequence);
            }
            other => log::info!("Pattern event: {}", other.name()),
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_without_listener() {
        let mut dispatcher = EventDispatcher::new();
        assert!(!dispatcher.has_listener());
        dispatcher.emit(PatternEvent::AppearStart);
    }

    #[test]
    fn test_emit_reaches_listener() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();

        let mut dispatcher = EventDispatcher::new();
        dispatcher.set_listener(move |event| sink.borrow_mut().push(event.clone()));
        dispatcher.emit(PatternEvent::PatternEntered(vec![0, 4, 8]));
        dispatcher.emit(PatternEvent::PatternAbandoned);

        assert_eq!(
            *received.borrow(),
            vec![
                PatternEvent::PatternEntered(vec![0, 4, 8]),
                PatternEvent::PatternAbandoned
            ]
        );
    }

    #[test]
    fn test_clear_listener() {
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();

        let mut dispatcher = EventDispatcher::new();
        dispatcher.set_listener(move |_| *sink.borrow_mut() += 1);
        dispatcher.emit(PatternEvent::AppearEnd);
        dispatcher.clear_listener();
        dispatcher.emit(PatternEvent::AppearEnd);

        assert_eq!(*count.borrow(), 1);
    }
}
