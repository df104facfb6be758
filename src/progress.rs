use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Step(String),
    Match { current: usize, total: usize },
    /// Seconds left before the client retries a rate-limited request.
    RateLimited { seconds: u64 },
}

impl ProgressEvent {
    pub fn step(message: impl Into<String>) -> Self {
        ProgressEvent::Step(message.into())
    }

    pub fn message(&self) -> String {
        match self {
            ProgressEvent::Step(message) => message.clone(),
            ProgressEvent::Match { current, total } => {
                format!("Analyzing matches ({}/{})...", current, total)
            }
            ProgressEvent::RateLimited { seconds } => {
                format!("Rate limited. Waiting {}s...", seconds)
            }
        }
    }
}

pub trait ProgressSink {
    fn report(&self, event: ProgressEvent);
}

/// Discards every event.
pub struct Silent;

impl ProgressSink for Silent {
    fn report(&self, _event: ProgressEvent) {}
}

/// Keeps every event in order; used by tests and by callers that replay.
#[derive(Default)]
pub struct Recorder {
    events: RefCell<Vec<ProgressEvent>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.borrow().clone()
    }
}

impl ProgressSink for Recorder {
    fn report(&self, event: ProgressEvent) {
        self.events.borrow_mut().push(event);
    }
}
