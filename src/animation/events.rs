use std::time::Duration;

use crate::style::selector::StyleDescriptor;

/// Coarse state of one render invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Clearing,
    DrawingCharacters { index: usize },
    Flourishing { step: u32 },
    Done,
    Cancelled,
}

/// Signals emitted to the UI layer while a signature renders.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderEvent {
    /// Input was empty after trimming; nothing was drawn.
    Rejected,
    Started {
        text: String,
        style: StyleDescriptor,
        /// Scheduled length of the whole animation.
        total: Duration,
    },
    PhaseChanged {
        phase: Phase,
        at: Duration,
    },
    CharacterRevealed {
        index: usize,
        ch: char,
        x: f64,
        at: Duration,
    },
    FlourishStarted {
        /// Width used to center the text.
        layout_width: f64,
        /// Width re-measured with the active font when the flourish began.
        measured_width: f64,
        at: Duration,
    },
    /// Emitted after every drawing step.
    Progress {
        elapsed: Duration,
        total: Duration,
    },
    Completed {
        elapsed: Duration,
        characters: usize,
    },
    Cancelled {
        elapsed: Duration,
    },
}

/// Receiver of [`RenderEvent`]s.
pub trait RenderObserver {
    fn on_event(&mut self, event: &RenderEvent);
}

/// Observer that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RenderObserver for NoopObserver {
    fn on_event(&mut self, _event: &RenderEvent) {}
}

/// Collects events in order.
impl RenderObserver for Vec<RenderEvent> {
    fn on_event(&mut self, event: &RenderEvent) {
        self.push(event.clone());
    }
}

/// Adapter turning a closure into an observer.
pub struct FnObserver<F>(pub F);

impl<F: FnMut(&RenderEvent)> RenderObserver for FnObserver<F> {
    fn on_event(&mut self, event: &RenderEvent) {
        (self.0)(event)
    }
}
