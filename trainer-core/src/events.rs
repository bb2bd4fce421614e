//! Tagged trainer events, drained by the host instead of a callback bag.

use std::collections::VecDeque;

use crate::stats::{SpacingEvaluation, TimingEvaluation};
use crate::types::Element;

/// Everything a trainer reports back to its host. Hosts drain these with
/// `poll_event()` / `drain_events()` after feeding input or ticking.
#[derive(Clone, Debug, PartialEq)]
pub enum TrainerEvent {
    /// Straight key went down
    KeyPress,
    /// Straight key came up; `element` is the decoded classification
    KeyRelease { element: Element },
    /// An element transmission started (drives tone scheduling)
    ElementStart { element: Element, duration_ms: f64 },
    /// An element transmission (plus trailing gap) finished
    ElementEnd { element: Element },
    /// The uncommitted sequence changed
    SequenceUpdate { sequence: String },
    /// The committed buffer changed
    BufferUpdate { buffer: String, decoded: String },
    /// A character-gap of silence committed one Morse group
    Character { morse: String, decoded: char },
    /// A word-gap of silence appended the word mark
    WordSeparator,
    /// Both-paddles-held state changed
    SqueezeChange { squeezing: bool },
    /// An element was scored against its ideal duration
    TimingEvaluated { evaluation: TimingEvaluation },
    /// An operator-timed gap was scored against its ideal duration
    SpacingEvaluated { evaluation: SpacingEvaluation },
}

/// FIFO of pending events inside a trainer.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventQueue {
    queue: VecDeque<TrainerEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: TrainerEvent) {
        self.queue.push_back(event);
    }

    pub fn pop(&mut self) -> Option<TrainerEvent> {
        self.queue.pop_front()
    }

    pub fn drain(&mut self) -> Vec<TrainerEvent> {
        self.queue.drain(..).collect()
    }
}
