//! Scripted-timeline helpers for driving trainers deterministically.
//!
//! A script is a list of timestamped input edges. Running it walks a
//! millisecond clock from zero, applying each edge at its time and
//! ticking the trainer every step, which is exactly how a real host
//! drives the engine, minus the waiting.

use trainer_core::{Element, IambicKeyTrainer, Instant, Paddle, StraightKeyTrainer, TrainerEvent};

#[cfg(test)]
mod audio_tests;
#[cfg(test)]
mod codec_props;
#[cfg(test)]
mod iambic_tests;
#[cfg(test)]
mod straight_tests;

pub fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

enum PaddleAction {
    Press(Paddle),
    Release(Paddle),
}

/// Timed paddle edges for an [`IambicKeyTrainer`].
#[derive(Default)]
pub struct PaddleScript {
    steps: Vec<(u64, PaddleAction)>,
}

impl PaddleScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(mut self, ms: u64, paddle: Paddle) -> Self {
        self.steps.push((ms, PaddleAction::Press(paddle)));
        self
    }

    pub fn release(mut self, ms: u64, paddle: Paddle) -> Self {
        self.steps.push((ms, PaddleAction::Release(paddle)));
        self
    }

    /// Tap a paddle: press at `ms`, release `hold_ms` later.
    pub fn tap(self, ms: u64, paddle: Paddle, hold_ms: u64) -> Self {
        self.press(ms, paddle).release(ms + hold_ms, paddle)
    }

    /// Apply the script against a 1 ms tick loop running to `until_ms`.
    pub fn run(mut self, trainer: &mut IambicKeyTrainer, until_ms: u64) {
        self.steps.sort_by_key(|(ms, _)| *ms);
        let mut idx = 0;
        for now in 0..=until_ms {
            while idx < self.steps.len() && self.steps[idx].0 == now {
                match self.steps[idx].1 {
                    PaddleAction::Press(p) => trainer.paddle_press(p, at(now)),
                    PaddleAction::Release(p) => trainer.paddle_release(p, at(now)),
                }
                idx += 1;
            }
            trainer.tick(at(now));
        }
    }
}

/// Timed key edges for a [`StraightKeyTrainer`].
#[derive(Default)]
pub struct KeyScript {
    // (ms, is_press)
    steps: Vec<(u64, bool)>,
}

impl KeyScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// One press/release pair: down at `ms`, up `hold_ms` later.
    pub fn tap(mut self, ms: u64, hold_ms: u64) -> Self {
        self.steps.push((ms, true));
        self.steps.push((ms + hold_ms, false));
        self
    }

    pub fn run(mut self, trainer: &mut StraightKeyTrainer, until_ms: u64) {
        self.steps.sort_by_key(|(ms, _)| *ms);
        let mut idx = 0;
        for now in 0..=until_ms {
            while idx < self.steps.len() && self.steps[idx].0 == now {
                if self.steps[idx].1 {
                    trainer.key_press(at(now));
                } else {
                    trainer.key_release(at(now));
                }
                idx += 1;
            }
            trainer.tick(at(now));
        }
    }
}

/// Elements whose transmission started, in order.
pub fn started_elements(events: &[TrainerEvent]) -> Vec<Element> {
    events
        .iter()
        .filter_map(|e| match e {
            TrainerEvent::ElementStart { element, .. } => Some(*element),
            _ => None,
        })
        .collect()
}

/// Decoded characters emitted so far, in order.
pub fn decoded_characters(events: &[TrainerEvent]) -> String {
    events
        .iter()
        .filter_map(|e| match e {
            TrainerEvent::Character { decoded, .. } => Some(*decoded),
            _ => None,
        })
        .collect()
}
