//! Straight-key (vertical) trainer: decodes timed press/release pairs.

use crate::audio::{AudioGenerator, AudioSettings};
use crate::buffer::MorseBuffer;
use crate::clock::Instant;
use crate::codec;
use crate::error::TimingError;
use crate::events::{EventQueue, TrainerEvent};
use crate::stats::{self, ElementStatistics, ElementStats, TimingStatistics};
use crate::timers::{TimerSet, TimerSlot};
use crate::timing::MorseTimings;
use crate::types::{Element, TrainerConfig};

/// Decodes straight-key press/release events into dots and dashes,
/// assembles characters and words from silence gaps, and scores each
/// element's timing.
///
/// Drive it with `key_press`/`key_release` plus a periodic `tick`, then
/// drain [`TrainerEvent`]s.
pub struct StraightKeyTrainer {
    config: TrainerConfig,
    timings: MorseTimings,
    buffer: MorseBuffer,
    timers: TimerSet,
    events: EventQueue,
    audio: AudioGenerator,
    stats: ElementStats,
    pressed: bool,
    key_down_at: Option<Instant>,
}

impl StraightKeyTrainer {
    /// Build a trainer. Slider-driven config values are clamped; a
    /// non-positive WPM is rejected.
    pub fn new(config: TrainerConfig) -> Result<Self, TimingError> {
        let config = config.clamped();
        let timings = config.timings()?;
        let audio = AudioGenerator::new(
            AudioSettings {
                frequency: config.frequency,
                volume: config.volume,
                live_enabled: config.audio_enabled,
                ..AudioSettings::default()
            },
            timings,
        );
        Ok(Self {
            config,
            timings,
            buffer: MorseBuffer::new(),
            timers: TimerSet::new(),
            events: EventQueue::default(),
            audio,
            stats: ElementStats::default(),
            pressed: false,
            key_down_at: None,
        })
    }

    /// Key-down edge. Duplicate presses (key bounce) are no-ops.
    pub fn key_press(&mut self, now: Instant) {
        if self.pressed {
            return;
        }
        self.pressed = true;
        self.key_down_at = Some(now);

        // An in-progress press invalidates any pending "character
        // finished" decision.
        self.timers.clear(TimerSlot::CharGap);
        self.timers.clear(TimerSlot::WordGap);

        self.events.push(TrainerEvent::KeyPress);
        self.audio.start_continuous_tone();
    }

    /// Key-up edge. Releases without a matching press are no-ops.
    pub fn key_release(&mut self, now: Instant) {
        if !self.pressed {
            return;
        }
        self.pressed = false;
        self.audio.stop_continuous_tone();

        let Some(down_at) = self.key_down_at.take() else {
            return;
        };
        let duration = now.duration_since(down_at) as f64;

        // Threshold is 2x the ideal dot, biased toward dot so slightly
        // long dots still classify correctly.
        let element = if duration < self.timings.dot * 2.0 {
            Element::Dit
        } else {
            Element::Dah
        };

        self.buffer.add_element(element);
        self.events.push(TrainerEvent::KeyRelease { element });
        self.push_sequence_update();

        let evaluation =
            stats::evaluate_element(element, element.duration_ms(&self.timings), duration);
        self.stats.record(&evaluation);
        self.events.push(TrainerEvent::TimingEvaluated { evaluation });

        self.timers
            .set(TimerSlot::CharGap, now.add_millis(self.timings.char_gap));
        self.timers
            .set(TimerSlot::WordGap, now.add_millis(self.timings.word_gap));
    }

    /// Fire any due gap timers. Call periodically (a few times per dot).
    pub fn tick(&mut self, now: Instant) {
        for slot in self.timers.poll(now) {
            match slot {
                TimerSlot::CharGap => self.commit_character(),
                TimerSlot::WordGap => self.commit_word(),
                _ => {}
            }
        }
    }

    fn commit_character(&mut self) {
        if let Some(group) = self.buffer.commit_sequence() {
            let decoded = codec::decode_group(&group).unwrap_or('?');
            self.events.push(TrainerEvent::Character {
                morse: group,
                decoded,
            });
            self.push_sequence_update();
            self.push_buffer_update();
        }
    }

    fn commit_word(&mut self) {
        self.commit_character();
        if self.buffer.is_empty() {
            return;
        }
        self.buffer.add_word_separator();
        self.events.push(TrainerEvent::WordSeparator);
        self.push_buffer_update();
    }

    fn push_sequence_update(&mut self) {
        self.events.push(TrainerEvent::SequenceUpdate {
            sequence: self.buffer.sequence().to_string(),
        });
    }

    fn push_buffer_update(&mut self) {
        self.events.push(TrainerEvent::BufferUpdate {
            buffer: self.buffer.buffer().to_string(),
            decoded: self.buffer.decoded(),
        });
    }

    /// Next pending event, if any.
    pub fn poll_event(&mut self) -> Option<TrainerEvent> {
        self.events.pop()
    }

    /// Take every pending event at once.
    pub fn drain_events(&mut self) -> Vec<TrainerEvent> {
        self.events.drain()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn sequence(&self) -> &str {
        self.buffer.sequence()
    }

    pub fn buffer(&self) -> &str {
        self.buffer.buffer()
    }

    pub fn decoded(&self) -> String {
        self.buffer.decoded()
    }

    pub fn timings(&self) -> &MorseTimings {
        &self.timings
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn statistics(&self) -> TimingStatistics {
        self.stats.overall()
    }

    pub fn statistics_by_element(&self) -> ElementStatistics {
        self.stats.by_element()
    }

    /// Earliest pending gap deadline, for hosts that want to sleep
    /// instead of polling blindly.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Access the generator, e.g. for playback or WAV export.
    pub fn audio(&mut self) -> &mut AudioGenerator {
        &mut self.audio
    }

    /// Reset the buffer and cancel pending timers. Pressed state and
    /// the timing model are untouched. Idempotent.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.timers.clear_all();
    }

    /// Forget all recorded evaluations.
    pub fn reset_statistics(&mut self) {
        self.stats.clear();
    }

    /// Change speed: recompute the timing model wholesale and drop any
    /// pending gap decisions made under the old speed.
    pub fn set_wpm(&mut self, wpm: f64) -> Result<(), TimingError> {
        let mut config = self.config;
        config.wpm = wpm;
        self.set_config(config)
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: TrainerConfig) -> Result<(), TimingError> {
        let config = config.clamped();
        let timings = config.timings()?;
        self.config = config;
        self.timings = timings;
        self.audio.set_timings(timings);
        self.audio.set_frequency(config.frequency);
        self.audio.set_volume(config.volume);
        self.timers.clear(TimerSlot::CharGap);
        self.timers.clear(TimerSlot::WordGap);
        Ok(())
    }

    /// Release audio resources. The decoder keeps working afterwards.
    pub fn destroy(&mut self) {
        self.audio.close();
    }
}
