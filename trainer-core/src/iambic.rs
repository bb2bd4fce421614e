//! Iambic paddle (horizontal) trainer.
//!
//! Left/right paddle edges drive an automatic element sender with
//! squeeze alternation. Mode A stops as soon as the paddles are
//! released; Mode B sends one extra alternating element if a squeeze
//! was seen during the current element. Element timing runs through
//! the same deadline slots as the straight-key decoder, so the whole
//! machine is deterministic under `tick(now)`.

use crate::audio::{AudioGenerator, AudioSettings};
use crate::buffer::MorseBuffer;
use crate::clock::Instant;
use crate::codec;
use crate::error::TimingError;
use crate::events::{EventQueue, TrainerEvent};
use crate::stats::{self, SpacingKind, SpacingStatistics, SpacingStats};
use crate::timers::{TimerSet, TimerSlot};
use crate::timing::MorseTimings;
use crate::types::{Element, IambicMode, Paddle, TrainerConfig};

/// Squeeze probe fires this long before the element's tone ends.
const IAMBIC_CHECK_LEAD_MS: f64 = 5.0;

/// What the sender is doing. Illegal flag combinations (sending two
/// elements, queueing while idle) are unrepresentable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending {
        element: Element,
        /// Pre-queued next element (squeeze memory)
        queued: Option<Element>,
    },
}

/// Physical paddle state plus squeeze memory.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct SqueezeTracker {
    left_down: bool,
    right_down: bool,
    /// A squeeze occurred and has not yet been consumed by a memory
    /// element (Mode B)
    saw_squeeze: bool,
}

impl SqueezeTracker {
    fn set(&mut self, paddle: Paddle, down: bool) {
        match paddle {
            Paddle::Left => self.left_down = down,
            Paddle::Right => self.right_down = down,
        }
    }

    fn squeezing(&self) -> bool {
        self.left_down && self.right_down
    }

    fn any_down(&self) -> bool {
        self.left_down || self.right_down
    }
}

/// One paddle edge, kept for diagnostics only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaddleInputRecord {
    pub paddle: Paddle,
    pub pressed: bool,
    pub at: Instant,
}

/// One sent element with its tone start/end times.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ElementSpan {
    pub element: Element,
    pub start: Instant,
    pub end: Instant,
}

/// One interval during which both paddles were held.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SqueezeInterval {
    pub start: Instant,
    /// `None` while the squeeze is still held
    pub end: Option<Instant>,
}

/// Timing-diagram trace for one word. Derived data for visualization;
/// never consulted for control decisions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordTimingData {
    pub paddle_inputs: Vec<PaddleInputRecord>,
    pub elements: Vec<ElementSpan>,
    pub squeeze_intervals: Vec<SqueezeInterval>,
}

/// The iambic keyer trainer.
pub struct IambicKeyTrainer {
    config: TrainerConfig,
    timings: MorseTimings,
    buffer: MorseBuffer,
    timers: TimerSet,
    events: EventQueue,
    audio: AudioGenerator,
    spacing_stats: SpacingStats,
    send: SendState,
    tracker: SqueezeTracker,
    last_sent: Option<Element>,
    /// Scheduled end of the current element's tone
    current_tone_end: Option<Instant>,
    /// Where operator-timed silence started (element end incl. the
    /// machine's trailing gap); armed together with the gap timers
    gap_anchor: Option<Instant>,
    char_boundary_fired: bool,
    word_boundary_fired: bool,
    trace: WordTimingData,
    last_word: Option<WordTimingData>,
}

impl IambicKeyTrainer {
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
            spacing_stats: SpacingStats::default(),
            send: SendState::Idle,
            tracker: SqueezeTracker::default(),
            last_sent: None,
            current_tone_end: None,
            gap_anchor: None,
            char_boundary_fired: false,
            word_boundary_fired: false,
            trace: WordTimingData::default(),
            last_word: None,
        })
    }

    /// Paddle-down edge.
    pub fn paddle_press(&mut self, paddle: Paddle, now: Instant) {
        self.trace.paddle_inputs.push(PaddleInputRecord {
            paddle,
            pressed: true,
            at: now,
        });

        let was_squeezing = self.tracker.squeezing();
        self.tracker.set(paddle, true);
        if !was_squeezing && self.tracker.squeezing() {
            self.tracker.saw_squeeze = true;
            self.trace.squeeze_intervals.push(SqueezeInterval {
                start: now,
                end: None,
            });
            self.events
                .push(TrainerEvent::SqueezeChange { squeezing: true });
        }

        let element = self.config.paddle_layout.element_for(paddle);
        match &mut self.send {
            SendState::Idle => {
                self.evaluate_spacing(now);
                self.start_element(element, now);
            }
            SendState::Sending {
                element: current,
                queued,
            } => {
                // Opposite-paddle press mid-element: Mode B pre-queues
                // the memory element. Mode A relies on the squeeze
                // probe while the paddles stay held.
                if element == current.opposite()
                    && self.config.iambic_mode == IambicMode::B
                    && queued.is_none()
                {
                    *queued = Some(element);
                    self.tracker.saw_squeeze = true;
                }
            }
        }
    }

    /// Paddle-up edge.
    pub fn paddle_release(&mut self, paddle: Paddle, now: Instant) {
        self.trace.paddle_inputs.push(PaddleInputRecord {
            paddle,
            pressed: false,
            at: now,
        });

        let was_squeezing = self.tracker.squeezing();
        self.tracker.set(paddle, false);
        if was_squeezing && !self.tracker.squeezing() {
            if let Some(interval) = self
                .trace
                .squeeze_intervals
                .iter_mut()
                .rev()
                .find(|i| i.end.is_none())
            {
                interval.end = Some(now);
            }
            self.events
                .push(TrainerEvent::SqueezeChange { squeezing: false });
        }
    }

    /// Fire any due timers. Call a few times per dot for smooth keying.
    pub fn tick(&mut self, now: Instant) {
        for slot in self.timers.poll(now) {
            match slot {
                TimerSlot::IambicCheck => self.on_iambic_check(),
                TimerSlot::ElementEnd => self.on_element_end(),
                TimerSlot::CharGap => self.on_char_gap(),
                TimerSlot::WordGap => self.on_word_gap(),
            }
        }
    }

    /// Begin transmitting `element` at `now`. Guarded so only one
    /// element sends at a time.
    fn start_element(&mut self, element: Element, now: Instant) {
        if matches!(self.send, SendState::Sending { .. }) {
            return;
        }

        // A fresh element invalidates any pending gap decision.
        self.timers.clear(TimerSlot::CharGap);
        self.timers.clear(TimerSlot::WordGap);
        self.gap_anchor = None;

        let duration = element.duration_ms(&self.timings);
        let tone_end = now.add_millis(duration);

        self.send = SendState::Sending {
            element,
            queued: None,
        };
        self.last_sent = Some(element);
        self.current_tone_end = Some(tone_end);

        self.events.push(TrainerEvent::ElementStart {
            element,
            duration_ms: duration,
        });
        self.audio.schedule_tone(0.0, duration);

        self.buffer.add_element(element);
        self.push_sequence_update();
        self.trace.elements.push(ElementSpan {
            element,
            start: now,
            end: tone_end,
        });

        self.timers.set(
            TimerSlot::IambicCheck,
            now.add_millis((duration - IAMBIC_CHECK_LEAD_MS).max(0.0)),
        );
        self.timers.set(
            TimerSlot::ElementEnd,
            now.add_millis(duration + self.timings.element_gap),
        );
    }

    /// Squeeze probe, shortly before the current tone ends.
    fn on_iambic_check(&mut self) {
        let SendState::Sending { element, queued } = &mut self.send else {
            return;
        };
        if queued.is_some() {
            return;
        }
        if self.tracker.squeezing() {
            *queued = Some(element.opposite());
            self.tracker.saw_squeeze = true;
        } else if self.config.iambic_mode == IambicMode::B && self.tracker.saw_squeeze {
            // Mode B memory: the squeeze already ended, the extra
            // element still goes out.
            *queued = Some(element.opposite());
        }
    }

    /// Element plus trailing gap finished.
    fn on_element_end(&mut self) {
        let SendState::Sending { element, queued } =
            std::mem::replace(&mut self.send, SendState::Idle)
        else {
            return;
        };
        self.events.push(TrainerEvent::ElementEnd { element });

        // Operator-timed silence starts here (tone end + machine gap).
        let gap_start = self
            .current_tone_end
            .take()
            .map(|t| t.add_millis(self.timings.element_gap));

        if let Some(next) = queued {
            // One memory element per squeeze.
            self.tracker.saw_squeeze = false;
            if let Some(at) = gap_start {
                self.start_element(next, at);
            }
        } else if let Some(held) = self.held_element(element) {
            if let Some(at) = gap_start {
                self.start_element(held, at);
            }
        } else {
            self.tracker.saw_squeeze = false;
            if let Some(anchor) = gap_start {
                self.arm_gap_timers(anchor);
            }
        }
    }

    /// Element to continue with while a paddle stays held.
    fn held_element(&self, just_sent: Element) -> Option<Element> {
        match (self.tracker.left_down, self.tracker.right_down) {
            (true, true) => Some(just_sent.opposite()),
            (true, false) => Some(self.config.paddle_layout.element_for(Paddle::Left)),
            (false, true) => Some(self.config.paddle_layout.element_for(Paddle::Right)),
            (false, false) => None,
        }
    }

    fn arm_gap_timers(&mut self, anchor: Instant) {
        self.gap_anchor = Some(anchor);
        self.char_boundary_fired = false;
        self.word_boundary_fired = false;
        self.timers
            .set(TimerSlot::CharGap, anchor.add_millis(self.timings.char_gap));
        self.timers
            .set(TimerSlot::WordGap, anchor.add_millis(self.timings.word_gap));
    }

    fn on_char_gap(&mut self) {
        self.char_boundary_fired = true;
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

    fn on_word_gap(&mut self) {
        self.word_boundary_fired = true;
        if self.buffer.is_empty() {
            return;
        }
        self.buffer.add_word_separator();
        self.events.push(TrainerEvent::WordSeparator);
        self.push_buffer_update();
        // The word is complete; retain its timing diagram.
        self.last_word = Some(std::mem::take(&mut self.trace));
    }

    /// Score the operator-timed silence that a fresh press just ended.
    /// Only gaps that produced a character or word boundary count; the
    /// machine, not the operator, times intra-character gaps.
    fn evaluate_spacing(&mut self, now: Instant) {
        let Some(anchor) = self.gap_anchor.take() else {
            return;
        };
        let kind = if self.word_boundary_fired {
            Some((SpacingKind::Word, self.timings.word_gap))
        } else if self.char_boundary_fired {
            Some((SpacingKind::Character, self.timings.char_gap))
        } else {
            None
        };
        self.char_boundary_fired = false;
        self.word_boundary_fired = false;

        if let Some((kind, expected)) = kind {
            let actual = now.duration_since(anchor) as f64;
            let evaluation = stats::evaluate_spacing(kind, expected, actual);
            self.spacing_stats.record(&evaluation);
            self.events
                .push(TrainerEvent::SpacingEvaluated { evaluation });
        }
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

    pub fn current_state(&self) -> SendState {
        self.send
    }

    pub fn is_squeezing(&self) -> bool {
        self.tracker.squeezing()
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

    /// Character-gap and word-gap accuracy, tracked independently.
    /// Element timing is machine-generated here, so spacing is the only
    /// operator skill this trainer scores.
    pub fn statistics_by_spacing_type(&self) -> SpacingStatistics {
        self.spacing_stats.by_kind()
    }

    /// Timing diagram of the most recently completed word.
    pub fn last_word_timing_data(&self) -> Option<&WordTimingData> {
        self.last_word.as_ref()
    }

    /// Earliest pending deadline, for hosts that want to sleep
    /// instead of polling blindly.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Access the generator, e.g. for playback or WAV export.
    pub fn audio(&mut self) -> &mut AudioGenerator {
        &mut self.audio
    }

    /// Reset the buffer, cancel timers, and stop the element cycle.
    /// Physical paddle state is untouched. Idempotent.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.timers.clear_all();
        self.send = SendState::Idle;
        self.current_tone_end = None;
        self.gap_anchor = None;
        self.char_boundary_fired = false;
        self.word_boundary_fired = false;
        self.trace = WordTimingData::default();
    }

    /// Forget all recorded evaluations.
    pub fn reset_statistics(&mut self) {
        self.spacing_stats.clear();
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
        self.gap_anchor = None;
        Ok(())
    }

    /// Release audio resources. The keyer keeps working afterwards.
    pub fn destroy(&mut self) {
        self.audio.close();
    }
}
