//! Sample-clock tone scheduler.
//!
//! One render path serves both the live output callback and the offline
//! WAV renderer, so a downloadable WAV matches live playback exactly.
//! Two tone sources mix here: scheduled spans (discrete dots/dashes with
//! a short linear fade at each edge) and a ramped continuous gate for
//! straight-key keying, where the press duration is unknown in advance.

use super::oscillator::Oscillator;

/// Fade length at span edges and for the continuous gate, in milliseconds.
/// Long enough to avoid clicks, short enough not to soften element edges.
const RAMP_MS: f64 = 1.0;

/// A scheduled tone, in absolute sample positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct ToneSpan {
    start: u64,
    end: u64,
}

/// Schedules and renders tones against a monotonically advancing sample
/// cursor.
#[derive(Clone, Debug)]
pub struct ToneScheduler {
    sample_rate: u32,
    volume: f32,
    osc: Oscillator,
    spans: Vec<ToneSpan>,
    cursor: u64,
    ramp_samples: u32,
    gate: bool,
    gate_level: f32,
    playback_end: Option<u64>,
}

impl ToneScheduler {
    pub fn new(sample_rate: u32, frequency: f64, volume: f64) -> Self {
        Self {
            sample_rate,
            volume: volume.clamp(0.0, 1.0) as f32,
            osc: Oscillator::new(frequency, sample_rate),
            spans: Vec::new(),
            cursor: 0,
            ramp_samples: ((sample_rate as f64 * RAMP_MS / 1000.0) as u32).max(1),
            gate: false,
            gate_level: 0.0,
            playback_end: None,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.osc.set_frequency(frequency);
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0) as f32;
    }

    pub fn ms_to_samples(&self, ms: f64) -> u64 {
        (ms.max(0.0) / 1000.0 * self.sample_rate as f64).round() as u64
    }

    /// Schedule a tone starting `start_offset_ms` after the current
    /// cursor. Offsets are clamped so nothing starts earlier than "now".
    pub fn schedule_span(&mut self, start_offset_ms: f64, duration_ms: f64) {
        let start = self.cursor + self.ms_to_samples(start_offset_ms);
        let end = start + self.ms_to_samples(duration_ms);
        if end <= start {
            return;
        }
        self.spans.push(ToneSpan { start, end });
        self.spans.sort_by_key(|s| s.start);
        self.playback_end = Some(self.playback_end.map_or(end, |e| e.max(end)));
    }

    /// Open or close the continuous-tone gate. Idempotent; the level
    /// ramps toward the target over the fade length.
    pub fn set_gate(&mut self, on: bool) {
        self.gate = on;
    }

    pub fn gate_is_open(&self) -> bool {
        self.gate
    }

    /// Drop all scheduled spans that have not finished playing.
    /// Returns whether an active playback was cut short. Idempotent.
    pub fn cancel_scheduled(&mut self) -> bool {
        let was_playing = self.is_playing();
        self.spans.clear();
        self.playback_end = None;
        was_playing
    }

    /// Whether scheduled playback is still in progress.
    pub fn is_playing(&self) -> bool {
        self.playback_end.is_some_and(|end| self.cursor < end)
    }

    /// Whether any sound is or will be audible (spans or gate).
    pub fn is_active(&self) -> bool {
        self.is_playing() || self.gate || self.gate_level > 0.0
    }

    /// Absolute sample position where scheduled playback ends.
    pub fn playback_end(&self) -> Option<u64> {
        self.playback_end
    }

    /// Envelope contributed by scheduled spans at `pos`.
    fn span_envelope(&self, pos: u64) -> f32 {
        for span in &self.spans {
            if pos < span.start {
                break;
            }
            if pos >= span.end {
                continue;
            }
            let ramp = self.ramp_samples as u64;
            let rise = pos - span.start;
            let fall = span.end - pos;
            let mut env: f32 = 1.0;
            if rise < ramp {
                env = env.min(rise as f32 / ramp as f32);
            }
            if fall < ramp {
                env = env.min(fall as f32 / ramp as f32);
            }
            return env;
        }
        0.0
    }

    /// Render one sample and advance the cursor.
    pub fn next_sample(&mut self) -> f32 {
        let span_env = self.span_envelope(self.cursor);

        // Continuous gate ramps toward its target to avoid clicks.
        let step = 1.0 / self.ramp_samples as f32;
        if self.gate {
            self.gate_level = (self.gate_level + step).min(1.0);
        } else {
            self.gate_level = (self.gate_level - step).max(0.0);
        }

        let env = span_env.max(self.gate_level);
        self.cursor += 1;
        self.prune();
        self.osc.next_sample() * env * self.volume
    }

    /// Render into `out`, one mono sample per slot.
    pub fn fill(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    fn prune(&mut self) {
        let cursor = self.cursor;
        self.spans.retain(|s| s.end > cursor);
    }
}
