//! Tone generation: live sidetone, scheduled playback, offline WAV.
//!
//! Each trainer owns exactly one [`AudioGenerator`]. The live output
//! stream is created lazily on first audible use; if the device or
//! stream cannot be opened the generator degrades to silent operation —
//! decoding and statistics keep working without sound.

pub mod oscillator;
pub mod render;
pub mod scheduler;

#[cfg(feature = "playback")]
mod output;

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::AudioError;
use crate::timing::MorseTimings;

use scheduler::ToneScheduler;

/// Offline render and default live sample rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Tone parameters for a generator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AudioSettings {
    /// Sidetone frequency in Hz
    pub frequency: f64,
    /// Output volume, 0.0..=1.0
    pub volume: f64,
    /// Sample rate for offline rendering
    pub sample_rate: u32,
    /// When false, never open an output device
    pub live_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            frequency: 600.0,
            volume: 0.5,
            sample_rate: DEFAULT_SAMPLE_RATE,
            live_enabled: true,
        }
    }
}

#[cfg(feature = "playback")]
enum LiveState {
    /// No stream yet; will try on first audible use
    Uninitialized,
    Active(output::OutputStream),
    /// Stream creation failed once; stay silent
    Unavailable,
    Closed,
}

/// Schedules sine tones against an audio clock for live playback,
/// continuous-tone keying, and deterministic offline WAV rendering.
pub struct AudioGenerator {
    settings: AudioSettings,
    timings: MorseTimings,
    shared: Arc<Mutex<ToneScheduler>>,
    #[cfg(feature = "playback")]
    live: LiveState,
}

impl AudioGenerator {
    pub fn new(settings: AudioSettings, timings: MorseTimings) -> Self {
        let shared = Arc::new(Mutex::new(ToneScheduler::new(
            settings.sample_rate,
            settings.frequency,
            settings.volume,
        )));
        Self {
            settings,
            timings,
            shared,
            #[cfg(feature = "playback")]
            live: LiveState::Uninitialized,
        }
    }

    /// Swap in a freshly computed timing model (speed change).
    pub fn set_timings(&mut self, timings: MorseTimings) {
        self.timings = timings;
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.settings.frequency = frequency;
        self.with_scheduler(|s| s.set_frequency(frequency));
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.settings.volume = volume;
        self.with_scheduler(|s| s.set_volume(volume));
    }

    fn with_scheduler<R>(&self, f: impl FnOnce(&mut ToneScheduler) -> R) -> R {
        let mut scheduler = self
            .shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut scheduler)
    }

    /// True when a live stream is running (or was just opened).
    fn ensure_live(&mut self) -> bool {
        #[cfg(feature = "playback")]
        {
            if !self.settings.live_enabled {
                return false;
            }
            if let LiveState::Uninitialized = self.live {
                match output::OutputStream::open(Arc::clone(&self.shared)) {
                    Ok(stream) => {
                        // Track the device clock, not the requested rate.
                        let rate = stream.sample_rate();
                        if rate != self.settings.sample_rate {
                            let settings = self.settings;
                            self.with_scheduler(|s| {
                                *s = ToneScheduler::new(rate, settings.frequency, settings.volume);
                            });
                        }
                        self.live = LiveState::Active(stream);
                    }
                    Err(e) => {
                        log::warn!("audio unavailable, continuing silently: {e}");
                        self.live = LiveState::Unavailable;
                    }
                }
            }
            matches!(self.live, LiveState::Active(_))
        }
        #[cfg(not(feature = "playback"))]
        {
            false
        }
    }

    /// Schedule one tone `start_offset_ms` from now. Silently dropped
    /// when no output stream is available.
    pub fn schedule_tone(&mut self, start_offset_ms: f64, duration_ms: f64) {
        if !self.ensure_live() {
            return;
        }
        self.with_scheduler(|s| s.schedule_span(start_offset_ms, duration_ms));
    }

    /// Begin the continuous tone used for straight-key keying (press
    /// duration is unknown in advance). Idempotent.
    pub fn start_continuous_tone(&mut self) {
        if !self.ensure_live() {
            return;
        }
        self.with_scheduler(|s| s.set_gate(true));
    }

    /// Ramp the continuous tone back to silence. Idempotent.
    pub fn stop_continuous_tone(&mut self) {
        #[cfg(feature = "playback")]
        if matches!(self.live, LiveState::Active(_)) {
            self.with_scheduler(|s| s.set_gate(false));
        }
    }

    /// Schedule a whole Morse pattern for live playback and return its
    /// total duration in milliseconds. Elements play at character speed;
    /// letter and word silences carry the Farnsworth stretch. Poll
    /// [`is_playing`](Self::is_playing) for completion; without an
    /// output stream the pattern is skipped (duration still returned).
    pub fn play_morse(&mut self, pattern: &str) -> f64 {
        let total = render::pattern_duration_ms(pattern, &self.timings);
        if !self.ensure_live() {
            log::debug!("no audio output; skipping playback of {} ms", total);
            return total;
        }
        let spans = render::pattern_spans(pattern, &self.timings);
        self.with_scheduler(|s| {
            for span in spans {
                s.schedule_span(span.start_ms, span.duration_ms);
            }
        });
        total
    }

    /// Whether scheduled playback is still sounding.
    pub fn is_playing(&self) -> bool {
        self.with_scheduler(|s| s.is_playing())
    }

    /// Cancel scheduled playback. Returns whether an active playback was
    /// cut short. Safe to call repeatedly.
    pub fn stop_playing(&mut self) -> bool {
        self.with_scheduler(|s| s.cancel_scheduled())
    }

    /// Offline-render a pattern to WAV bytes using the same span
    /// computation and render path as live playback.
    pub fn render_wav(&self, pattern: &str) -> Result<Vec<u8>, AudioError> {
        let pcm = render::render_pcm(
            pattern,
            &self.timings,
            self.settings.frequency,
            self.settings.volume,
            self.settings.sample_rate,
        );
        render::encode_wav(&pcm, self.settings.sample_rate)
    }

    /// Release the output stream and drop pending tones. Idempotent;
    /// also runs on `Drop`.
    pub fn close(&mut self) {
        self.with_scheduler(|s| {
            s.cancel_scheduled();
            s.set_gate(false);
        });
        #[cfg(feature = "playback")]
        {
            if let LiveState::Active(stream) =
                std::mem::replace(&mut self.live, LiveState::Closed)
            {
                stream.close();
            } else {
                self.live = LiveState::Closed;
            }
        }
    }
}

impl Drop for AudioGenerator {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for AudioGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioGenerator")
            .field("settings", &self.settings)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}
