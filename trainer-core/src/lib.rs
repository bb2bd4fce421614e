//! # Trainer Core
//!
//! Morse code keying trainer engine: WPM-based timing, straight-key
//! decoding, an iambic paddle keyer (Mode A/B), timing statistics, and
//! sidetone audio with offline WAV rendering.
//!
//! The engine is poll-driven: every entry point takes an explicit
//! [`clock::Instant`], and hosts call `tick(now)` to fire pending gap
//! and element deadlines. Nothing here spawns threads or sleeps, so
//! behavior is deterministic under test and the same core runs behind
//! a real-time UI or a scripted simulation.

pub mod audio;
pub mod buffer;
pub mod clock;
pub mod codec;
pub mod error;
pub mod events;
pub mod iambic;
pub mod stats;
pub mod straight;
pub mod timers;
pub mod timing;
pub mod types;

pub use audio::{AudioGenerator, AudioSettings};
pub use buffer::MorseBuffer;
pub use clock::Instant;
pub use error::{AudioError, TimingError, TrainerError};
pub use events::TrainerEvent;
pub use iambic::{IambicKeyTrainer, SendState, WordTimingData};
pub use stats::{
    ElementStatistics, SpacingEvaluation, SpacingKind, SpacingStatistics, TimingEvaluation,
    TimingStatistics,
};
pub use straight::StraightKeyTrainer;
pub use timers::{TimerSet, TimerSlot};
pub use timing::{MorseTimings, TimingOptions};
pub use types::{Element, IambicMode, Paddle, PaddleLayout, TrainerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration for casual practice: 20 WPM, 600 Hz sidetone,
/// Mode B, normal paddle layout.
pub fn default_config() -> TrainerConfig {
    TrainerConfig::default()
}

/// Render `text` straight to WAV bytes at the given speed, without
/// constructing a trainer. Convenience wrapper over [`codec`] and
/// [`audio::render`].
pub fn render_text_wav(text: &str, wpm: f64) -> Result<Vec<u8>, TrainerError> {
    let timings = MorseTimings::from_wpm(wpm)?;
    let pattern = codec::text_to_morse(text);
    let pcm = audio::render::render_pcm(
        &pattern,
        &timings,
        AudioSettings::default().frequency,
        AudioSettings::default().volume,
        audio::DEFAULT_SAMPLE_RATE,
    );
    Ok(audio::render::encode_wav(&pcm, audio::DEFAULT_SAMPLE_RATE)?)
}
