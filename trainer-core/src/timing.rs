//! WPM-derived timing model (PARIS standard).

use crate::error::TimingError;

/// Options modifying gap timing without touching element timing.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TimingOptions {
    /// Farnsworth effective WPM. When set (and below the character WPM),
    /// character and word gaps stretch to this slower speed while dots and
    /// dashes stay at character speed. Clamped to the character WPM;
    /// non-positive values are treated as unset.
    pub effective_wpm: Option<f64>,
    /// Shorten character/word gaps to 90% of nominal.
    pub shorten_gaps: bool,
}

/// All element and gap durations in milliseconds, derived once per speed
/// change. Immutable once computed; recompute wholesale on WPM change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MorseTimings {
    /// Dot duration (one unit)
    pub dot: f64,
    /// Dash duration (three units)
    pub dash: f64,
    /// Silence between elements of one character (one unit)
    pub element_gap: f64,
    /// Silence between characters (three units, spacing speed)
    pub char_gap: f64,
    /// Silence between words (seven units, spacing speed)
    pub word_gap: f64,
}

impl MorseTimings {
    /// Derive timings for `wpm` words per minute.
    ///
    /// PARIS standard: one unit = 1200/wpm ms. Fails fast on non-positive
    /// WPM; that is a configuration error, not a recoverable condition.
    pub fn calculate(wpm: f64, options: &TimingOptions) -> Result<Self, TimingError> {
        if !(wpm > 0.0) {
            return Err(TimingError::InvalidWpm(wpm));
        }

        let dot = 1200.0 / wpm;
        let gap_factor = if options.shorten_gaps { 0.9 } else { 1.0 };

        // Farnsworth: gaps derive from the (slower) effective speed while
        // elements keep character speed.
        let spacing_wpm = options
            .effective_wpm
            .filter(|e| *e > 0.0)
            .map(|e| e.min(wpm))
            .unwrap_or(wpm);
        let spacing_dot = 1200.0 / spacing_wpm;

        Ok(Self {
            dot,
            dash: dot * 3.0,
            element_gap: dot,
            char_gap: spacing_dot * 3.0 * gap_factor,
            word_gap: spacing_dot * 7.0 * gap_factor,
        })
    }

    /// Timings at `wpm` with default options (no Farnsworth, full gaps).
    pub fn from_wpm(wpm: f64) -> Result<Self, TimingError> {
        Self::calculate(wpm, &TimingOptions::default())
    }
}
