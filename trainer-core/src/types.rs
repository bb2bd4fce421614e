//! Core data types for the Morse trainers

use serde::{Deserialize, Serialize};

use crate::error::TimingError;
use crate::timing::{MorseTimings, TimingOptions};

/// Morse code elements
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Element {
    /// Dit (short element)
    Dit,
    /// Dah (long element)
    Dah,
}

impl Element {
    /// Returns the opposite element (Dit <-> Dah)
    pub const fn opposite(&self) -> Element {
        match self {
            Element::Dit => Element::Dah,
            Element::Dah => Element::Dit,
        }
    }

    /// Symbol used in Morse pattern strings
    pub const fn symbol(&self) -> char {
        match self {
            Element::Dit => '.',
            Element::Dah => '-',
        }
    }

    /// Ideal duration of this element under `timings`, in milliseconds
    pub fn duration_ms(&self, timings: &MorseTimings) -> f64 {
        match self {
            Element::Dit => timings.dot,
            Element::Dah => timings.dash,
        }
    }
}

/// Paddle side identification (physical position, before layout mapping)
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Paddle {
    Left,
    Right,
}

impl Paddle {
    /// Returns the opposite paddle side
    pub const fn opposite(&self) -> Paddle {
        match self {
            Paddle::Left => Paddle::Right,
            Paddle::Right => Paddle::Left,
        }
    }
}

/// Iambic keyer operating modes
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum IambicMode {
    /// Mode A: alternation stops as soon as both paddles are released
    A,
    /// Mode B: one extra alternating element after release if a squeeze
    /// was detected during the element
    B,
}

/// Which paddle produces which element
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PaddleLayout {
    /// Left = dit, right = dah
    Normal,
    /// Left = dah, right = dit
    Reversed,
}

impl PaddleLayout {
    /// Map a physical paddle to the element it keys under this layout
    pub const fn element_for(&self, paddle: Paddle) -> Element {
        match (self, paddle) {
            (PaddleLayout::Normal, Paddle::Left) => Element::Dit,
            (PaddleLayout::Normal, Paddle::Right) => Element::Dah,
            (PaddleLayout::Reversed, Paddle::Left) => Element::Dah,
            (PaddleLayout::Reversed, Paddle::Right) => Element::Dit,
        }
    }
}

/// Valid slider ranges. Out-of-range values are clamped, not rejected,
/// since they arrive from user-adjustable controls.
pub const FREQUENCY_RANGE: (f64, f64) = (100.0, 2000.0);
pub const VOLUME_RANGE: (f64, f64) = (0.0, 1.0);
pub const WPM_RANGE: (f64, f64) = (5.0, 60.0);

/// Trainer construction configuration. Persisting this (or parts of it)
/// across sessions is the host UI's concern; the core only consumes it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Sidetone frequency in Hz
    pub frequency: f64,
    /// Output volume, 0.0..=1.0
    pub volume: f64,
    /// Character speed in words per minute
    pub wpm: f64,
    /// Farnsworth effective WPM (gap speed); `None` disables Farnsworth
    pub effective_wpm: Option<f64>,
    /// Shorten character/word gaps to 90%
    pub shorten_gaps: bool,
    /// Iambic keyer mode (paddle trainer only)
    pub iambic_mode: IambicMode,
    /// Paddle-to-element mapping (paddle trainer only)
    pub paddle_layout: PaddleLayout,
    /// Disable to run the state machines without any audio output
    pub audio_enabled: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            frequency: 600.0,
            volume: 0.5,
            wpm: 20.0,
            effective_wpm: None,
            shorten_gaps: false,
            iambic_mode: IambicMode::B,
            paddle_layout: PaddleLayout::Normal,
            audio_enabled: true,
        }
    }
}

impl TrainerConfig {
    /// Copy with all slider-driven values clamped into their valid ranges
    /// and the Farnsworth speed held at or below the character speed.
    pub fn clamped(&self) -> Self {
        let wpm = self.wpm.clamp(WPM_RANGE.0, WPM_RANGE.1);
        Self {
            frequency: self.frequency.clamp(FREQUENCY_RANGE.0, FREQUENCY_RANGE.1),
            volume: self.volume.clamp(VOLUME_RANGE.0, VOLUME_RANGE.1),
            wpm,
            effective_wpm: self
                .effective_wpm
                .map(|e| e.clamp(WPM_RANGE.0, wpm)),
            ..*self
        }
    }

    /// Derive the timing model for this configuration.
    pub fn timings(&self) -> Result<MorseTimings, TimingError> {
        MorseTimings::calculate(
            self.wpm,
            &TimingOptions {
                effective_wpm: self.effective_wpm,
                shorten_gaps: self.shorten_gaps,
            },
        )
    }
}
