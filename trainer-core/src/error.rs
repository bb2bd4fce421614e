//! Error types for the trainer engine

use std::fmt;

/// Errors from the timing calculator
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TimingError {
    /// WPM was zero, negative, or not a number
    InvalidWpm(f64),
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::InvalidWpm(wpm) => write!(f, "WPM must be positive, got {wpm}"),
        }
    }
}

impl std::error::Error for TimingError {}

/// Errors from the audio generator
#[derive(Debug)]
pub enum AudioError {
    /// No output device is available on this host
    NoOutputDevice,
    /// Building or starting the output stream failed
    StreamBuild(String),
    /// WAV encoding failed
    Encode(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no audio output device available"),
            AudioError::StreamBuild(msg) => write!(f, "failed to build audio stream: {msg}"),
            AudioError::Encode(msg) => write!(f, "WAV encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {}

impl From<hound::Error> for AudioError {
    fn from(e: hound::Error) -> Self {
        AudioError::Encode(e.to_string())
    }
}

/// Top-level error for trainer construction and configuration
#[derive(Debug)]
pub enum TrainerError {
    Timing(TimingError),
    Audio(AudioError),
}

impl fmt::Display for TrainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainerError::Timing(e) => write!(f, "timing error: {e}"),
            TrainerError::Audio(e) => write!(f, "audio error: {e}"),
        }
    }
}

impl std::error::Error for TrainerError {}

impl From<TimingError> for TrainerError {
    fn from(e: TimingError) -> Self {
        TrainerError::Timing(e)
    }
}

impl From<AudioError> for TrainerError {
    fn from(e: AudioError) -> Self {
        TrainerError::Audio(e)
    }
}
