//! Sidetone sine oscillator.

use std::f64::consts::PI;

/// Phase-accumulator sine oscillator.
#[derive(Clone, Debug)]
pub struct Oscillator {
    frequency: f64,
    sample_rate: f64,
    phase: f64,
}

impl Oscillator {
    pub fn new(frequency: f64, sample_rate: u32) -> Self {
        Self {
            frequency,
            sample_rate: sample_rate as f64,
            phase: 0.0,
        }
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Generate the next sample and advance the phase.
    pub fn next_sample(&mut self) -> f32 {
        let sample = (2.0 * PI * self.phase).sin() as f32;
        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sample
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
