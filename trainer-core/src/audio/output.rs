//! Live audio output via cpal.
//!
//! The stream callback drains the shared [`ToneScheduler`]; everything
//! else in the crate only touches the scheduler through its mutex.

use std::sync::{Arc, Mutex, PoisonError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::scheduler::ToneScheduler;
use crate::error::AudioError;

/// An open output stream tied to a shared scheduler.
pub struct OutputStream {
    stream: cpal::Stream,
    sample_rate: u32,
}

impl OutputStream {
    /// Open the default output device and start playing the scheduler.
    pub fn open(shared: Arc<Mutex<ToneScheduler>>) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                let shared = Arc::clone(&shared);
                device.build_output_stream(
                    &config.config(),
                    move |data: &mut [f32], _| {
                        fill_frames(&shared, channels, data.len(), |i, s| data[i] = s)
                    },
                    stream_error,
                    None,
                )
            }
            cpal::SampleFormat::I16 => {
                let shared = Arc::clone(&shared);
                device.build_output_stream(
                    &config.config(),
                    move |data: &mut [i16], _| {
                        fill_frames(&shared, channels, data.len(), |i, s| {
                            data[i] = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
                        })
                    },
                    stream_error,
                    None,
                )
            }
            cpal::SampleFormat::U16 => {
                let shared = Arc::clone(&shared);
                device.build_output_stream(
                    &config.config(),
                    move |data: &mut [u16], _| {
                        let center = u16::MAX as f32 / 2.0;
                        fill_frames(&shared, channels, data.len(), |i, s| {
                            data[i] = (s.clamp(-1.0, 1.0) * center + center) as u16
                        })
                    },
                    stream_error,
                    None,
                )
            }
            other => {
                return Err(AudioError::StreamBuild(format!(
                    "unsupported sample format {other:?}"
                )))
            }
        }
        .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        Ok(Self {
            stream,
            sample_rate,
        })
    }

    /// Sample rate the device is actually running at.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Stop the stream. Dropping has the same effect.
    pub fn close(self) {
        let _ = self.stream.pause();
    }
}

fn stream_error(e: cpal::StreamError) {
    log::warn!("audio stream error: {e}");
}

/// Render `len` interleaved samples from the shared scheduler, writing
/// each via `write`. Mono output is replicated across channels.
fn fill_frames<F>(shared: &Arc<Mutex<ToneScheduler>>, channels: usize, len: usize, mut write: F)
where
    F: FnMut(usize, f32),
{
    let mut scheduler = shared
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let mut i = 0;
    while i < len {
        let sample = scheduler.next_sample();
        for _ in 0..channels.max(1) {
            if i >= len {
                break;
            }
            write(i, sample);
            i += 1;
        }
    }
}
