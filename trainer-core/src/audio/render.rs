//! Morse pattern to tone spans, PCM, and WAV.
//!
//! The span computation here is the single source of playback timing:
//! live playback schedules exactly these spans, and the offline WAV
//! renderer plays them through the same [`ToneScheduler`] fill path.

use super::scheduler::ToneScheduler;
use crate::error::AudioError;
use crate::timing::MorseTimings;

/// One tone to play, in milliseconds relative to playback start.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ToneEvent {
    pub start_ms: f64,
    pub duration_ms: f64,
}

/// Walk a Morse pattern (`.`/`-` groups separated by spaces, `/` word
/// marks) into absolute tone spans.
///
/// Elements and the gaps inside a group run at character speed
/// (`dot`/`dash`/`element_gap`); the silence between groups is
/// `char_gap` and between words `word_gap`, which carry the Farnsworth
/// effective-WPM stretch. Symbols stay fast, silences lengthen.
pub fn pattern_spans(pattern: &str, timings: &MorseTimings) -> Vec<ToneEvent> {
    let mut spans = Vec::new();
    let mut t = 0.0;
    // Silence owed before the next group's first element.
    let mut pending_gap = 0.0;

    for group in pattern.split_whitespace() {
        if group == "/" {
            // Upgrade the inter-letter silence to a word gap.
            pending_gap = timings.word_gap;
            continue;
        }

        let mut first = true;
        for symbol in group.chars() {
            let duration = match symbol {
                '.' => timings.dot,
                '-' => timings.dash,
                _ => continue,
            };
            if first {
                t += pending_gap;
                first = false;
            } else {
                t += timings.element_gap;
            }
            spans.push(ToneEvent {
                start_ms: t,
                duration_ms: duration,
            });
            t += duration;
        }

        if !first {
            pending_gap = timings.char_gap;
        }
    }

    spans
}

/// Total playback duration of a pattern in milliseconds.
pub fn pattern_duration_ms(pattern: &str, timings: &MorseTimings) -> f64 {
    pattern_spans(pattern, timings)
        .last()
        .map_or(0.0, |s| s.start_ms + s.duration_ms)
}

/// Render a pattern offline to mono f32 PCM.
pub fn render_pcm(
    pattern: &str,
    timings: &MorseTimings,
    frequency: f64,
    volume: f64,
    sample_rate: u32,
) -> Vec<f32> {
    let mut scheduler = ToneScheduler::new(sample_rate, frequency, volume);
    for span in pattern_spans(pattern, timings) {
        scheduler.schedule_span(span.start_ms, span.duration_ms);
    }
    let total = scheduler.playback_end().unwrap_or(0) as usize;
    let mut pcm = vec![0.0f32; total];
    scheduler.fill(&mut pcm);
    pcm
}

/// Encode mono f32 PCM as a 16-bit WAV byte buffer.
pub fn encode_wav(pcm: &[f32], sample_rate: u32) -> Result<Vec<u8>, AudioError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for &sample in pcm {
        let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(quantized)?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}
