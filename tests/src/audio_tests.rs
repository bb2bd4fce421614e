//! Offline rendering and one real-time smoke test.

use std::io::Cursor;
use std::time::Duration;

use trainer_core::audio::render::{pattern_duration_ms, pattern_spans};
use trainer_core::{render_text_wav, Instant, MorseTimings, StraightKeyTrainer, TrainerConfig};

use crate::KeyScript;

#[test]
fn rendered_wav_length_matches_pattern_duration() {
    // SOS at 20 WPM lasts 1620 ms; mono 16-bit at 44.1 kHz.
    let wav = render_text_wav("SOS", 20.0).unwrap();
    let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(reader.len(), 71_442);
}

#[test]
fn live_schedule_and_offline_render_share_span_timing() {
    let timings = MorseTimings::from_wpm(20.0).unwrap();
    let spans = pattern_spans("... --- ...", &timings);
    // 9 tones, last one a dot ending at the pattern's total duration.
    assert_eq!(spans.len(), 9);
    let last = spans.last().unwrap();
    assert_eq!(
        last.start_ms + last.duration_ms,
        pattern_duration_ms("... --- ...", &timings)
    );
}

#[test]
fn keyed_session_exports_its_buffer_as_wav() {
    let mut t = StraightKeyTrainer::new(TrainerConfig {
        audio_enabled: false,
        ..TrainerConfig::default()
    })
    .unwrap();
    KeyScript::new().tap(0, 50).run(&mut t, 300);
    assert_eq!(t.buffer(), ". ");

    let buffer = t.buffer().to_owned();
    let wav = t.audio().render_wav(&buffer).unwrap();
    let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    // One 60 ms dot at 44.1 kHz.
    assert_eq!(reader.len(), 2646);
}

#[test]
fn empty_text_renders_an_empty_wav() {
    let wav = render_text_wav("", 20.0).unwrap();
    let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    assert_eq!(reader.len(), 0);
}

/// The engine is poll-driven, but a host on a wall clock must get the
/// same answers. Generous margins keep this stable on loaded machines.
#[tokio::test]
async fn wall_clock_straight_key_session_decodes() {
    let mut t = StraightKeyTrainer::new(TrainerConfig {
        audio_enabled: false,
        ..TrainerConfig::default()
    })
    .unwrap();

    t.key_press(Instant::now());
    tokio::time::sleep(Duration::from_millis(40)).await;
    t.key_release(Instant::now());

    // Wait past the 180 ms char gap, then poll.
    tokio::time::sleep(Duration::from_millis(250)).await;
    t.tick(Instant::now());
    assert_eq!(t.decoded(), "E");
}
