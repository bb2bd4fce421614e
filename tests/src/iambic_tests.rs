//! Iambic keyer scenarios at 20 WPM (dot = 60 ms, dash = 180 ms,
//! element cycle = tone + 60 ms gap).

use rstest::rstest;
use trainer_core::{
    Element, IambicKeyTrainer, IambicMode, Paddle, SendState, TrainerConfig, TrainerEvent,
};

use crate::{decoded_characters, started_elements, PaddleScript};

fn trainer(mode: IambicMode) -> IambicKeyTrainer {
    IambicKeyTrainer::new(TrainerConfig {
        iambic_mode: mode,
        audio_enabled: false,
        ..TrainerConfig::default()
    })
    .unwrap()
}

#[test]
fn sequential_taps_key_the_letter_a() {
    let mut t = trainer(IambicMode::B);
    // Dit cycle ends at 120; tap dah before the 300 ms char boundary.
    PaddleScript::new()
        .tap(0, Paddle::Left, 30)
        .tap(240, Paddle::Right, 30)
        .run(&mut t, 1000);
    assert_eq!(decoded_characters(&t.drain_events()), "A");
    assert_eq!(t.decoded(), "A ");
    assert_eq!(t.current_state(), SendState::Idle);
}

#[test]
fn mode_b_squeeze_released_early_sends_one_extra_element() {
    let mut t = trainer(IambicMode::B);
    PaddleScript::new()
        .press(0, Paddle::Left)
        .press(10, Paddle::Right)
        .release(30, Paddle::Left)
        .release(40, Paddle::Right)
        .run(&mut t, 1000);
    assert_eq!(
        started_elements(&t.drain_events()),
        vec![Element::Dit, Element::Dah]
    );
}

#[test]
fn mode_a_squeeze_released_early_stops_after_current_element() {
    let mut t = trainer(IambicMode::A);
    PaddleScript::new()
        .press(0, Paddle::Left)
        .press(10, Paddle::Right)
        .release(30, Paddle::Left)
        .release(40, Paddle::Right)
        .run(&mut t, 1000);
    assert_eq!(started_elements(&t.drain_events()), vec![Element::Dit]);
}

#[rstest]
#[case(IambicMode::A)]
#[case(IambicMode::B)]
fn held_squeeze_alternates_in_both_modes(#[case] mode: IambicMode) {
    let mut t = trainer(mode);
    // Cycles: dit 0..120, dah 120..360, dit 360..480, dah 480..720.
    PaddleScript::new()
        .press(0, Paddle::Left)
        .press(1, Paddle::Right)
        .release(650, Paddle::Left)
        .release(650, Paddle::Right)
        .run(&mut t, 1500);
    let sent = started_elements(&t.drain_events());
    assert!(sent.len() >= 4, "sent only {} elements", sent.len());
    assert_eq!(sent[0], Element::Dit);
    for pair in sent.windows(2) {
        assert_eq!(pair[1], pair[0].opposite());
    }
}

#[test]
fn held_single_paddle_repeats_until_released() {
    let mut t = trainer(IambicMode::B);
    PaddleScript::new()
        .press(0, Paddle::Right)
        .release(700, Paddle::Right)
        .run(&mut t, 1500);
    let sent = started_elements(&t.drain_events());
    // Dah cycle is 240 ms: starts at 0, 240, 480.
    assert_eq!(sent, vec![Element::Dah; 3]);
}

#[rstest]
#[case(10.0, 120.0)]
#[case(20.0, 60.0)]
#[case(40.0, 30.0)]
fn element_duration_follows_wpm(#[case] wpm: f64, #[case] dot_ms: f64) {
    let mut t = IambicKeyTrainer::new(TrainerConfig {
        wpm,
        audio_enabled: false,
        ..TrainerConfig::default()
    })
    .unwrap();
    PaddleScript::new().tap(0, Paddle::Left, 10).run(&mut t, 20);
    let duration = t
        .drain_events()
        .iter()
        .find_map(|e| match e {
            TrainerEvent::ElementStart { duration_ms, .. } => Some(*duration_ms),
            _ => None,
        })
        .expect("element started");
    assert_eq!(duration, dot_ms);
}

#[test]
fn character_spacing_is_scored_on_the_next_press() {
    let mut t = trainer(IambicMode::B);
    // Dit cycle ends at 120; char boundary fires at 300; tap at 310.
    PaddleScript::new()
        .tap(0, Paddle::Left, 30)
        .tap(310, Paddle::Left, 30)
        .run(&mut t, 320);
    let by_kind = t.statistics_by_spacing_type();
    assert_eq!(by_kind.character.count, 1);
    assert_eq!(by_kind.word.count, 0);
    // 190 ms of silence against an expected 180.
    assert!(by_kind.character.average_accuracy > 90.0);
}

#[test]
fn word_spacing_is_scored_separately() {
    let mut t = trainer(IambicMode::B);
    // Word boundary fires at 120 + 420 = 540.
    PaddleScript::new()
        .tap(0, Paddle::Left, 30)
        .tap(560, Paddle::Left, 30)
        .run(&mut t, 600);
    let by_kind = t.statistics_by_spacing_type();
    assert_eq!(by_kind.character.count, 0);
    assert_eq!(by_kind.word.count, 1);
}

#[test]
fn completed_word_keeps_its_timing_trace() {
    let mut t = trainer(IambicMode::B);
    PaddleScript::new()
        .press(0, Paddle::Left)
        .press(10, Paddle::Right)
        .release(30, Paddle::Left)
        .release(40, Paddle::Right)
        .run(&mut t, 1000);
    let word = t.last_word_timing_data().expect("word trace retained");
    assert_eq!(word.elements.len(), 2);
    assert_eq!(word.paddle_inputs.len(), 4);
    assert_eq!(word.squeeze_intervals.len(), 1);
}

#[test]
fn reversed_layout_swaps_paddle_meaning() {
    let mut t = IambicKeyTrainer::new(TrainerConfig {
        paddle_layout: trainer_core::PaddleLayout::Reversed,
        audio_enabled: false,
        ..TrainerConfig::default()
    })
    .unwrap();
    PaddleScript::new().tap(0, Paddle::Left, 30).run(&mut t, 300);
    assert_eq!(started_elements(&t.drain_events()), vec![Element::Dah]);
}
