//! Straight-key decoding scenarios at 20 WPM (dot = 60 ms).

use rstest::rstest;
use trainer_core::{Element, StraightKeyTrainer, TrainerConfig, TrainerEvent};

use crate::{decoded_characters, KeyScript};

fn trainer() -> StraightKeyTrainer {
    StraightKeyTrainer::new(TrainerConfig {
        audio_enabled: false,
        ..TrainerConfig::default()
    })
    .unwrap()
}

#[rstest]
#[case(50, Element::Dit)]
#[case(119, Element::Dit)]
#[case(120, Element::Dah)]
#[case(200, Element::Dah)]
fn press_duration_classifies_against_twice_dot(#[case] hold_ms: u64, #[case] expected: Element) {
    let mut t = trainer();
    KeyScript::new().tap(0, hold_ms).run(&mut t, hold_ms + 1);
    let events = t.drain_events();
    assert!(events.contains(&TrainerEvent::KeyRelease { element: expected }));
}

#[test]
fn two_taps_with_letter_spacing_decode_as_two_characters() {
    let mut t = trainer();
    // "E E": char gap (180 ms) elapses between the taps, word gap after.
    KeyScript::new().tap(0, 50).tap(300, 50).run(&mut t, 800);
    assert_eq!(t.decoded(), "EE ");
    assert_eq!(decoded_characters(&t.drain_events()), "EE");
}

#[test]
fn sos_keyed_as_a_full_word() {
    let mut t = trainer();
    let script = KeyScript::new()
        // S: three 50 ms dots, 60 ms apart
        .tap(0, 50)
        .tap(110, 50)
        .tap(220, 50)
        // O: three 180 ms dashes after a letter pause
        .tap(500, 180)
        .tap(740, 180)
        .tap(980, 180)
        // S again
        .tap(1400, 50)
        .tap(1510, 50)
        .tap(1620, 50);
    script.run(&mut t, 2200);
    assert_eq!(t.decoded(), "SOS ");
}

#[test]
fn elements_inside_a_letter_do_not_commit_early() {
    let mut t = trainer();
    // Gaps of 60 ms stay below the 180 ms char gap.
    KeyScript::new().tap(0, 50).tap(110, 50).run(&mut t, 170);
    assert_eq!(t.sequence(), "..");
    assert_eq!(t.buffer(), "");
}

#[test]
fn perfect_dots_score_perfect_accuracy() {
    let mut t = trainer();
    KeyScript::new()
        .tap(0, 60)
        .tap(120, 60)
        .tap(240, 60)
        .run(&mut t, 300);
    let stats = t.statistics();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.average_accuracy, 100.0);
    assert_eq!(stats.standard_deviation, 0.0);
    assert_eq!(t.statistics_by_element().dah.count, 0);
}

#[test]
fn speed_change_mid_session_reclassifies_later_presses() {
    let mut t = trainer();
    KeyScript::new().tap(0, 100).run(&mut t, 101);
    // 100 ms < 120: dot at 20 WPM.
    assert_eq!(t.sequence(), ".");

    // At 40 WPM the dot is 30 ms, so 100 ms becomes a dash.
    t.set_wpm(40.0).unwrap();
    t.key_press(crate::at(200));
    t.key_release(crate::at(300));
    assert_eq!(t.sequence(), ".-");
}
