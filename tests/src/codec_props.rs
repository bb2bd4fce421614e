//! Codec and timing-model properties.

use proptest::prelude::*;
use rstest::rstest;
use trainer_core::codec::{morse_to_text, text_to_morse};
use trainer_core::{MorseTimings, StraightKeyTrainer, TimingOptions, TrainerConfig};

use crate::at;

#[rstest]
#[case("SOS", "... --- ...")]
#[case("HELLO", ".... . .-.. .-.. ---")]
#[case("73", "--... ...--")]
#[case("A B", ".- / -...")]
fn known_encodings(#[case] text: &str, #[case] pattern: &str) {
    assert_eq!(text_to_morse(text), pattern);
    assert_eq!(morse_to_text(pattern), text);
}

#[test]
fn ar_prosign_is_a_single_group() {
    assert_eq!(text_to_morse("[AR]"), ".-.-.");
    assert_eq!(text_to_morse("E[AR]E"), ". .-.-. .");
}

#[test]
fn unknown_groups_decode_to_question_mark() {
    assert_eq!(morse_to_text("........"), "?");
}

proptest! {
    #[test]
    fn words_round_trip(word in "[A-Z0-9]{1,12}") {
        prop_assert_eq!(morse_to_text(&text_to_morse(&word)), word);
    }

    #[test]
    fn sentences_round_trip(words in prop::collection::vec("[A-Z0-9]{1,6}", 1..5)) {
        let text = words.join(" ");
        prop_assert_eq!(morse_to_text(&text_to_morse(&text)), text);
    }

    #[test]
    fn timing_ratios_hold_at_any_speed(wpm in 5.0f64..60.0) {
        let t = MorseTimings::from_wpm(wpm).unwrap();
        prop_assert!((t.dot * wpm - 1200.0).abs() < 1e-9);
        prop_assert_eq!(t.dash, t.dot * 3.0);
        prop_assert_eq!(t.element_gap, t.dot);
        prop_assert_eq!(t.char_gap, t.dot * 3.0);
        prop_assert_eq!(t.word_gap, t.dot * 7.0);
    }

    #[test]
    fn farnsworth_never_tightens_gaps(wpm in 10.0f64..40.0, eff in 5.0f64..40.0) {
        let plain = MorseTimings::from_wpm(wpm).unwrap();
        let stretched = MorseTimings::calculate(
            wpm,
            &TimingOptions { effective_wpm: Some(eff), shorten_gaps: false },
        )
        .unwrap();
        // Elements always run at character speed.
        prop_assert_eq!(stretched.dot, plain.dot);
        prop_assert_eq!(stretched.dash, plain.dash);
        // Spacing speed is clamped to the character speed.
        prop_assert!(stretched.char_gap >= plain.char_gap);
        prop_assert!(stretched.word_gap >= plain.word_gap);
    }

    #[test]
    fn presses_classify_against_twice_the_dot(hold_ms in 1u64..400) {
        let mut t = StraightKeyTrainer::new(TrainerConfig {
            audio_enabled: false,
            ..TrainerConfig::default()
        })
        .unwrap();
        t.key_press(at(0));
        t.key_release(at(hold_ms));
        let expected = if (hold_ms as f64) < 120.0 { "." } else { "-" };
        prop_assert_eq!(t.sequence(), expected);
    }
}
