//! Grading tests: positional and edit-distance scoring

use proptest::prelude::*;
use rstest::rstest;
use trainer_core::grade::normalize;
use trainer_core::{levenshtein, score_edit_distance, score_positional};

#[rstest]
#[case("SOS", "SOS", 100, 3, 3)]
#[case("SOS", "S0S", 67, 2, 3)]
#[case("SOS", "", 0, 0, 3)]
#[case("PARIS", "PA", 40, 2, 5)]
#[case("KMU RES", "KMU RES", 100, 7, 7)]
#[case("KMU RES", "KMURES", 43, 3, 7)]
fn test_positional_cases(
    #[case] expected: &str,
    #[case] produced: &str,
    #[case] score: u8,
    #[case] matched: usize,
    #[case] total: usize,
) {
    let result = score_positional(expected, produced);
    assert_eq!(result.score, score);
    assert_eq!(result.matched, matched);
    assert_eq!(result.total_expected, total);
}

#[rstest]
#[case("SOS", "S0S", 67, 2)]
#[case("PARIS", "PARS", 80, 4)]
#[case("SOS", "SOOS", 75, 3)]
#[case("ABC", "XYZ", 0, 0)]
#[case("", "", 100, 0)]
fn test_edit_distance_cases(
    #[case] expected: &str,
    #[case] produced: &str,
    #[case] score: u8,
    #[case] matched: usize,
) {
    let result = score_edit_distance(expected, produced);
    assert_eq!(result.score, score);
    assert_eq!(result.matched, matched);
}

#[test]
fn test_empty_input_scores_zero_against_nonempty_expected() {
    assert_eq!(score_edit_distance("SOS", "").score, 0);
}

#[test]
fn test_case_and_carriage_returns_are_normalized() {
    assert_eq!(normalize("sos\r\n"), "SOS\n");
    assert_eq!(score_positional("SOS", "sos\r").score, 100);
    assert_eq!(score_edit_distance("paris", "PARIS").score, 100);
}

proptest! {
    #[test]
    fn prop_identical_copy_is_perfect(text in "[A-Z0-9 ]{1,40}") {
        prop_assert_eq!(score_positional(&text, &text).score, 100);
        prop_assert_eq!(score_edit_distance(&text, &text).score, 100);
    }

    #[test]
    fn prop_scores_are_bounded(a in "[A-Z0-9 ]{0,40}", b in "[A-Z0-9 ]{0,40}") {
        let p = score_positional(&a, &b);
        prop_assert!(p.score <= 100);
        prop_assert!(p.matched <= p.total_expected);

        let e = score_edit_distance(&a, &b);
        prop_assert!(e.score <= 100);
        prop_assert!(e.matched <= e.total_expected);
    }

    #[test]
    fn prop_levenshtein_is_symmetric(a in "[A-Z ]{0,30}", b in "[A-Z ]{0,30}") {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }
}
