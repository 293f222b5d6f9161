//! Lesson generation properties: curriculum prefixes and practice groups

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trainer_core::codec::encode_char;
use trainer_core::lesson::generate_groups_with;
use trainer_core::{generate_groups, lesson_alphabet, KOCH_SEQUENCE};

#[test]
fn test_early_lessons_follow_the_curriculum_order() {
    assert_eq!(lesson_alphabet(1), &['K', 'M']);
    assert_eq!(lesson_alphabet(5), &KOCH_SEQUENCE[..6]);
}

#[test]
fn test_generate_groups_shape_with_thread_rng() {
    let text = generate_groups(3, 6, 5);
    let words: Vec<&str> = text.split(' ').collect();
    assert_eq!(words.len(), 6);
    for word in words {
        assert_eq!(word.chars().count(), 5);
    }
}

proptest! {
    #[test]
    fn prop_alphabet_is_a_clamped_prefix(lesson in 0usize..200) {
        let alphabet = lesson_alphabet(lesson);
        prop_assert_eq!(alphabet.len(), (lesson + 1).min(KOCH_SEQUENCE.len()));
        prop_assert_eq!(alphabet, &KOCH_SEQUENCE[..alphabet.len()]);
    }

    #[test]
    fn prop_groups_draw_from_the_lesson_alphabet(
        seed in any::<u64>(),
        lesson in 0usize..50,
        groups in 1usize..8,
        group_len in 1usize..8,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = generate_groups_with(&mut rng, lesson, groups, group_len);
        let alphabet = lesson_alphabet(lesson);

        let words: Vec<&str> = text.split(' ').collect();
        prop_assert_eq!(words.len(), groups);
        for word in &words {
            prop_assert_eq!(word.chars().count(), group_len);
            for ch in word.chars() {
                prop_assert!(alphabet.contains(&ch));
            }
        }
    }

    #[test]
    fn prop_generated_text_is_fully_encodable(seed in any::<u64>(), lesson in 0usize..50) {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = generate_groups_with(&mut rng, lesson, 4, 5);
        for ch in text.chars() {
            prop_assert!(encode_char(ch).is_some());
        }
    }
}
