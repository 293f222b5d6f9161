//! Progressive lesson curriculum and practice-text generation

use rand::Rng;

/// Fixed training curriculum, ordered easiest-first (Koch method).
/// The order is significant and never changes at runtime; lesson `n`
/// unlocks the prefix of length `n + 1`.
pub const KOCH_SEQUENCE: [char; 41] = [
    'K', 'M', 'U', 'R', 'E', 'S', 'N', 'A', 'P', 'T', //
    'L', 'W', 'I', '.', 'J', 'Z', '=', 'F', 'O', 'Y', //
    ',', 'V', 'G', '5', '/', 'Q', '9', '2', 'H', '3', //
    '8', 'B', '?', '4', '7', 'C', '1', 'D', '6', '0', 'X',
];

/// Characters available at the given lesson: the curriculum prefix of
/// length `clamp(lesson + 1, 1, 41)`.
pub fn lesson_alphabet(lesson: usize) -> &'static [char] {
    let count = KOCH_SEQUENCE.len().min(lesson.saturating_add(1));
    &KOCH_SEQUENCE[..count]
}

/// Generate practice text: `groups` random groups of `group_len` characters
/// drawn with replacement from the lesson alphabet, joined by single spaces.
pub fn generate_groups(lesson: usize, groups: usize, group_len: usize) -> String {
    generate_groups_with(&mut rand::thread_rng(), lesson, groups, group_len)
}

/// Deterministic variant of [`generate_groups`] over a caller-supplied
/// random source. Degenerate counts are clamped to 1.
pub fn generate_groups_with<R: Rng + ?Sized>(
    rng: &mut R,
    lesson: usize,
    groups: usize,
    group_len: usize,
) -> String {
    let chars = lesson_alphabet(lesson);
    let groups = groups.max(1);
    let group_len = group_len.max(1);
    let mut out = String::with_capacity(groups * (group_len + 1));
    for g in 0..groups {
        if g > 0 {
            out.push(' ');
        }
        for _ in 0..group_len {
            out.push(chars[rng.gen_range(0..chars.len())]);
        }
    }
    out
}
