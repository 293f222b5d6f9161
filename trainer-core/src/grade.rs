//! Scoring of operator copy against the expected lesson text

/// Result of one grading pass; computed fresh on demand, never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GradeResult {
    /// Percentage in 0..=100
    pub score: u8,
    /// Characters counted as correct
    pub matched: usize,
    /// Size of the comparison (expected length for positional grading,
    /// longer of the two texts for edit-distance grading)
    pub total_expected: usize,
}

/// Normalize text for grading: uppercase and strip carriage returns so
/// Windows line endings cannot misalign the comparison. Spaces and
/// newlines stay significant.
pub fn normalize(s: &str) -> String {
    s.to_uppercase().replace('\r', "")
}

/// Position-by-position comparison: a produced character counts only when
/// it sits at the same index as in the expected text. Missing positions
/// count as misses, never as errors.
pub fn score_positional(expected: &str, produced: &str) -> GradeResult {
    let a: Vec<char> = normalize(expected).chars().collect();
    let b: Vec<char> = normalize(produced).chars().collect();

    let matched = a
        .iter()
        .enumerate()
        .filter(|(i, ch)| b.get(*i) == Some(ch))
        .count();
    let score = round_percent(matched as f64 / a.len().max(1) as f64);
    GradeResult {
        score,
        matched,
        total_expected: a.len(),
    }
}

/// Edit-distance comparison: insertions, deletions and substitutions at
/// unit cost, scored against the longer text.
pub fn score_edit_distance(expected: &str, produced: &str) -> GradeResult {
    let a = normalize(expected);
    let b = normalize(produced);
    let longest = a.chars().count().max(b.chars().count());
    let distance = levenshtein(&a, &b);
    let score = round_percent((1.0 - distance as f64 / longest.max(1) as f64).max(0.0));
    GradeResult {
        score,
        matched: longest.saturating_sub(distance),
        total_expected: longest,
    }
}

/// Minimum edit distance between `a` and `b`, O(len(a)·len(b)) time with a
/// single O(len(b)) row.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut dp: Vec<usize> = (0..=b.len()).collect();
    for i in 1..=a.len() {
        let mut prev = dp[0];
        dp[0] = i;
        for j in 1..=b.len() {
            let tmp = dp[j];
            let cost = usize::from(a[i - 1] != b[j - 1]);
            dp[j] = (dp[j] + 1).min(dp[j - 1] + 1).min(prev + cost);
            prev = tmp;
        }
    }
    dp[b.len()]
}

fn round_percent(fraction: f64) -> u8 {
    (fraction * 100.0).round() as u8
}
