//! Fuzzy name matching.

/// Case-insensitive ordered-subsequence test.
///
/// Every character of `pattern` must appear in `candidate` in the same
/// order, not necessarily adjacent: `"tbf"` matches `"textbf"`, `"xbt"`
/// does not. An empty pattern matches everything.
pub fn matches(pattern: &str, candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    let mut remaining = candidate.chars();
    pattern
        .to_lowercase()
        .chars()
        .all(|wanted| remaining.any(|c| c == wanted))
}
