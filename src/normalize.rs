// src/normalize.rs
//! Title compare form for fuzzy dedup. Never shown to readers.

/// Upper bound on the compare form, in chars.
pub const MAX_NORMALIZED_TITLE_CHARS: usize = 300;

/// Normalize a headline for similarity comparison:
/// trim, lowercase, collapse whitespace runs, drop punctuation, cap at 300 chars.
///
/// Kept characters are alphanumerics (any script), `_`, whitespace and `-`.
/// Punctuation is dropped after whitespace is collapsed, so `"a , b"` becomes
/// `"a  b"`; comparisons only need a stable form, not a pretty one.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.trim().to_lowercase();

    let mut collapsed = String::with_capacity(lowered.len());
    let mut last_was_space = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                collapsed.push(' ');
                last_was_space = true;
            }
        } else {
            collapsed.push(ch);
            last_was_space = false;
        }
    }

    collapsed
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace())
        .take(MAX_NORMALIZED_TITLE_CHARS)
        .collect()
}
