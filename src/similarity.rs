// src/similarity.rs
//! Ratcliff/Obershelp ("gestalt pattern matching") similarity.
//!
//! ratio = 2 * M / T, where T is the total char count of both strings and M the
//! number of chars in matching blocks. Blocks are found by taking the longest
//! common substring, then recursing on the unmatched pieces to its left and right.
//! Ties pick the block starting earliest in `a`, then earliest in `b`.
//!
//! No junk heuristic is applied: every char takes part in matching.

use std::collections::HashMap;

/// Similarity in [0.0, 1.0]. Two empty strings are identical (1.0).
pub fn gestalt_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Sum of the sizes of all matching blocks.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    let mut matched = 0usize;
    let mut queue = vec![(0usize, a.len(), 0usize, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0usize);
    // j2len[j] = length of the match ending at a[i-1], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(js) = b2j.get(c) {
            for &j in js {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|p| j2len.get(&p))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        j2len = next;
    }
    (best_i, best_j, best_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_and_empty() {
        assert!(approx(gestalt_ratio("abc", "abc"), 1.0));
        assert!(approx(gestalt_ratio("", ""), 1.0));
        assert!(approx(gestalt_ratio("abc", ""), 0.0));
        assert!(approx(gestalt_ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn classic_wikipedia_pair() {
        // WIKIMEDIA vs WIKIMANIA: blocks "WIKIM" + "IA" = 7, T = 18
        assert!(approx(gestalt_ratio("WIKIMEDIA", "WIKIMANIA"), 14.0 / 18.0));
    }

    #[test]
    fn recurses_on_both_sides() {
        // longest block "bcd", then "a" on the left and "f" on the right
        assert!(approx(gestalt_ratio("abcdef", "axbcdyf"), 10.0 / 13.0));
    }

    #[test]
    fn unicode_counts_chars_not_bytes() {
        assert!(approx(gestalt_ratio("débâcle", "débâcle"), 1.0));
        assert!(approx(gestalt_ratio("é", "e"), 0.0));
    }
}
