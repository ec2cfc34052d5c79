//! Pinned similarity ratio between an abbreviation and a capitals signature.
//!
//! The ratio is the InDel ratio: `2 * LCS(a, b) / (|a| + |b|)` scaled to
//! `[0, 100]` and rounded half-to-even. Identical non-empty strings score 100;
//! if either side is empty the score is 0.

/// Length of the longest common subsequence of two character slices
pub fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Two rows instead of the full matrix
    let mut prev_row = vec![0usize; b.len() + 1];
    let mut curr_row = vec![0usize; b.len() + 1];

    for &a_char in a {
        for (j, &b_char) in b.iter().enumerate() {
            curr_row[j + 1] = if a_char == b_char {
                prev_row[j] + 1
            } else {
                prev_row[j + 1].max(curr_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Similarity score in `[0, 100]`
pub fn ratio(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let total = a_chars.len() + b_chars.len();
    if a_chars.is_empty() || b_chars.is_empty() {
        return 0;
    }

    let common = lcs_length(&a_chars, &b_chars);
    round_half_even(200 * common, total) as u8
}

/// Integer division rounded half-to-even
fn round_half_even(numerator: usize, denominator: usize) -> usize {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    match (2 * remainder).cmp(&denominator) {
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 1 => quotient + 1,
        _ => quotient,
    }
}
