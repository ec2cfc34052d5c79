// WHY: bounded neighbourhood around each abbreviation occurrence
// Borrowed token slices keep window extraction allocation-free

use super::{CandidatePhrase, Token, WindowSide};

/// Token reach on each side of an abbreviation occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub before: usize,
    pub after: usize,
}

impl WindowBounds {
    /// Split a `multiplier * len + 1` window into before/after reach
    /// WHY: default multiplier 2 yields len + 1 tokens before and len tokens after
    pub fn for_abbreviation(abbreviation: &str, multiplier: usize) -> Self {
        let length = abbreviation.chars().count();
        let span = multiplier.saturating_mul(length);
        let size = span.saturating_add(1);
        let after = span / 2;
        Self {
            before: size - after,
            after,
        }
    }
}

/// Extract before/after candidate phrases for every occurrence of the abbreviation
///
/// Windows are clipped to `[0, tokens.len())`; empty windows contribute nothing.
pub fn extract_windows<'a>(
    abbreviation: &str,
    tokens: &'a [Token],
    multiplier: usize,
) -> Vec<CandidatePhrase<'a>> {
    let bounds = WindowBounds::for_abbreviation(abbreviation, multiplier);
    let mut phrases = Vec::new();

    for (position, token) in tokens.iter().enumerate() {
        if token.text != abbreviation {
            continue;
        }

        let before_start = position.saturating_sub(bounds.before);
        let before = &tokens[before_start..position];
        if !before.is_empty() {
            phrases.push(CandidatePhrase {
                tokens: before,
                side: WindowSide::Before,
            });
        }

        let after_end = tokens.len().min(position.saturating_add(1).saturating_add(bounds.after));
        let after = &tokens[position + 1..after_end];
        if !after.is_empty() {
            phrases.push(CandidatePhrase {
                tokens: after,
                side: WindowSide::After,
            });
        }
    }

    phrases
}
