// WHY: right-to-left, word-atomic alignment of phrase capitals against an abbreviation
// Decides whether a window phrase plausibly expands an abbreviation and scores it

use tracing::debug;

use super::normalization::{capitals_signature, expand_digit_suffix, uppercase_chars};
use super::similarity::ratio;
use super::ScoredCandidate;

/// Connector symbols that never correspond to letters in an expansion
pub const DEFAULT_CONNECTOR_SYMBOLS: &[char] = &['@', '&', '/', '\\'];

/// Position within the abbreviation against which the next word is tested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlignmentCursor {
    /// Nothing matched yet, test against the tail of the abbreviation
    Unanchored,
    /// Characters `[end..]` are consumed, test against the slice ending at `end`
    Anchored { end: usize },
}

impl AlignmentCursor {
    /// Try to consume `upper` at the cursor, returning the advanced cursor on match
    fn advance(self, abbreviation: &[char], upper: &[char]) -> Option<Self> {
        let end = match self {
            AlignmentCursor::Unanchored => abbreviation.len(),
            AlignmentCursor::Anchored { end } => end,
        };

        let start = end.checked_sub(upper.len())?;
        if &abbreviation[start..end] == upper {
            Some(AlignmentCursor::Anchored { end: start })
        } else {
            None
        }
    }
}

/// Alignment scorer holding the connector symbols to strip from abbreviations
#[derive(Debug, Clone)]
pub struct AlignmentScorer {
    connector_symbols: Vec<char>,
}

impl AlignmentScorer {
    pub fn new(connector_symbols: Vec<char>) -> Self {
        Self { connector_symbols }
    }

    /// Align the phrase words against the abbreviation and compute the similarity
    ///
    /// Returns `None` when no words were visited or when the reconstructed
    /// full form merely restates the abbreviation.
    pub fn align(&self, abbreviation: &str, words: &[&str]) -> Option<ScoredCandidate> {
        let stripped: String = abbreviation
            .chars()
            .filter(|c| !self.connector_symbols.contains(c))
            .collect();
        let abbreviation_chars: Vec<char> = stripped.chars().collect();

        let mut cursor = AlignmentCursor::Unanchored;
        let mut matched = 0usize;
        let mut full_form: Vec<&str> = Vec::new();

        for word in words.iter().rev() {
            let upper = uppercase_chars(word);
            if !upper.is_empty() {
                if let Some(next) = cursor.advance(&abbreviation_chars, &upper) {
                    cursor = next;
                    matched += upper.len();
                }
            }

            // WHY: non-matching words are absorbed rather than terminating the scan
            full_form.push(word);

            if matched == abbreviation_chars.len() {
                break;
            }
        }

        if full_form.is_empty() {
            return None;
        }

        full_form.reverse();
        let phrase = full_form.join(" ");
        let signature = capitals_signature(&phrase);

        let normalized = if stripped.chars().any(|c| c.is_ascii_digit()) {
            expand_digit_suffix(&stripped)
        } else {
            Some(stripped)
        };

        let score = match normalized {
            Some(ref normalized) if *normalized == phrase => {
                debug!(abbreviation, phrase = %phrase, "Rejected self-referential candidate");
                return None;
            }
            Some(ref normalized) => ratio(normalized, &signature),
            // Digits without a letter-count suffix never match
            None => 0,
        };

        Some(ScoredCandidate { phrase, score })
    }

    /// Accept the candidate phrase as a full form iff it scores at or above the threshold
    pub fn score(&self, abbreviation: &str, candidate_phrase: &str, threshold: u8) -> Option<String> {
        let words: Vec<&str> = candidate_phrase.split_whitespace().collect();
        self.score_words(abbreviation, &words, threshold)
    }

    /// Word-slice variant of [`AlignmentScorer::score`] for borrowed window phrases
    pub fn score_words(&self, abbreviation: &str, words: &[&str], threshold: u8) -> Option<String> {
        let candidate = self.align(abbreviation, words)?;
        if candidate.score >= threshold {
            Some(candidate.phrase)
        } else {
            debug!(
                abbreviation,
                phrase = %candidate.phrase,
                score = candidate.score,
                threshold,
                "Candidate below threshold"
            );
            None
        }
    }
}

impl Default for AlignmentScorer {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTOR_SYMBOLS.to_vec())
    }
}

/// Score with the default connector symbols
pub fn score(abbreviation: &str, candidate_phrase: &str, threshold: u8) -> Option<String> {
    AlignmentScorer::default().score(abbreviation, candidate_phrase, threshold)
}
