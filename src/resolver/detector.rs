// WHY: shape-based scan for abbreviation-looking tokens
// Two shape classes: all-uppercase words and dotted initialisms such as "Ph.D."

use std::collections::HashSet;

use regex_automata::meta::Regex;
use tracing::debug;

use super::{AbbreviationOccurrence, ResolveError, Token};

/// Default dotted-initialism pattern, matched anywhere inside a token
pub const DEFAULT_DOTTED_PATTERN: &str = r"\b[A-Za-z]+\.[A-Za-z\.]*";

/// Abbreviation candidate detector with a compiled dotted-initialism pattern
#[derive(Debug)]
pub struct CandidateDetector {
    dotted: Regex,
}

impl CandidateDetector {
    /// Compile the detector from a dotted-initialism pattern
    pub fn new(dotted_pattern: &str) -> Result<Self, ResolveError> {
        let dotted = Regex::new(dotted_pattern)
            .map_err(|e| ResolveError::InvalidPattern(format!("{dotted_pattern}: {e}")))?;
        Ok(Self { dotted })
    }

    /// Create detector with the default dotted-initialism pattern
    pub fn with_default_pattern() -> Result<Self, ResolveError> {
        Self::new(DEFAULT_DOTTED_PATTERN)
    }

    /// Check whether a single token has an abbreviation shape
    pub fn is_candidate(&self, token: &Token) -> bool {
        // WHY: window extraction assumes single-word abbreviation tokens
        if token.text.is_empty() || token.text.chars().any(char::is_whitespace) {
            return false;
        }
        token.is_all_upper || self.dotted.is_match(token.text.as_str())
    }

    /// Distinct abbreviation texts in first-seen document order
    pub fn detect(&self, tokens: &[Token]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut abbreviations = Vec::new();

        for token in tokens {
            if self.is_candidate(token) && seen.insert(token.text.as_str()) {
                abbreviations.push(token.text.clone());
            }
        }

        debug!("Detected {} distinct abbreviation candidates", abbreviations.len());
        abbreviations
    }

    /// Every occurrence of the given abbreviation text
    pub fn occurrences(abbreviation: &str, tokens: &[Token]) -> Vec<AbbreviationOccurrence> {
        tokens
            .iter()
            .filter(|token| token.text == abbreviation)
            .map(|token| AbbreviationOccurrence {
                text: token.text.clone(),
                token_index: token.index,
            })
            .collect()
    }
}
