// WHY: token source seam between the resolver and whatever tokenizer the host provides
// Ships a whitespace tokenizer so the CLI works without an external NLP model

use regex_automata::meta::Regex;

use crate::resolver::{ResolveError, Token};

/// Supplies the ordered token sequence for one document
pub trait TokenSource: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, ResolveError>;
}

/// Leading characters split off into their own tokens
const LEADING_PUNCTUATION: &[char] = &['"', '\'', '\u{201C}', '\u{2018}', '['];

/// Trailing characters split off into their own tokens
const TRAILING_PUNCTUATION: &[char] = &[
    '.', ';', ':', '!', '?', '"', '\'', '\u{201D}', '\u{2019}', ']',
];

/// Letters with interior periods keep their trailing period ("U.S.A.", "Ph.D.", "e.g.")
const DOTTED_INITIALISM: &str = r"^(?:[A-Za-z]+\.)+[A-Za-z]*\.?$";

/// Whitespace tokenizer that peels surrounding punctuation into separate tokens
#[derive(Debug)]
pub struct WhitespaceTokenizer {
    // WHY: a build failure surfaces from tokenize() instead of silently splitting "U.S.A."
    dotted: Result<Regex, String>,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self::with_dotted_pattern(DOTTED_INITIALISM)
    }

    fn with_dotted_pattern(pattern: &str) -> Self {
        Self {
            dotted: Regex::new(pattern).map_err(|e| e.to_string()),
        }
    }

    fn is_dotted_initialism(dotted: &Regex, word: &str) -> bool {
        let interior_period = word
            .trim_end_matches('.')
            .contains('.');
        interior_period && dotted.is_match(word)
    }

    fn push_chunk<'a>(dotted: &Regex, chunk: &'a str, pieces: &mut Vec<&'a str>) {
        let core_start = chunk
            .char_indices()
            .find(|(_, c)| !LEADING_PUNCTUATION.contains(c))
            .map(|(i, _)| i)
            .unwrap_or(chunk.len());

        // Each leading mark is its own token
        for (i, c) in chunk[..core_start].char_indices() {
            pieces.push(&chunk[i..i + c.len_utf8()]);
        }

        let rest = &chunk[core_start..];
        if rest.is_empty() {
            return;
        }

        if Self::is_dotted_initialism(dotted, rest) {
            pieces.push(rest);
            return;
        }

        let core = rest.trim_end_matches(TRAILING_PUNCTUATION);
        if core.is_empty() {
            // Pure punctuation run such as "..." stays one token
            pieces.push(rest);
            return;
        }

        pieces.push(core);
        let trailing = &rest[core.len()..];
        for (i, c) in trailing.char_indices() {
            pieces.push(&trailing[i..i + c.len_utf8()]);
        }
    }
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, ResolveError> {
        let dotted = self.dotted.as_ref().map_err(|e| {
            ResolveError::TokenSourceUnavailable(format!("dotted initialism pattern failed to build: {e}"))
        })?;

        let mut pieces = Vec::new();
        for chunk in text.split_whitespace() {
            Self::push_chunk(dotted, chunk, &mut pieces);
        }

        Ok(pieces
            .into_iter()
            .enumerate()
            .map(|(index, piece)| Token::new(piece, index))
            .collect())
    }
}
