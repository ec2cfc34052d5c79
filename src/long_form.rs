//! Secondary long-form detection from parenthetical definitions.
//!
//! Finds `long form (SF)` and `SF (long form)` patterns in raw text and
//! matches short-form characters right to left against the candidate long
//! form, the way the Schwartz & Hearst algorithm does. The result feeds the
//! fallback merge and never overrides alignment-based resolutions.

use tracing::debug;

use crate::resolver::AbbreviationMap;

/// Produces an abbreviation -> expansion mapping independently of the resolver
pub trait LongFormDetector: Send + Sync {
    fn detect_long_forms(&self, text: &str) -> AbbreviationMap;
}

/// Detector that never reports anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLongForms;

impl LongFormDetector for NoLongForms {
    fn detect_long_forms(&self, _text: &str) -> AbbreviationMap {
        AbbreviationMap::new()
    }
}

/// Most words a parenthesized group may hold
const MAX_GROUP_WORDS: usize = 8;

/// Groups with more words than this hold a long form rather than a short form
const MAX_SHORT_FORM_WORDS: usize = 3;

/// Parenthetical definition detector
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentheticalDetector;

impl ParentheticalDetector {
    pub fn new() -> Self {
        Self
    }

    /// Every `(short, long-form candidate words)` pair worth matching
    fn candidates<'a>(&self, text: &'a str) -> Vec<(String, Vec<&'a str>)> {
        let mut pairs = Vec::new();
        let mut search_from = 0;

        while let Some(open_rel) = text[search_from..].find('(') {
            let open = search_from + open_rel;
            let Some(close_rel) = text[open + 1..].find(')') else {
                break;
            };
            let close = open + 1 + close_rel;
            let inner = &text[open + 1..close];

            // Nested group: restart from the inner parenthesis
            if let Some(nested) = inner.rfind('(') {
                search_from = open + 1 + nested;
                continue;
            }
            search_from = close + 1;

            let inner_words: Vec<&str> = inner.split_whitespace().collect();
            if inner_words.is_empty() || inner_words.len() > MAX_GROUP_WORDS {
                continue;
            }

            if inner_words.len() > MAX_SHORT_FORM_WORDS {
                // Long form inside the parentheses, short form is the word before
                let Some(last) = text[..open].split_whitespace().next_back() else {
                    continue;
                };
                let short = last.trim_matches(|c: char| !c.is_alphanumeric());
                if short_form_filter(&[short]) {
                    pairs.push((short.to_string(), inner_words));
                }
            } else {
                let length: usize = inner_words.iter().map(|w| w.chars().count()).sum();
                let max_words = (length + 5).min(length * 2);
                let preceding = trailing_words(&text[..open], max_words);
                if !preceding.is_empty() && short_form_filter(&inner_words) {
                    pairs.push((inner_words.join(" "), preceding));
                }
            }
        }

        pairs
    }
}

impl LongFormDetector for ParentheticalDetector {
    fn detect_long_forms(&self, text: &str) -> AbbreviationMap {
        let mut found = AbbreviationMap::new();

        for (short, long_words) in self.candidates(text) {
            if found.contains_key(&short) {
                continue;
            }
            if let Some(long) = find_long_form(&short, &long_words) {
                debug!(short = %short, long = %long, "Parenthetical definition found");
                found.insert(short, long);
            }
        }

        found
    }
}

/// Up to `count` whitespace-separated words ending the prefix, in document order
/// WHY: walks back from the parenthesis so each group costs only the words it reads
fn trailing_words(prefix: &str, count: usize) -> Vec<&str> {
    let mut words: Vec<&str> = prefix.split_whitespace().rev().take(count).collect();
    words.reverse();
    words
}

/// Short forms are 1-3 words of 2..10 chars, at least half alphabetic, starting with a letter
fn short_form_filter(words: &[&str]) -> bool {
    if words.is_empty() || !words.iter().all(|w| (2..10).contains(&w.chars().count())) {
        return false;
    }

    let text = words.join(" ");
    let total = text.chars().count();
    let alpha = text.chars().filter(|c| c.is_alphabetic()).count();
    if alpha * 2 < total {
        return false;
    }

    text.chars().next().is_some_and(char::is_alphabetic)
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Match short-form characters right to left inside the long-form words
///
/// The first short-form character must begin a word. Returns the suffix of
/// words starting at the word holding that character.
pub fn find_long_form(short: &str, long_words: &[&str]) -> Option<String> {
    let long: Vec<char> = long_words.join(" ").chars().collect();
    let short: Vec<char> = short.chars().collect();

    let mut long_index = long.len() as isize - 1;
    let mut short_index = short.len() as isize - 1;

    while short_index >= 0 {
        let current = lower(short[short_index as usize]);
        if !current.is_alphanumeric() {
            short_index -= 1;
            continue;
        }

        loop {
            let mismatch = long_index >= 0 && lower(long[long_index as usize]) != current;
            let not_word_start = short_index == 0
                && long_index > 0
                && long[long_index as usize - 1].is_alphanumeric();
            if !(mismatch || not_word_start) {
                break;
            }
            long_index -= 1;
        }

        if long_index < 0 {
            return None;
        }

        long_index -= 1;
        short_index -= 1;
    }

    // Back onto the first matched character
    let start_char = (long_index + 1).max(0) as usize;

    let mut consumed = 0;
    let start_word = long_words.iter().position(|word| {
        consumed += word.chars().count() + 1;
        consumed > start_char
    })?;

    let long_form = long_words[start_word..].join(" ");
    if long_form.is_empty() {
        None
    } else {
        Some(long_form)
    }
}
