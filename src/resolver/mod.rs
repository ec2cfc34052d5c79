// WHY: abbreviation resolution engine with one module per pipeline stage
// tokens -> candidate detection -> windows -> alignment scoring -> aggregation -> merge

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::long_form::LongFormDetector;
use crate::tokenizer::TokenSource;

pub mod aggregator;
pub mod alignment;
pub mod detector;
pub mod merge;
pub mod normalization;
pub mod progress;
pub mod similarity;
pub mod window;

// Re-export core types
pub use alignment::{score, AlignmentScorer, DEFAULT_CONNECTOR_SYMBOLS};
pub use detector::{CandidateDetector, DEFAULT_DOTTED_PATTERN};
pub use progress::{FnObserver, NoopObserver, ProgressObserver, ResolvePhase};

/// Final mapping from abbreviation text to its single resolved expansion
pub type AbbreviationMap = BTreeMap<String, String>;

/// Default gloss symbols removed before tokenization
pub const DEFAULT_GLOSS_SYMBOLS: &[char] = &[',', '(', ')', '\u{2019}', '-'];

/// Errors surfaced by the resolver
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// Token source could not be initialized or failed on the text
    #[error("Token source unavailable: {0}")]
    TokenSourceUnavailable(String),
    /// Configuration value out of range
    #[error("Invalid resolver configuration: {0}")]
    InvalidConfig(String),
    /// Dotted-initialism pattern failed to compile
    #[error("Invalid abbreviation pattern: {0}")]
    InvalidPattern(String),
}

/// Token with the attributes the resolver consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Position in document order
    pub index: usize,
    pub is_all_upper: bool,
}

impl Token {
    /// Create token, deriving the all-uppercase flag from the text
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        let text = text.into();
        let is_all_upper = normalization::is_all_upper(&text);
        Self {
            text,
            index,
            is_all_upper,
        }
    }
}

/// One occurrence of an abbreviation in the token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationOccurrence {
    pub text: String,
    pub token_index: usize,
}

/// Which side of the occurrence a window was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSide {
    Before,
    After,
}

/// Borrowed window of tokens considered as a possible expansion
#[derive(Debug, Clone, Copy)]
pub struct CandidatePhrase<'a> {
    pub tokens: &'a [Token],
    pub side: WindowSide,
}

impl<'a> CandidatePhrase<'a> {
    /// Token texts in reading order
    pub fn words(&self) -> Vec<&'a str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Space-joined phrase text
    pub fn text(&self) -> String {
        self.words().join(" ")
    }
}

/// Full form reconstructed by alignment together with its similarity score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub phrase: String,
    /// Similarity in `[0, 100]`
    pub score: u8,
}

/// One row of the final mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAbbreviation {
    pub abbreviation: String,
    pub expansion: String,
}

impl ResolvedAbbreviation {
    /// Rows of a mapping in abbreviation order
    pub fn from_map(map: &AbbreviationMap) -> Vec<Self> {
        map.iter()
            .map(|(abbreviation, expansion)| Self {
                abbreviation: abbreviation.clone(),
                expansion: expansion.clone(),
            })
            .collect()
    }
}

/// Largest accepted window multiplier
pub const MAX_WINDOW_MULTIPLIER: usize = 64;

/// Configuration for abbreviation resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum similarity score for a candidate to be accepted
    pub threshold: u8,
    /// Window spans `window_multiplier * len + 1` tokens around each occurrence
    pub window_multiplier: usize,
    /// Symbols stripped from the text before tokenization
    pub gloss_symbols: Vec<char>,
    /// Symbols stripped from abbreviations before alignment
    pub connector_symbols: Vec<char>,
    /// Pattern for dotted initialisms such as "Ph.D."
    pub dotted_pattern: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: 80,
            window_multiplier: 2,
            gloss_symbols: DEFAULT_GLOSS_SYMBOLS.to_vec(),
            connector_symbols: DEFAULT_CONNECTOR_SYMBOLS.to_vec(),
            dotted_pattern: DEFAULT_DOTTED_PATTERN.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Check value ranges; pattern compilation is checked by the detector
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.threshold > 100 {
            return Err(ResolveError::InvalidConfig(format!(
                "threshold must be within 0..=100, got {}",
                self.threshold
            )));
        }
        if !(1..=MAX_WINDOW_MULTIPLIER).contains(&self.window_multiplier) {
            return Err(ResolveError::InvalidConfig(format!(
                "window_multiplier must be within 1..={MAX_WINDOW_MULTIPLIER}, got {}",
                self.window_multiplier
            )));
        }
        Ok(())
    }
}

/// Outcome of one resolution pass over a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub mapping: AbbreviationMap,
    /// Distinct abbreviation-shaped texts found in the tokens
    pub abbreviations_detected: usize,
    /// Entries resolved by alignment scoring
    pub primary_resolved: usize,
    /// Entries filled in from the secondary detector
    pub fallback_added: usize,
}

/// Abbreviation resolver holding compiled configuration
///
/// Holds no state between calls; every resolution pass is independent.
#[derive(Debug)]
pub struct AbbreviationResolver {
    config: ResolverConfig,
    detector: CandidateDetector,
    scorer: AlignmentScorer,
}

impl AbbreviationResolver {
    /// Create resolver with custom configuration
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        config.validate()?;
        let detector = CandidateDetector::new(&config.dotted_pattern)?;
        let scorer = AlignmentScorer::new(config.connector_symbols.clone());
        Ok(Self {
            config,
            detector,
            scorer,
        })
    }

    /// Create resolver with default configuration
    pub fn with_default_config() -> Result<Self, ResolveError> {
        Self::new(ResolverConfig::default())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Strip gloss symbols so parenthesized abbreviations become plain tokens
    pub fn clean_text(&self, text: &str) -> String {
        normalization::strip_symbols(text, &self.config.gloss_symbols)
    }

    /// Accepted full forms per abbreviation, pooled across every occurrence
    pub fn collect_candidates(&self, abbreviations: &[String], tokens: &[Token]) -> Vec<(String, Vec<String>)> {
        let mut pooled = Vec::with_capacity(abbreviations.len());

        for abbreviation in abbreviations {
            let phrases = window::extract_windows(abbreviation, tokens, self.config.window_multiplier);
            let accepted: Vec<String> = phrases
                .iter()
                .filter_map(|phrase| {
                    self.scorer
                        .score_words(abbreviation, &phrase.words(), self.config.threshold)
                })
                .collect();

            if accepted.is_empty() {
                debug!(abbreviation = %abbreviation, windows = phrases.len(), "No candidate accepted");
                continue;
            }
            pooled.push((abbreviation.clone(), accepted));
        }

        pooled
    }

    /// Primary resolution over an already tokenized document
    pub fn resolve_tokens(&self, tokens: &[Token], observer: &dyn ProgressObserver) -> Resolution {
        let abbreviations = self.detector.detect(tokens);
        observer.notify(ResolvePhase::CandidatesDetected);

        let pooled = self.collect_candidates(&abbreviations, tokens);
        observer.notify(ResolvePhase::ScoringComplete);

        let mapping = aggregator::select_best_matches(pooled);
        observer.notify(ResolvePhase::AggregationComplete);

        debug!(
            "Resolved {} of {} abbreviation candidates by alignment",
            mapping.len(),
            abbreviations.len()
        );

        Resolution {
            primary_resolved: mapping.len(),
            abbreviations_detected: abbreviations.len(),
            fallback_added: 0,
            mapping,
        }
    }

    /// Full pass over raw text, surfacing token source failures
    pub fn try_resolve_text(
        &self,
        text: &str,
        source: &dyn TokenSource,
        secondary: &dyn LongFormDetector,
        observer: &dyn ProgressObserver,
    ) -> Result<Resolution, ResolveError> {
        let cleaned = self.clean_text(text);
        let tokens = source.tokenize(&cleaned)?;
        observer.notify(ResolvePhase::TokensReady);

        // WHY: the secondary method reads the raw text, parentheses included
        let fallback = secondary.detect_long_forms(text);
        observer.notify(ResolvePhase::SecondaryDetected);

        let mut resolution = self.resolve_tokens(&tokens, observer);
        resolution.fallback_added = merge::merge_into(&mut resolution.mapping, fallback);
        observer.notify(ResolvePhase::MergeComplete);

        info!(
            "Resolved {} abbreviations ({} primary, {} fallback) from {} tokens",
            resolution.mapping.len(),
            resolution.primary_resolved,
            resolution.fallback_added,
            tokens.len()
        );
        Ok(resolution)
    }

    /// Full pass over raw text; an unavailable token source yields an empty mapping
    pub fn resolve_text(
        &self,
        text: &str,
        source: &dyn TokenSource,
        secondary: &dyn LongFormDetector,
        observer: &dyn ProgressObserver,
    ) -> Resolution {
        match self.try_resolve_text(text, source, secondary, observer) {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!("Abbreviation resolution failed, returning empty mapping: {}", e);
                Resolution::default()
            }
        }
    }
}
