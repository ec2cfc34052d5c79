// WHY: one winner per abbreviation when several occurrences accept different full forms
// Highest signature score wins; ties go to the most frequent raw full form, then first seen

use std::collections::HashMap;

use tracing::debug;

use super::normalization::capitals_signature;
use super::similarity::ratio;
use super::AbbreviationMap;

/// Pick the single best full form for one abbreviation
pub fn select_best_match(abbreviation: &str, candidates: &[String]) -> Option<String> {
    match candidates {
        [] => None,
        [only] => Some(only.clone()),
        _ => {
            let key = abbreviation.trim();

            let mut frequency: HashMap<&str, usize> = HashMap::new();
            for candidate in candidates {
                *frequency.entry(candidate.as_str()).or_insert(0) += 1;
            }

            let scores: Vec<u8> = candidates
                .iter()
                .map(|candidate| ratio(key, &capitals_signature(candidate)))
                .collect();
            let best_score = scores.iter().copied().max().unwrap_or(0);

            let mut best: Option<(&str, usize)> = None;
            for (candidate, score) in candidates.iter().zip(&scores) {
                if *score != best_score {
                    continue;
                }
                let count = frequency[candidate.as_str()];
                // Strictly greater keeps the first-seen candidate on equal counts
                if best.map_or(true, |(_, best_count)| count > best_count) {
                    best = Some((candidate.as_str(), count));
                }
            }

            let tied = scores.iter().filter(|s| **s == best_score).count();
            if tied > 1 {
                debug!(abbreviation = key, tied, best_score, "Resolved tie by frequency");
            }

            best.map(|(candidate, _)| candidate.to_string())
        }
    }
}

/// Resolve every pooled abbreviation to its best full form
pub fn select_best_matches<I>(pooled: I) -> AbbreviationMap
where
    I: IntoIterator<Item = (String, Vec<String>)>,
{
    let mut resolved = AbbreviationMap::new();

    for (abbreviation, candidates) in pooled {
        if let Some(best) = select_best_match(&abbreviation, &candidates) {
            resolved.insert(abbreviation.trim().to_string(), best);
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_single_candidate_wins_outright() {
        let candidates = owned(&["Department of the Navys"]);
        assert_eq!(
            select_best_match("DON", &candidates).as_deref(),
            Some("Department of the Navys")
        );
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(select_best_match("RMF", &[]), None);
    }

    #[test]
    fn test_highest_score_wins() {
        let candidates = owned(&["Navy Risk Management", "Risk Management Framework"]);
        assert_eq!(
            select_best_match("RMF", &candidates).as_deref(),
            Some("Risk Management Framework")
        );
    }

    #[test]
    fn test_tie_broken_by_frequency() {
        let candidates = owned(&[
            "Random Mapping Function",
            "Risk Management Framework",
            "Risk Management Framework",
        ]);
        assert_eq!(
            select_best_match("RMF", &candidates).as_deref(),
            Some("Risk Management Framework")
        );
    }

    #[test]
    fn test_tie_with_equal_frequency_keeps_first_seen() {
        let candidates = owned(&["Random Mapping Function", "Risk Management Framework"]);
        assert_eq!(
            select_best_match("RMF", &candidates).as_deref(),
            Some("Random Mapping Function")
        );

        let reversed = owned(&["Risk Management Framework", "Random Mapping Function"]);
        assert_eq!(
            select_best_match("RMF", &reversed).as_deref(),
            Some("Risk Management Framework")
        );
    }

    #[test]
    fn test_frequency_counts_raw_strings() {
        // Same signature but different raw text count separately
        let candidates = owned(&[
            "command and control",
            "Command and Control",
            "Command and Control",
        ]);
        assert_eq!(select_best_match("CC", &candidates).as_deref(), Some("Command and Control"));
    }

    #[test]
    fn test_digit_key_scores_against_raw_abbreviation() {
        // "C2" vs signature "CC" scores 50 for every candidate, so frequency decides
        assert_eq!(ratio("C2", &capitals_signature("Command and Control")), 50);
        let candidates = owned(&["Cyber Command", "Command and Control", "Command and Control"]);
        assert_eq!(
            select_best_match("C2", &candidates).as_deref(),
            Some("Command and Control")
        );

        let single = owned(&["Cyber Command", "Command and Control"]);
        assert_eq!(select_best_match("C2", &single).as_deref(), Some("Cyber Command"));

        // Signature "C" scores 67 against "C2" and beats the full form
        let shorter = owned(&["Command and Control", "Command and Control", "Control"]);
        assert_eq!(select_best_match("C2", &shorter).as_deref(), Some("Control"));
    }

    #[test]
    fn test_select_best_matches_trims_keys() {
        let pooled = vec![
            ("RMF ".to_string(), owned(&["Risk Management Framework"])),
            ("XYZ".to_string(), Vec::new()),
        ];
        let resolved = select_best_matches(pooled);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.get("RMF").map(String::as_str), Some("Risk Management Framework"));
    }
}
