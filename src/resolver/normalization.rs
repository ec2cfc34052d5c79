// WHY: standalone text transforms shared by detection, alignment and aggregation
// Keeps symbol handling and signature building identical across every phase

/// Upper bound on how many times a digit suffix may repeat a letter
/// WHY: digit counts beyond this can never align inside a bounded window
pub const MAX_DIGIT_REPEAT: usize = 32;

/// Remove every gloss symbol from the text so "(USFFC)" becomes a plain token
pub fn strip_symbols(text: &str, symbols: &[char]) -> String {
    let mut result = String::with_capacity(text.len());
    strip_symbols_into(text, symbols, &mut result);
    result
}

/// Remove symbols into supplied buffer to avoid allocation
/// WHY: enables buffer reuse when cleaning many documents in one run
pub fn strip_symbols_into(text: &str, symbols: &[char], buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    for ch in text.chars() {
        if !symbols.contains(&ch) {
            buffer.push(ch);
        }
    }
}

/// Capitalize each word except the literal "and", then keep only uppercase characters
/// "Command and Control" -> "CC", "Department of the Navy" -> "DOTN"
pub fn capitals_signature(phrase: &str) -> String {
    let mut signature = String::new();

    for word in phrase.split_whitespace() {
        if word == "and" {
            continue;
        }

        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            signature.extend(first.to_uppercase().filter(|c| c.is_uppercase()));
        }
        signature.extend(chars.filter(|c| c.is_uppercase()));
    }

    signature
}

/// Uppercase characters of a single word in left-to-right order
pub fn uppercase_chars(word: &str) -> Vec<char> {
    word.chars().filter(|c| c.is_uppercase()).collect()
}

/// Expand a trailing digit count into repeated letters: "C2" -> "CC", "A3" -> "AAA"
///
/// Returns `None` when the text contains digits but does not end in
/// letter-then-digits, or when the count cannot be parsed.
pub fn expand_digit_suffix(abbreviation: &str) -> Option<String> {
    let digits_start = abbreviation
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;

    let prefix = &abbreviation[..digits_start];
    let letter = prefix.chars().last().filter(|c| c.is_ascii_alphabetic())?;
    let count: usize = abbreviation[digits_start..].parse().ok()?;

    let repeats = count.saturating_sub(1).min(MAX_DIGIT_REPEAT);
    let mut expanded = String::with_capacity(prefix.len() + repeats);
    expanded.push_str(prefix);
    expanded.extend(std::iter::repeat(letter).take(repeats));
    Some(expanded)
}

/// Python-style `isupper`: at least one cased character and no lowercase ones
pub fn is_all_upper(text: &str) -> bool {
    let mut has_cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
