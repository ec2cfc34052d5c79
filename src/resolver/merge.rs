// WHY: union of the primary resolution with an independently detected mapping
// Primary values always win; the secondary only fills abbreviations the primary missed

use tracing::debug;

use super::AbbreviationMap;

/// Merge the secondary mapping into the primary one, returning the number of entries filled in
pub fn merge_into<I>(primary: &mut AbbreviationMap, secondary: I) -> usize
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut added = 0;

    for (abbreviation, expansion) in secondary {
        let key = abbreviation.trim();
        if key.is_empty() {
            continue;
        }
        if primary.contains_key(key) {
            debug!(abbreviation = key, "Primary expansion kept over secondary");
            continue;
        }
        primary.insert(key.to_string(), expansion);
        added += 1;
    }

    added
}

/// Owned variant of [`merge_into`]
pub fn merge_with_fallback<I>(mut primary: AbbreviationMap, secondary: I) -> AbbreviationMap
where
    I: IntoIterator<Item = (String, String)>,
{
    merge_into(&mut primary, secondary);
    primary
}
