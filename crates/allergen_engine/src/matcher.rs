use std::collections::BTreeSet;

use crate::ClassifiedText;

/// Vocabulary the original extension shipped with.
pub const DEFAULT_ALLERGENS: &[&str] = &["egg"];

/// Whole-word, case-insensitive containment check. A word boundary is any
/// non-alphanumeric character (or the start/end of the text), so "egg" does
/// not match inside "parmeggiano".
pub fn contains_whole_word(haystack: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    let token = token.to_lowercase();

    let mut start = 0;
    while let Some(offset) = haystack[start..].find(&token) {
        let begin = start + offset;
        let end = begin + token.len();
        let bounded_left = haystack[..begin]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let bounded_right = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if bounded_left && bounded_right {
            return true;
        }
        // Step over one character and keep scanning.
        let step = haystack[begin..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        start = begin + step;
    }
    false
}

/// Scans classified text for allergen tokens. The `ingredients` bucket is
/// authoritative: when it is non-empty, `info` is ignored entirely; `info`
/// is only consulted as a fallback. Returns `None` when both buckets are
/// empty ("no data"), which callers must keep distinct from an empty set
/// ("checked, none found").
pub fn find_allergens<S: AsRef<str>>(
    text: &ClassifiedText,
    vocabulary: &[S],
) -> Option<BTreeSet<String>> {
    let bucket = if !text.ingredients.is_empty() {
        &text.ingredients
    } else if !text.info.is_empty() {
        &text.info
    } else {
        return None;
    };

    let mut found = BTreeSet::new();
    for line in bucket {
        for allergen in vocabulary {
            let token = allergen.as_ref();
            if contains_whole_word(line, token) {
                found.insert(token.to_string());
            }
        }
    }
    Some(found)
}
