//! Lexical validation
//!
//! Predicates used to admit or reject tokens read from the inventory document.
//! Header lists (`enabled`, `hidden`) are all-or-nothing; per-item lists
//! (`collections`, `tags`) are filtered element by element.

use once_cell::sync::Lazy;
use regex::Regex;

static BARE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+$").unwrap());
static METADATA_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());
static DEFAULT_QUALIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+/[a-zA-Z]+$").unwrap());

/// A non-empty run of lowercase ASCII letters (type keys, tags, collection keys)
pub fn is_bare_word(s: &str) -> bool {
    BARE_WORD.is_match(s)
}

/// A non-empty run of ASCII letters
pub fn is_metadata_key(s: &str) -> bool {
    METADATA_KEY.is_match(s)
}

/// `type/metadataKey`, as used by default metadata declarations
pub fn is_default_qualifier(s: &str) -> bool {
    DEFAULT_QUALIFIER.is_match(s)
}

/// Split a comma separated word list.
///
/// Returns `None` if any element is not a bare word; the list is never
/// silently filtered.
pub fn split_validated_word_list(s: &str) -> Option<Vec<&str>> {
    let words: Vec<&str> = s.split(',').collect();
    if words.iter().all(|w| is_bare_word(w)) {
        Some(words)
    } else {
        None
    }
}

/// Split a comma separated membership list (tags, collections), trimming each
/// entry and dropping the ones that are not bare words. Repeated entries are
/// kept once, in order of first appearance.
pub fn filter_word_list(s: &str) -> Vec<&str> {
    let mut words: Vec<&str> = Vec::new();
    for word in s.split(',').map(str::trim) {
        if is_bare_word(word) && !words.contains(&word) {
            words.push(word);
        }
    }
    words
}
