//! Punctuation handling for true words and distractors

use crate::PLACEHOLDER;

fn is_punct(ch: char) -> bool {
    !ch.is_alphanumeric()
}

/// Remove leading and trailing punctuation, keeping internal characters
///
/// `"don't,"` becomes `"don't"`, `"(well-known)"` becomes `"well-known"`.
pub fn strip_punct(word: &str) -> &str {
    word.trim_matches(is_punct)
}

/// Strip punctuation and lower-case, the form used for vocabulary lookups
pub fn normalize(word: &str) -> String {
    strip_punct(word).to_lowercase()
}

/// Split a word into its leading punctuation, core and trailing punctuation
fn split_punct(word: &str) -> (&str, &str, &str) {
    let core_start = word.find(|c: char| !is_punct(c)).unwrap_or(word.len());
    let rest = &word[core_start..];
    let core_len = rest.trim_end_matches(is_punct).len();
    (&word[..core_start], &rest[..core_len], &rest[core_len..])
}

/// Give `distractor` the punctuation shape of `word`
///
/// Leading and trailing punctuation of `word` is copied around the
/// distractor, and a capitalized word yields a capitalized distractor.
/// The placeholder is never re-cased.
pub fn copy_punct(word: &str, distractor: &str) -> String {
    let (lead, core, trail) = split_punct(word);
    let capitalize = distractor != PLACEHOLDER
        && core.chars().next().is_some_and(char::is_uppercase);

    let mut out = String::with_capacity(lead.len() + distractor.len() + trail.len());
    out.push_str(lead);
    if capitalize {
        let mut chars = distractor.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    } else {
        out.push_str(distractor);
    }
    out.push_str(trail);
    out
}
