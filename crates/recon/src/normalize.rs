//! Text canonicalization for name and email comparison.

use std::borrow::Cow;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip combining diacritics: canonical decomposition, then drop every
/// combining mark. ASCII input is returned borrowed without decomposing.
pub fn fold_diacritics(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.nfd().filter(|c| !is_combining_mark(*c)).collect())
}

/// Canonical form used for full-name keys: diacritics folded, trimmed,
/// lowercased, whitespace runs collapsed to one space.
pub fn normalize(text: &str) -> String {
    let folded = fold_diacritics(text);
    let lowered = folded.trim().to_lowercase();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Email keys are only trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
