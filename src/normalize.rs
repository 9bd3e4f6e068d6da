//! Text folding helpers shared by the catalog and the mention matcher.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::constants::mention::MIN_TOKEN_LEN;

/// Fold a surface string into its canonical lookup key.
///
/// Lowercases, NFKD-decomposes, drops combining marks, and keeps only
/// `[a-z0-9]`. Total and pure; empty input yields an empty key.
pub fn normalize<T: AsRef<str>>(text: T) -> String {
    let mut key = String::new();
    for ch in text.as_ref().trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        for lowered in ch.to_lowercase() {
            if lowered.is_ascii_alphanumeric() {
                key.push(lowered);
            }
        }
    }
    key
}

/// Trim entries, drop empties, and deduplicate case-insensitively.
///
/// The first occurrence of each case-folded form wins and original casing is
/// preserved, so curated catalog order survives deduplication.
pub fn uniq_case_insensitive<I, T>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let trimmed = item.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Split text into normalized alphanumeric runs.
///
/// Single-character runs carry too little signal and are discarded.
pub fn tokens(text: &str) -> Vec<String> {
    let folded: String = text
        .trim()
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(|ch| ch.to_lowercase())
        .collect();
    folded
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|run| run.len() >= MIN_TOKEN_LEN)
        .map(|run| run.to_string())
        .collect()
}
