//! Conservative token-overlap test of brand names against a title corpus.

use std::collections::HashSet;

use crate::constants::mention::{MIN_SHARED_TOKENS, STRONG_TOKEN_LEN};
use crate::normalize::tokens;

/// `true` when any title plausibly names the brand.
///
/// Token overlap, not substring containment: a strong name token (>= 4 chars)
/// must appear verbatim among a title's tokens, or a multi-token name must
/// share at least two tokens with one title. A name reduced to a single short
/// token (e.g. `PIN`) never matches; short acronyms drown in false positives.
pub fn is_mentioned<T: AsRef<str>>(name: &str, titles: &[T]) -> bool {
    let name_tokens = tokens(name);
    if name_tokens.is_empty() {
        return false;
    }
    if name_tokens.len() == 1 && name_tokens[0].len() < STRONG_TOKEN_LEN {
        return false;
    }

    for title in titles {
        let title_tokens: HashSet<String> = tokens(title.as_ref()).into_iter().collect();
        if title_tokens.is_empty() {
            continue;
        }
        if name_tokens
            .iter()
            .any(|token| token.len() >= STRONG_TOKEN_LEN && title_tokens.contains(token))
        {
            return true;
        }
        if name_tokens.len() >= MIN_SHARED_TOKENS {
            let shared = name_tokens
                .iter()
                .filter(|token| title_tokens.contains(*token))
                .count();
            if shared >= MIN_SHARED_TOKENS {
                return true;
            }
        }
    }
    false
}
