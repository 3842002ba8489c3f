//! Token cleaning.
//!
//! Cleaning deletes every character that is not a word character, deletes
//! digits, then lowercases what is left. A word character is a letter, a
//! number or `_`. Tokens may clean down to the empty string; callers decide
//! whether to keep those.
//!
//! ASCII runs go through a lookup table that folds both the keep/drop
//! decision and lowercasing into one byte load. Non-ASCII characters take
//! the `char` path.

/// Per-byte clean result for ASCII: lowercase letter, `_`, or 0 to drop.
static CLEAN_TABLE: [u8; 128] = build_clean_table();

const fn build_clean_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        let b = i as u8;
        table[i] = match b {
            b'a'..=b'z' | b'_' => b,
            b'A'..=b'Z' => b + 32,
            _ => 0,
        };
        i += 1;
    }
    table
}

/// Returns `true` for letters, numbers and `_`.
#[inline(always)]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns `true` if `token` holds any character that is not a word character.
#[inline]
pub fn has_non_word(token: &str) -> bool {
    !token.chars().all(is_word_char)
}

/// Cleans `token` into `out`, clearing it first.
///
/// Reuses the buffer's capacity; grows only when needed.
#[inline]
pub fn clean_token_into(token: &str, out: &mut String) {
    out.clear();
    out.reserve(token.len());

    let bytes = token.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        if b < 128 {
            let mapped = CLEAN_TABLE[b as usize];
            if mapped != 0 {
                out.push(mapped as char);
            }
            i += 1;
            continue;
        }

        // `i` only ever stops on a char boundary: ASCII bytes advance by one
        // and multi-byte chars by their full encoded length.
        let Some(ch) = token[i..].chars().next() else {
            break;
        };
        i += ch.len_utf8();

        if ch.is_alphabetic() {
            out.extend(ch.to_lowercase());
        }
    }
}

/// Cleans `token` into a new string.
#[inline]
pub fn clean_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    clean_token_into(token, &mut out);
    out
}

/// Cleans every token of `tokens` in place.
///
/// One scratch buffer is swapped through the sequence, so cleaning a
/// sequence allocates at most once.
pub fn clean_all(tokens: &mut [String]) {
    let mut scratch = String::new();
    for token in tokens.iter_mut() {
        clean_token_into(token, &mut scratch);
        std::mem::swap(token, &mut scratch);
    }
}
