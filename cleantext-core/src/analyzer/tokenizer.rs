//! Split Tokenizer Module
//!
//! The fast tokenizers of the default path. They never allocate per token:
//! tokens are slices of the input handed to a callback together with their
//! position, in left-to-right order.
//!
//! ## Strategies
//!
//! - [`Split::NonWord`]: splits on maximal runs of non-word characters.
//!   A run at the very start or end of the text produces an empty leading or
//!   trailing token, and empty text produces one empty token:
//!
//! ```ignore
//! "Hello, world!"  ->  ["Hello", "world", ""]
//! ""               ->  [""]
//! ```
//!
//! - [`Split::Whitespace`]: splits on runs of whitespace and never emits
//!   empty tokens:
//!
//! ```ignore
//! "  Cats are\tFAST "  ->  ["Cats", "are", "FAST"]
//! ```
//!
//! Empty tokens from the non-word split are kept on purpose: later stages
//! decide what to do with them.

use super::cleaner::is_word_char;

/// Token boundary rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Split {
    /// Runs of whitespace separate tokens.
    Whitespace = 0,
    /// Runs of non-word characters separate tokens.
    NonWord = 1,
}

/// Streaming tokenizer for one [`Split`] rule.
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct Tokenizer {
    split: Split,
}

impl Tokenizer {
    /// Creates a tokenizer using `split`.
    #[inline]
    pub const fn new(split: Split) -> Self {
        Self { split }
    }

    /// Returns the split rule.
    #[inline]
    pub const fn split(&self) -> Split {
        self.split
    }

    /// Tokenizes `text` and emits `(token, position)`.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop.
    #[inline]
    pub fn tokenize<'t, F>(&self, text: &'t str, emit: F)
    where
        F: FnMut(&'t str, u32),
    {
        match self.split {
            Split::Whitespace => tokenize_whitespace(text, emit),
            Split::NonWord => tokenize_non_word(text, emit),
        }
    }

    /// Tokenizes `text` into owned tokens.
    pub fn collect(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.tokenize(text, |token, _| out.push(token.to_owned()));
        out
    }
}

fn tokenize_whitespace<'t, F>(text: &'t str, mut emit: F)
where
    F: FnMut(&'t str, u32),
{
    for (pos, token) in text.split_whitespace().enumerate() {
        let Ok(pos) = u32::try_from(pos) else {
            return;
        };
        emit(token, pos);
    }
}

fn tokenize_non_word<'t, F>(text: &'t str, mut emit: F)
where
    F: FnMut(&'t str, u32),
{
    let mut start = 0usize;
    let mut in_separator = false;
    let mut pos = 0u32;

    for (i, c) in text.char_indices() {
        if is_word_char(c) {
            if in_separator {
                start = i;
                in_separator = false;
            }
        } else if !in_separator {
            emit(&text[start..i], pos);
            if pos == u32::MAX {
                return;
            }
            pos += 1;
            in_separator = true;
        }
    }

    let tail = if in_separator { text.len() } else { start };
    emit(&text[tail..], pos);
}
