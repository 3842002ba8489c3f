//! Stemming.

use core::fmt;
use std::borrow::Cow;

use rust_stemmers::Algorithm;

/// Reduces a word to a heuristic root by suffix stripping.
pub trait Stemmer: Send + Sync {
    /// Stems one word. Output is deterministic for a given input.
    fn stem<'w>(&self, word: &'w str) -> Cow<'w, str>;
}

/// Snowball stemmer; English uses the Porter2 algorithm.
pub struct SnowballStemmer {
    algorithm: Algorithm,
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    /// Creates a stemmer for `algorithm`.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            inner: rust_stemmers::Stemmer::create(algorithm),
        }
    }

    /// The English (Porter2) stemmer.
    pub fn english() -> Self {
        Self::new(Algorithm::English)
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Stemmer for SnowballStemmer {
    #[inline]
    fn stem<'w>(&self, word: &'w str) -> Cow<'w, str> {
        if word.is_empty() {
            return Cow::Borrowed(word);
        }
        self.inner.stem(word)
    }
}
