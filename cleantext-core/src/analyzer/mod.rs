//! Text analysis building blocks.
//!
//! This module provides the per-token components the normalizer strings
//! together:
//! - **Urls**: Deletes `http(s)://` links from raw bytes
//! - **Tokenizer**: Whitespace / non-word split, zero-copy
//! - **Treebank**: Penn Treebank word tokenizer
//! - **Cleaner**: Strips non-word characters and digits, lowercases
//! - **Tagger**: Part-of-speech tags in Penn, universal or Brown form
//! - **Lemmatizer** / **Stemmer**: Base-form reduction
//! - **Stopwords**: Function word set

pub mod cleaner;
pub mod lemmatizer;
pub mod stemmer;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;
pub mod treebank;
pub mod urls;

pub use cleaner::{clean_all, clean_token, clean_token_into, has_non_word};
pub use lemmatizer::{Lemmatizer, PartOfSpeech, RuleLemmatizer};
pub use stemmer::{SnowballStemmer, Stemmer};
pub use stopwords::StopwordSet;
pub use tagger::{wordnet_pos, PosTagger, RuleTagger};
pub use tokenizer::{Split, Tokenizer};
pub use treebank::{TreebankTokenizer, WordTokenizer};
pub use urls::strip_urls;
