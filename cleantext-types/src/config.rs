//! Normalizer configuration.
//!
//! [`CleanConfig`] is fixed for the lifetime of a run and shared read-only
//! by every record. All options have the defaults of the `cleantext`
//! command except `textfield`, which is required.

use core::fmt;
use core::str::FromStr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the auxiliary field that receives part-of-speech tags.
pub const DEFAULT_TAG_FIELD: &str = "pos_tag";

/// Base-form reduction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    /// Part-of-speech agnostic lemmatization (noun hint).
    #[default]
    Lemma,
    /// Lemmatization guided by part-of-speech tags.
    LemmaPos,
    /// Suffix-stripping stemmer.
    Stem,
}

impl BaseType {
    const CHOICES: &'static str = "lemma, lemma_pos, stem";

    /// Returns the option spelling of this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            BaseType::Lemma => "lemma",
            BaseType::LemmaPos => "lemma_pos",
            BaseType::Stem => "stem",
        }
    }
}

impl FromStr for BaseType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "lemma" => Ok(BaseType::Lemma),
            "lemma_pos" => Ok(BaseType::LemmaPos),
            "stem" => Ok(BaseType::Stem),
            other => Err(ConfigError::InvalidChoice {
                option: "base_type",
                value: other.to_owned(),
                expected: Self::CHOICES,
            }),
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part-of-speech tagset requested from the tagger.
///
/// An unset tagset (`None` in [`CleanConfig::pos_tagset`]) yields the
/// tagger's native Penn Treebank tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tagset {
    /// The 12-tag universal tagset.
    Universal,
    /// Wall Street Journal (Penn Treebank) tags.
    Wsj,
    /// Brown corpus tags.
    Brown,
}

impl Tagset {
    const CHOICES: &'static str = "universal, wsj, brown";

    /// Returns the option spelling of this tagset.
    pub const fn as_str(self) -> &'static str {
        match self {
            Tagset::Universal => "universal",
            Tagset::Wsj => "wsj",
            Tagset::Brown => "brown",
        }
    }
}

impl FromStr for Tagset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "universal" => Ok(Tagset::Universal),
            "wsj" => Ok(Tagset::Wsj),
            "brown" => Ok(Tagset::Brown),
            other => Err(ConfigError::InvalidChoice {
                option: "pos_tagset",
                value: other.to_owned(),
                expected: Self::CHOICES,
            }),
        }
    }
}

impl fmt::Display for Tagset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a record stream does when a single record fails to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Yield the error and end the stream.
    #[default]
    Fail,
    /// Drop the record and continue.
    Skip,
    /// Yield the record unchanged and continue.
    #[serde(alias = "passthrough")]
    PassThrough,
}

impl ErrorPolicy {
    const CHOICES: &'static str = "fail, skip, passthrough";
}

impl FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fail" => Ok(ErrorPolicy::Fail),
            "skip" => Ok(ErrorPolicy::Skip),
            "passthrough" | "pass_through" => Ok(ErrorPolicy::PassThrough),
            other => Err(ConfigError::InvalidChoice {
                option: "on_error",
                value: other.to_owned(),
                expected: Self::CHOICES,
            }),
        }
    }
}

/// Normalizer configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Field holding the text to normalize. Required.
    pub textfield: String,
    /// Lowercase tokens and strip punctuation and digits.
    pub default_clean: bool,
    /// Delete `http://` and `https://` links before tokenizing.
    pub remove_urls: bool,
    /// Drop stopwords.
    pub remove_stopwords: bool,
    /// Reduce words to a base form, as selected by `base_type`.
    pub base_word: bool,
    /// Base-form reduction mode.
    pub base_type: BaseType,
    /// Emit token sequences instead of space-joined strings.
    #[serde(alias = "mv")]
    pub multivalue: bool,
    /// Use the treebank word tokenizer even without part-of-speech tagging.
    #[serde(alias = "force_nltk_tokenize")]
    pub force_tokenizer: bool,
    /// Tagset for the part-of-speech tagger; `None` keeps native tags.
    pub pos_tagset: Option<Tagset>,
    /// Field that receives part-of-speech tags in `lemma_pos` mode.
    pub tag_field: String,
    /// Replacement stopword list, one word per line.
    pub stopwords_path: Option<PathBuf>,
    /// Extra lemmatizer entries, `word<TAB>lemma[<TAB>pos]` per line.
    pub lexicon_path: Option<PathBuf>,
    /// Per-record error handling for record streams.
    pub on_error: ErrorPolicy,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            textfield: String::new(),
            default_clean: true,
            remove_urls: true,
            remove_stopwords: true,
            base_word: true,
            base_type: BaseType::Lemma,
            multivalue: true,
            force_tokenizer: false,
            pos_tagset: None,
            tag_field: DEFAULT_TAG_FIELD.to_owned(),
            stopwords_path: None,
            lexicon_path: None,
            on_error: ErrorPolicy::Fail,
        }
    }
}

impl CleanConfig {
    /// Creates the default configuration for `textfield`.
    pub fn new(textfield: impl Into<String>) -> Self {
        Self {
            textfield: textfield.into(),
            ..Self::default()
        }
    }

    /// Cleaning only: no URL removal, stopwords or base forms.
    pub fn minimal(textfield: impl Into<String>) -> Self {
        Self {
            remove_urls: false,
            remove_stopwords: false,
            base_word: false,
            ..Self::new(textfield)
        }
    }

    /// Defaults with stemming instead of lemmatization.
    pub fn stemmed(textfield: impl Into<String>) -> Self {
        Self {
            base_type: BaseType::Stem,
            ..Self::new(textfield)
        }
    }

    /// Returns `true` when the part-of-speech aware lemmatization path runs.
    #[inline]
    pub fn lemma_pos(&self) -> bool {
        self.base_word && self.base_type == BaseType::LemmaPos
    }

    /// Checks the options that cannot be expressed in the types.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingTextField` if `textfield` is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.textfield.trim().is_empty() {
            return Err(ConfigError::MissingTextField);
        }
        Ok(())
    }
}

/// Parses a boolean option value.
///
/// Accepts `1/0`, `true/false`, `t/f`, `yes/no` and `y/n`, ignoring case.
///
/// # Errors
///
/// Returns `ConfigError::InvalidBool` naming `option` for anything else.
pub fn parse_bool(option: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" => Ok(true),
        "0" | "false" | "f" | "no" | "n" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            option,
            value: value.to_owned(),
        }),
    }
}
