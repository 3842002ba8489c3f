//! Normalizer types and stage planning.

use core::fmt;

use cleantext_types::{BaseType, BuildError, CleanConfig, ConfigError, Tagset};
use smallvec::SmallVec;

use crate::analyzer::Split;
use crate::resources::Resources;

/// Upper bound on planned stages: urls, tokenize, clean, reduce or filter.
pub const MAX_STAGES: usize = 6;

/// What the tagged path does to each `(token, tag)` pair right after tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineFilter {
    /// Keep pairs as tagged.
    Off,
    /// Drop pairs whose token has a non-word character, clean the rest.
    Clean,
    /// As `Clean`, also dropping pairs whose cleaned token is a stopword.
    CleanAndDropStopwords,
}

/// Tokenization strategy. Exactly one runs per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizePath {
    /// Treebank tokenizer, then the tagger. Text must be valid UTF-8.
    Tagged {
        /// Requested tagset.
        tagset: Option<Tagset>,
        /// Pair filtering applied after tagging.
        inline: InlineFilter,
    },
    /// Treebank tokenizer, no tagging.
    Treebank,
    /// Fast split tokenizer.
    Split(Split),
}

/// Base-form reduction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseMode {
    /// Lemmatize each tagged token with a hint derived from its tag.
    LemmaPos,
    /// Lemmatize with the noun hint.
    Lemma,
    /// Stem.
    Stem,
}

impl From<BaseType> for BaseMode {
    fn from(value: BaseType) -> Self {
        match value {
            BaseType::Lemma => BaseMode::Lemma,
            BaseType::LemmaPos => BaseMode::LemmaPos,
            BaseType::Stem => BaseMode::Stem,
        }
    }
}

/// One pipeline stage. Stages run in the order they were planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Delete links from the raw bytes.
    StripUrls,
    /// Produce tokens (or tagged pairs).
    Tokenize(TokenizePath),
    /// Clean every token; empty results are kept.
    Clean,
    /// Reduce to base forms, optionally dropping stopwords first.
    Reduce {
        /// Reduction mode.
        mode: BaseMode,
        /// Drop stopwords before reducing.
        drop_stopwords: bool,
    },
    /// Drop stopwords without reducing.
    FilterStopwords,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::StripUrls => f.write_str("strip-urls"),
            Stage::Tokenize(TokenizePath::Tagged { .. }) => f.write_str("tokenize:tagged"),
            Stage::Tokenize(TokenizePath::Treebank) => f.write_str("tokenize:treebank"),
            Stage::Tokenize(TokenizePath::Split(Split::NonWord)) => f.write_str("tokenize:non-word"),
            Stage::Tokenize(TokenizePath::Split(Split::Whitespace)) => {
                f.write_str("tokenize:whitespace")
            }
            Stage::Clean => f.write_str("clean"),
            Stage::Reduce { mode, drop_stopwords } => {
                let mode = match mode {
                    BaseMode::LemmaPos => "lemma-pos",
                    BaseMode::Lemma => "lemma",
                    BaseMode::Stem => "stem",
                };
                if *drop_stopwords {
                    write!(f, "stopwords+{mode}")
                } else {
                    f.write_str(mode)
                }
            }
            Stage::FilterStopwords => f.write_str("stopwords"),
        }
    }
}

/// Per-record text normalizer.
///
/// Built once per run from a [`CleanConfig`] and a [`Resources`] bundle,
/// then shared read-only by every record. `Send + Sync`.
pub struct Normalizer {
    pub(crate) config: CleanConfig,
    pub(crate) resources: Resources,
    pub(crate) stages: SmallVec<[Stage; MAX_STAGES]>,
}

impl Normalizer {
    /// Validates `config`, loads the resources it names and plans the stages.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Config` for an invalid configuration and
    /// `BuildError::Resource` if a stopword list or lexicon fails to load.
    pub fn new(config: CleanConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let resources = Resources::load(&config)?;
        Self::with_resources(config, resources).map_err(BuildError::from)
    }

    /// Builds a normalizer over already loaded resources.
    ///
    /// Resource paths in `config` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingTextField` if `textfield` is blank.
    pub fn with_resources(config: CleanConfig, resources: Resources) -> Result<Self, ConfigError> {
        config.validate()?;
        let stages = plan(&config);

        tracing::info!(
            textfield = %config.textfield,
            stages = %StageList(&stages),
            multivalue = config.multivalue,
            "normalizer ready"
        );

        Ok(Self {
            config,
            resources,
            stages,
        })
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("textfield", &self.config.textfield)
            .field("stages", &self.stages)
            .field("resources", &self.resources)
            .finish()
    }
}

/// Renders stages as `a > b > c`.
pub(crate) struct StageList<'a>(pub(crate) &'a [Stage]);

impl fmt::Display for StageList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

/// Selects and orders the stages for `config`.
pub(crate) fn plan(config: &CleanConfig) -> SmallVec<[Stage; MAX_STAGES]> {
    let mut stages = SmallVec::new();

    if config.remove_urls {
        stages.push(Stage::StripUrls);
    }

    let path = if config.lemma_pos() {
        let inline = match (config.default_clean, config.remove_stopwords) {
            (false, _) => InlineFilter::Off,
            (true, false) => InlineFilter::Clean,
            (true, true) => InlineFilter::CleanAndDropStopwords,
        };
        TokenizePath::Tagged {
            tagset: config.pos_tagset,
            inline,
        }
    } else if config.force_tokenizer {
        TokenizePath::Treebank
    } else if config.default_clean || (config.base_word && config.base_type == BaseType::Lemma) {
        TokenizePath::Split(Split::NonWord)
    } else {
        TokenizePath::Split(Split::Whitespace)
    };
    stages.push(Stage::Tokenize(path));

    // The tagged path cleans inline.
    if config.default_clean && !matches!(path, TokenizePath::Tagged { .. }) {
        stages.push(Stage::Clean);
    }

    if config.base_word {
        let mode = BaseMode::from(config.base_type);
        stages.push(Stage::Reduce {
            mode,
            drop_stopwords: config.remove_stopwords && mode != BaseMode::LemmaPos,
        });
    } else if config.remove_stopwords {
        stages.push(Stage::FilterStopwords);
    }

    stages
}
