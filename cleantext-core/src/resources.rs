//! Linguistic resources shared by every record of a run.

use core::fmt;
use std::sync::Arc;

use cleantext_types::{CleanConfig, ResourceError};

use crate::analyzer::{
    Lemmatizer, PosTagger, RuleLemmatizer, RuleTagger, SnowballStemmer, Stemmer, StopwordSet,
    TreebankTokenizer, WordTokenizer,
};

/// The loaded, immutable resource bundle.
///
/// Cloning is cheap: every component sits behind an `Arc`.
#[derive(Clone)]
pub struct Resources {
    pub(crate) stopwords: Arc<StopwordSet>,
    pub(crate) word_tokenizer: Arc<dyn WordTokenizer>,
    pub(crate) tagger: Arc<dyn PosTagger>,
    pub(crate) lemmatizer: Arc<dyn Lemmatizer>,
    pub(crate) stemmer: Arc<dyn Stemmer>,
}

impl Default for Resources {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Resources {
    /// Built-in English resources.
    pub fn builtin() -> Self {
        Self {
            stopwords: Arc::new(StopwordSet::english()),
            word_tokenizer: Arc::new(TreebankTokenizer::new()),
            tagger: Arc::new(RuleTagger::new()),
            lemmatizer: Arc::new(RuleLemmatizer::new()),
            stemmer: Arc::new(SnowballStemmer::english()),
        }
    }

    /// Built-in resources with the files named in `config` loaded on top.
    ///
    /// # Errors
    ///
    /// Returns the first `ResourceError` from reading the stopword list or
    /// the lemma lexicon.
    pub fn load(config: &CleanConfig) -> Result<Self, ResourceError> {
        let mut resources = Self::builtin();

        if let Some(path) = &config.stopwords_path {
            let set = StopwordSet::load(path)?;
            tracing::debug!(path = %path.display(), words = set.len(), "stopwords loaded");
            resources.stopwords = Arc::new(set);
        }
        if let Some(path) = &config.lexicon_path {
            resources.lemmatizer = Arc::new(RuleLemmatizer::with_lexicon(path)?);
        }

        Ok(resources)
    }

    /// Replaces the stopword set.
    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = Arc::new(stopwords);
        self
    }

    /// Replaces the linguistic word tokenizer.
    pub fn with_word_tokenizer(mut self, tokenizer: impl WordTokenizer + 'static) -> Self {
        self.word_tokenizer = Arc::new(tokenizer);
        self
    }

    /// Replaces the part-of-speech tagger.
    pub fn with_tagger(mut self, tagger: impl PosTagger + 'static) -> Self {
        self.tagger = Arc::new(tagger);
        self
    }

    /// Replaces the lemmatizer.
    pub fn with_lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Arc::new(lemmatizer);
        self
    }

    /// Replaces the stemmer.
    pub fn with_stemmer(mut self, stemmer: impl Stemmer + 'static) -> Self {
        self.stemmer = Arc::new(stemmer);
        self
    }

    /// The stopword set.
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}

impl fmt::Debug for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resources")
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::io::Write;

    struct Upper;

    impl Stemmer for Upper {
        fn stem<'w>(&self, word: &'w str) -> Cow<'w, str> {
            Cow::Owned(word.to_uppercase())
        }
    }

    #[test]
    fn builtin_is_english() {
        let r = Resources::builtin();
        assert_eq!(r.stopwords().len(), 179);
        assert_eq!(r.stemmer.stem("running"), "run");
    }

    #[test]
    fn load_without_paths_is_builtin() {
        let r = Resources::load(&CleanConfig::new("text")).unwrap();
        assert_eq!(r.stopwords().len(), 179);
    }

    #[test]
    fn load_reads_stopword_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha\nbeta").unwrap();
        let mut config = CleanConfig::new("text");
        config.stopwords_path = Some(file.path().to_path_buf());

        let r = Resources::load(&config).unwrap();
        assert_eq!(r.stopwords().len(), 2);
        assert!(r.stopwords().contains("alpha"));
    }

    #[test]
    fn load_propagates_missing_file() {
        let mut config = CleanConfig::new("text");
        config.lexicon_path = Some("/no/such/lexicon.tsv".into());
        assert!(matches!(
            Resources::load(&config),
            Err(ResourceError::Read { .. })
        ));
    }

    #[test]
    fn components_can_be_replaced() {
        let r = Resources::builtin()
            .with_stemmer(Upper)
            .with_stopwords(StopwordSet::from_words(["x"]));
        assert_eq!(r.stemmer.stem("abc"), "ABC");
        assert_eq!(r.stopwords().len(), 1);
    }

    #[test]
    fn debug_is_compact() {
        let s = format!("{:?}", Resources::builtin());
        assert!(s.starts_with("Resources"));
        assert!(s.contains("179"));
    }
}
