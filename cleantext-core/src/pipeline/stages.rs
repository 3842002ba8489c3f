//! Stage execution.

use std::borrow::Cow;

use cleantext_types::{NormalizeError, TaggedToken};

use crate::analyzer::{
    clean_all, clean_token, has_non_word, strip_urls, wordnet_pos, PartOfSpeech, Tokenizer,
};
use crate::pipeline::types::{BaseMode, InlineFilter, Normalizer, Stage, TokenizePath};

/// Intermediate state of one record between stages.
pub(crate) struct Work<'a> {
    pub(crate) bytes: Cow<'a, [u8]>,
    pub(crate) tokens: Vec<String>,
    pub(crate) tagged: Vec<TaggedToken>,
    pub(crate) tags: Option<Vec<String>>,
}

impl<'a> Work<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes: Cow::Borrowed(bytes),
            tokens: Vec::new(),
            tagged: Vec::new(),
            tags: None,
        }
    }
}

impl Normalizer {
    pub(crate) fn run_stage(&self, stage: Stage, work: &mut Work<'_>) -> Result<(), NormalizeError> {
        match stage {
            Stage::StripUrls => {
                let stripped = match strip_urls(&work.bytes) {
                    Cow::Owned(bytes) => Some(bytes),
                    Cow::Borrowed(_) => None,
                };
                if let Some(bytes) = stripped {
                    work.bytes = Cow::Owned(bytes);
                }
            }
            Stage::Tokenize(path) => self.tokenize(path, work)?,
            Stage::Clean => clean_all(&mut work.tokens),
            Stage::Reduce {
                mode,
                drop_stopwords,
            } => self.reduce(mode, drop_stopwords, work),
            Stage::FilterStopwords => self.resources.stopwords.retain_content(&mut work.tokens),
        }
        Ok(())
    }

    fn tokenize(&self, path: TokenizePath, work: &mut Work<'_>) -> Result<(), NormalizeError> {
        match path {
            TokenizePath::Tagged { tagset, inline } => {
                let text = std::str::from_utf8(&work.bytes).map_err(NormalizeError::Decode)?;
                let words = self.resources.word_tokenizer.tokenize(text);
                let mut tagged = self.resources.tagger.tag(words, tagset);
                self.filter_tagged(inline, &mut tagged);
                work.tagged = tagged;
            }
            TokenizePath::Treebank => {
                let text = String::from_utf8_lossy(&work.bytes);
                work.tokens = self.resources.word_tokenizer.tokenize(&text);
            }
            TokenizePath::Split(split) => {
                let text = String::from_utf8_lossy(&work.bytes);
                work.tokens = Tokenizer::new(split).collect(&text);
            }
        }
        Ok(())
    }

    /// Cleans tagged tokens in place, dropping pairs whose raw token holds a
    /// non-word character and, if asked, pairs that clean to a stopword.
    fn filter_tagged(&self, inline: InlineFilter, tagged: &mut Vec<TaggedToken>) {
        let drop_stopwords = match inline {
            InlineFilter::Off => return,
            InlineFilter::Clean => false,
            InlineFilter::CleanAndDropStopwords => true,
        };
        let stopwords = &self.resources.stopwords;

        tagged.retain_mut(|pair| {
            if has_non_word(&pair.text) {
                return false;
            }
            let cleaned = clean_token(&pair.text);
            if drop_stopwords && stopwords.contains(&cleaned) {
                return false;
            }
            pair.text = cleaned;
            true
        });
    }

    fn reduce(&self, mode: BaseMode, drop_stopwords: bool, work: &mut Work<'_>) {
        if drop_stopwords {
            self.resources.stopwords.retain_content(&mut work.tokens);
        }

        match mode {
            BaseMode::LemmaPos => {
                let tagset = self.config.pos_tagset;
                let pairs = std::mem::take(&mut work.tagged);
                let mut tokens = Vec::with_capacity(pairs.len());
                let mut tags = Vec::with_capacity(pairs.len());

                for TaggedToken { text, tag } in pairs {
                    let lemma = self
                        .resources
                        .lemmatizer
                        .lemmatize(&text, wordnet_pos(&tag, tagset));
                    if lemma.is_empty() {
                        continue;
                    }
                    tokens.push(lemma.into_owned());
                    tags.push(tag);
                }

                work.tokens = tokens;
                work.tags = Some(tags);
            }
            BaseMode::Lemma => {
                let lemmatizer = &self.resources.lemmatizer;
                for token in &mut work.tokens {
                    let lemma = match lemmatizer.lemmatize(token, PartOfSpeech::Noun) {
                        Cow::Owned(lemma) => Some(lemma),
                        Cow::Borrowed(_) => None,
                    };
                    if let Some(lemma) = lemma {
                        *token = lemma;
                    }
                }
            }
            BaseMode::Stem => {
                let stemmer = &self.resources.stemmer;
                for token in &mut work.tokens {
                    let stem = match stemmer.stem(token) {
                        Cow::Owned(stem) => Some(stem),
                        Cow::Borrowed(_) => None,
                    };
                    if let Some(stem) = stem {
                        *token = stem;
                    }
                }
            }
        }
    }
}
