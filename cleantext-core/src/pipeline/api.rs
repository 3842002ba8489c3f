//! Public API for normalizing texts and records.

use cleantext_types::{CleanConfig, NormalizeError, Normalized, Record};

use crate::pipeline::stages::Work;
use crate::pipeline::types::{Normalizer, Stage};
use crate::resources::Resources;

impl Normalizer {
    /// Runs every planned stage over `text` and shapes the result.
    ///
    /// `text` is raw bytes: the part-of-speech path requires valid UTF-8,
    /// the other paths replace invalid sequences.
    ///
    /// # Errors
    ///
    /// Returns `NormalizeError::Decode` if the part-of-speech path receives
    /// invalid UTF-8.
    pub fn normalize(&self, text: &[u8]) -> Result<Normalized, NormalizeError> {
        let mut work = Work::new(text);
        for &stage in &self.stages {
            self.run_stage(stage, &mut work)?;
        }

        let normalized = Normalized::shape(work.tokens, work.tags, self.config.multivalue);
        tracing::debug!(tokens = normalized.token_count, "text normalized");
        Ok(normalized)
    }

    /// Normalizes a string.
    ///
    /// # Errors
    ///
    /// Same as [`Normalizer::normalize`], which cannot report a decode
    /// error for a `&str`.
    pub fn normalize_str(&self, text: &str) -> Result<Normalized, NormalizeError> {
        self.normalize(text.as_bytes())
    }

    /// Normalizes the text field of `record` and returns the record.
    ///
    /// The text field is replaced in place and, on the part-of-speech path,
    /// the tag field is set. Every other field passes through untouched and
    /// in order.
    ///
    /// # Errors
    ///
    /// Returns `NormalizeError::MissingField` if the record lacks the text
    /// field and `NormalizeError::NotText` if it holds a multivalue.
    pub fn process(&self, mut record: Record) -> Result<Record, NormalizeError> {
        self.process_in_place(&mut record)?;
        Ok(record)
    }

    /// Like [`Normalizer::process`], in place. Returns the token count.
    ///
    /// On error the record is left unmodified.
    pub fn process_in_place(&self, record: &mut Record) -> Result<usize, NormalizeError> {
        let field = &self.config.textfield;
        let text = record
            .get(field)
            .ok_or_else(|| NormalizeError::MissingField(field.clone()))?
            .as_text()
            .ok_or_else(|| NormalizeError::NotText(field.clone()))?;

        let normalized = self.normalize(text.as_bytes())?;

        record.insert(field.as_str(), normalized.tokens);
        if let Some(tags) = normalized.tags {
            record.insert(self.config.tag_field.as_str(), tags);
        }
        Ok(normalized.token_count)
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &CleanConfig {
        &self.config
    }

    /// Returns the planned stages in execution order.
    #[inline]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Returns the resource bundle.
    #[inline]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }
}
