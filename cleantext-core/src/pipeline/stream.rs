//! Lazy record streams.

use cleantext_types::{ErrorPolicy, NormalizeError, Record};

use crate::pipeline::stats::StreamStats;
use crate::pipeline::types::Normalizer;

/// Iterator adapter normalizing records one at a time.
///
/// One record is pulled per item; nothing is buffered and order is kept.
/// What happens to a record that fails depends on the [`ErrorPolicy`].
#[derive(Debug)]
pub struct NormalizeStream<'n, I> {
    normalizer: &'n Normalizer,
    records: I,
    policy: ErrorPolicy,
    stats: StreamStats,
    done: bool,
}

impl<'n, I> NormalizeStream<'n, I> {
    /// Overrides the error policy taken from the configuration.
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Counters so far.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }
}

impl Normalizer {
    /// Wraps `records` in a lazy normalizing stream.
    pub fn stream<I>(&self, records: I) -> NormalizeStream<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Record>,
    {
        NormalizeStream {
            normalizer: self,
            records: records.into_iter(),
            policy: self.config.on_error,
            stats: StreamStats::default(),
            done: false,
        }
    }
}

impl<I> Iterator for NormalizeStream<'_, I>
where
    I: Iterator<Item = Record>,
{
    type Item = Result<Record, NormalizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let mut record = self.records.next()?;
            self.stats.records_in += 1;
            let index = self.stats.records_in;

            let err = match self.normalizer.process_in_place(&mut record) {
                Ok(tokens) => {
                    self.stats.emitted += 1;
                    self.stats.tokens += tokens as u64;
                    return Some(Ok(record));
                }
                Err(err) => err,
            };

            match self.policy {
                ErrorPolicy::Fail => {
                    tracing::error!(record = index, error = %err, "normalization failed, stopping");
                    self.stats.failed += 1;
                    self.done = true;
                    return Some(Err(err));
                }
                ErrorPolicy::Skip => {
                    tracing::warn!(record = index, error = %err, "skipping record");
                    self.stats.skipped += 1;
                }
                ErrorPolicy::PassThrough => {
                    tracing::warn!(record = index, error = %err, "passing record through unchanged");
                    self.stats.passed_through += 1;
                    return Some(Ok(record));
                }
            }
        }
    }
}
