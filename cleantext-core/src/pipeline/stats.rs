//! Statistics and StreamStats.

/// Counters for one record stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Records pulled from the input.
    pub records_in: u64,
    /// Records yielded normalized.
    pub emitted: u64,
    /// Records dropped by the `skip` policy.
    pub skipped: u64,
    /// Records yielded unchanged by the `passthrough` policy.
    pub passed_through: u64,
    /// Records that ended the stream under the `fail` policy.
    pub failed: u64,
    /// Tokens across all emitted records.
    pub tokens: u64,
}

impl StreamStats {
    /// Average tokens per normalized record.
    pub fn tokens_per_record(&self) -> f64 {
        if self.emitted == 0 {
            0.0
        } else {
            self.tokens as f64 / self.emitted as f64
        }
    }

    /// Records that did not normalize, whatever the policy did with them.
    pub fn errors(&self) -> u64 {
        self.skipped + self.passed_through + self.failed
    }
}

impl core::fmt::Display for StreamStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} records in, {} emitted, {} tokens ({:.1}/record)",
            self.records_in,
            self.emitted,
            self.tokens,
            self.tokens_per_record()
        )?;

        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        if self.passed_through > 0 {
            write!(f, ", {} passed through", self.passed_through)?;
        }
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }

        Ok(())
    }
}
