//! Per-record text normalization.
//!
//! Strips links, tokenizes, cleans, reduces words to a base form and drops
//! stopwords from one text field of each record, leaving every other field
//! as it was.
//!
//! ```no_run
//! use cleantext_core::{CleanConfig, Normalizer};
//!
//! let normalizer = Normalizer::new(CleanConfig::new("text"))?;
//! let out = normalizer.normalize_str("Check this out http://x.co/a great site!!")?;
//! assert_eq!(out.tokens.as_multi().unwrap(), ["check", "great", "site", ""]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analyzer;
pub mod config;
pub mod pipeline;
pub mod resources;

pub use cleantext_types::{
    BaseType, BuildError, CleanConfig, ConfigError, ErrorPolicy, FieldValue, NormalizeError,
    Normalized, Record, ResourceError, Shaped, Tagset,
};
pub use config::load_config;
pub use pipeline::{NormalizeStream, Normalizer, Stage, StreamStats};
pub use resources::Resources;
