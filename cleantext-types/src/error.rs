//! Error types shared across the cleantext crates.
//!
//! Errors fall into three groups that match when they can surface:
//!
//! - [`ConfigError`]: before any record is processed, fatal to the run
//! - [`ResourceError`]: while loading linguistic resources, fatal to the run
//! - [`NormalizeError`]: per record, the stream's error policy decides
//!
//! [`BuildError`] wraps the first two for constructors that do both.

use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Invalid or incomplete configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The required `textfield` option was empty or absent.
    #[error("missing required option `textfield`")]
    MissingTextField,
    /// An enumerated option received a value outside its choices.
    #[error("invalid value `{value}` for `{option}` (expected one of: {expected})")]
    InvalidChoice {
        /// Option name as written on the command line.
        option: &'static str,
        /// The rejected value.
        value: String,
        /// Comma separated list of accepted values.
        expected: &'static str,
    },
    /// A boolean option received something that is not a boolean.
    #[error("invalid boolean `{value}` for `{option}`")]
    InvalidBool {
        /// Option name as written on the command line.
        option: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The configuration file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid TOML or has unknown values.
    #[error("cannot parse config file {}: {message}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// A linguistic resource could not be loaded.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource file could not be read.
    #[error("cannot read resource {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line of the resource file does not follow the expected format.
    #[error("malformed entry in {} at line {line}: {reason}", path.display())]
    Malformed {
        /// File that failed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: &'static str,
    },
    /// The resource file had no usable entries.
    #[error("resource {} contains no entries", path.display())]
    Empty {
        /// File that failed.
        path: PathBuf,
    },
}

/// A normalizer could not be built.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A resource named by the configuration failed to load.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Failure while normalizing a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The record has no value under the configured text field.
    #[error("record has no field `{0}`")]
    MissingField(String),
    /// The text field holds a multivalue instead of a single string.
    #[error("field `{0}` is not a single text value")]
    NotText(String),
    /// The text could not be decoded for part-of-speech tagging.
    #[error("text is not valid UTF-8: {0}")]
    Decode(#[source] Utf8Error),
}
