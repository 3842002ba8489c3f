//! Configuration file loading.

use std::fs;
use std::path::Path;

use cleantext_types::{CleanConfig, ConfigError};

/// Reads a TOML configuration file.
///
/// Options missing from the file keep their defaults. The result is not
/// validated, so that a command line can still supply `textfield`.
///
/// # Errors
///
/// Returns `ConfigError::Read` if the file cannot be read and
/// `ConfigError::Parse` if it is not valid TOML or holds unknown values.
pub fn load_config(path: &Path) -> Result<CleanConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&data).map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_owned(),
    })
}
