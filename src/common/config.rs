//! # Configuration
//!
//! Settings are read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) is a valid configuration.
//!
//! ```toml
//! [codec]
//! delimiter = "#"
//! shift = 3
//!
//! [logging]
//! level = "debug"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::codec::shift::DEFAULT_SHIFT;
use crate::codec::DELIMITER;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Top-level configuration for the `stego` binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StegoConfig {
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Codec parameters shared by every codec variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// End-of-message sentinel. Must fit in one byte for the fixed-width codecs.
    pub delimiter: char,
    /// Additive shift of the Caesar codec.
    pub shift: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            delimiter: DELIMITER,
            shift: DEFAULT_SHIFT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
