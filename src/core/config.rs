use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::alphabet::Alphabet;
use crate::encoders::algorithms::errors::{ConfigError, find_closest_alphabet};
use crate::encoders::codec::Codec;

/// Configuration for a single named alphabet loaded from TOML.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct AlphabetConfig {
    /// The symbols comprising the alphabet (explicit list)
    #[serde(default)]
    pub chars: String,
    /// First symbol of a range-based definition, used with `length`
    #[serde(default)]
    pub start: Option<String>,
    /// Number of sequential code points in a range-based definition
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default)]
    pub description: Option<String>,
}

impl AlphabetConfig {
    /// Returns the effective symbol set, generating it from the range if needed.
    ///
    /// Explicit `chars` take priority over `start` + `length`.
    pub fn effective_chars(&self) -> Result<String, ConfigError> {
        if !self.chars.is_empty() {
            return Ok(self.chars.clone());
        }

        if let (Some(start), Some(length)) = (&self.start, self.length) {
            let first = start.chars().next().ok_or_else(|| {
                ConfigError::InvalidRange("start must contain at least one character".into())
            })?;
            return Self::generate_range(first as u32, length);
        }

        Err(ConfigError::EmptyDefinition)
    }

    /// Generate a string of sequential Unicode characters from a range.
    fn generate_range(start: u32, length: usize) -> Result<String, ConfigError> {
        const MAX_UNICODE: u32 = 0x10FFFF;
        const SURROGATE_START: u32 = 0xD800;
        const SURROGATE_END: u32 = 0xDFFF;

        if length == 0 {
            return Err(ConfigError::InvalidRange(
                "length must be greater than 0".into(),
            ));
        }

        let end = u32::try_from(length - 1)
            .ok()
            .and_then(|offset| start.checked_add(offset))
            .filter(|&end| end <= MAX_UNICODE)
            .ok_or_else(|| {
                ConfigError::InvalidRange(format!(
                    "range starting at U+{start:04X} with {length} symbols exceeds U+{MAX_UNICODE:X}"
                ))
            })?;

        if start <= SURROGATE_END && end >= SURROGATE_START {
            return Err(ConfigError::InvalidRange(format!(
                "range U+{start:04X}..U+{end:04X} crosses surrogate gap (U+D800..U+DFFF)"
            )));
        }

        (start..=end)
            .map(|cp| {
                char::from_u32(cp).ok_or_else(|| {
                    ConfigError::InvalidRange(format!("invalid codepoint U+{cp:04X}"))
                })
            })
            .collect()
    }

    pub fn build(&self) -> Result<Alphabet, ConfigError> {
        Ok(Alphabet::new(&self.effective_chars()?)?)
    }
}

/// Named alphabets, keyed by name.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AlphabetRegistry {
    #[serde(default)]
    pub alphabets: HashMap<String, AlphabetConfig>,
}

impl AlphabetRegistry {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The alphabets shipped with the crate.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_toml(include_str!("../../alphabets.toml"))
    }

    /// Load configuration from custom file path
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration with user overrides from standard locations
    /// 1. Start with built-in alphabets
    /// 2. Override with ~/.config/suuid/alphabets.toml if it exists
    /// 3. Override with ./alphabets.toml if it exists in current directory
    pub fn load_with_overrides() -> Result<Self, ConfigError> {
        let mut config = Self::load_default()?;

        let user_path = dirs::config_dir().map(|dir| dir.join("suuid").join("alphabets.toml"));
        let local_path = Some(PathBuf::from("alphabets.toml"));

        for path in [user_path, local_path].into_iter().flatten() {
            config.merge_file(&path);
        }

        Ok(config)
    }

    /// Merges `path` if it exists; a file that fails to load is skipped.
    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(overrides) => {
                tracing::debug!(
                    path = %path.display(),
                    count = overrides.alphabets.len(),
                    "loaded alphabet overrides"
                );
                self.merge(overrides);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load alphabet config");
            }
        }
    }

    /// Merge another config into this one, overriding existing alphabets
    pub fn merge(&mut self, other: AlphabetRegistry) {
        self.alphabets.extend(other.alphabets);
    }

    pub fn get(&self, name: &str) -> Option<&AlphabetConfig> {
        self.alphabets.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.alphabets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Builds the alphabet registered as `name`.
    pub fn alphabet(&self, name: &str) -> Result<Alphabet, ConfigError> {
        let config = self.get(name).ok_or_else(|| ConfigError::NotFound {
            name: name.to_string(),
            suggestion: find_closest_alphabet(name, self.names()),
        })?;
        config.build()
    }

    /// Builds a codec for the alphabet registered as `name`.
    pub fn codec(&self, name: &str) -> Result<Codec, ConfigError> {
        self.alphabet(name).map(Codec::new)
    }
}
