use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Error returned when a configuration file cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Site generation settings.
///
/// User files are layered over the bundled defaults, so any key may be omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub content_dir: PathBuf,
    pub public_dir: PathBuf,
    pub static_dir: PathBuf,
    pub template: PathBuf,
    pub on_error: OnError,
}

/// What a site build does when one document fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Stop the build at the first failing document.
    Abort,
    /// Log the failure and carry on with the next file.
    Skip,
}

impl Default for Config {
    fn default() -> Self {
        Self::compiled_default()
    }
}

impl Config {
    /// Configuration bundled with the binary (`default_config.toml`).
    pub fn compiled_default() -> Self {
        // Validated by build.rs
        toml::from_str(DEFAULT_CONFIG).expect("bundled default_config.toml is valid")
    }

    /// Parse a config from TOML text; missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(DEFAULT_CONFIG)?;
        let overrides: toml::Table = toml::from_str(content)?;
        table.extend(overrides);
        Ok(toml::Value::Table(table).try_into()?)
    }

    /// Load config from a TOML file, or return defaults if not found.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::from_toml(&content)?;
        Ok(match path.parent() {
            Some(base) if !base.as_os_str().is_empty() => config.relative_to(base),
            _ => config,
        })
    }

    /// Resolve every relative path against `base`.
    pub fn relative_to(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        Self {
            content_dir: resolve(self.content_dir),
            public_dir: resolve(self.public_dir),
            static_dir: resolve(self.static_dir),
            template: resolve(self.template),
            on_error: self.on_error,
        }
    }
}
