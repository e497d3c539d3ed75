//! Parser configuration.

use crate::env::{EnvLoader, DEFAULT_PREFIX};
use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// How malformed status and header lines are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Malformed lines are logged and skipped. A bad status line leaves the
    /// status code at 0, which later surfaces as `UnexpectedStatusCode`.
    #[default]
    Lenient,
    /// Malformed lines are rejected with an error.
    Strict,
}

impl FromStr for ParseMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(ParseMode::Lenient),
            "strict" => Ok(ParseMode::Strict),
            _ => Err(ConfigError::InvalidValue {
                key: "parse_mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Response parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Strict or lenient line handling.
    pub mode: ParseMode,
    /// Maximum number of lines, status line included.
    pub max_header_lines: Option<usize>,
    /// Maximum body size in bytes.
    pub max_body_size: Option<usize>,
}

impl ParserConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    /// Strict configuration with no limits.
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
            ..Default::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == ParseMode::Strict
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))
    }

    /// Parse configuration from a JSON document.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    /// Load configuration from a file, detecting the format from its extension.
    ///
    /// `.toml` and `.json` files are parsed directly. `.env` files are read
    /// with [`ParserConfig::from_dotenv`].
    pub fn load_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        match ext.to_lowercase().as_str() {
            "toml" => Self::from_toml_str(&fs::read_to_string(path)?),
            "json" => Self::from_json_str(&fs::read_to_string(path)?),
            "env" => Self::from_dotenv(path),
            other => Err(ConfigError::LoadError(format!(
                "Unsupported format: {}",
                other
            ))),
        }
    }

    /// Read configuration from `LINEWORK_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_with_prefix(DEFAULT_PREFIX)
    }

    /// Read configuration from environment variables with a custom prefix.
    ///
    /// Recognized keys are `PARSE_MODE`, `MAX_HEADER_LINES` and `MAX_BODY_SIZE`.
    /// Unset variables keep their defaults.
    pub fn from_env_with_prefix(prefix: &str) -> ConfigResult<Self> {
        Self::from_loader(&EnvLoader::new(prefix))
    }

    /// Read `LINEWORK_*` keys from a `.env` file.
    ///
    /// Only the file's contents are consulted; the process environment is
    /// neither read nor modified.
    pub fn from_dotenv(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let vars = dotenvy::from_path_iter(path.as_ref())
            .map_err(|e| ConfigError::LoadError(e.to_string()))?
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Self::from_loader(&EnvLoader::with_vars(DEFAULT_PREFIX, vars))
    }

    fn from_loader(loader: &EnvLoader) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(mode) = loader.load_var("PARSE_MODE") {
            config.mode = mode.parse().map_err(|_| ConfigError::InvalidValue {
                key: loader.var_name("PARSE_MODE"),
                value: mode,
            })?;
        }
        config.max_header_lines = loader.load_parsed("MAX_HEADER_LINES")?;
        config.max_body_size = loader.load_parsed("MAX_BODY_SIZE")?;

        Ok(config)
    }
}

/// Builder for parser configuration.
#[derive(Debug, Default)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    /// Set the parse mode.
    pub fn mode(mut self, mode: ParseMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Reject malformed lines instead of skipping them.
    pub fn strict(self) -> Self {
        self.mode(ParseMode::Strict)
    }

    /// Set the maximum number of lines, status line included.
    pub fn max_header_lines(mut self, max: usize) -> Self {
        self.config.max_header_lines = Some(max);
        self
    }

    /// Set the maximum body size in bytes.
    pub fn max_body_size(mut self, max: usize) -> Self {
        self.config.max_body_size = Some(max);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ParserConfig {
        self.config
    }
}
