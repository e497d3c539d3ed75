// Environment variable loading

use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Default prefix for parser environment variables.
pub const DEFAULT_PREFIX: &str = "LINEWORK";

/// Where variables are looked up
#[derive(Debug, Clone)]
enum Source {
    Process,
    Vars(HashMap<String, String>),
}

/// Environment variable loader
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: String,
    source: Source,
}

impl EnvLoader {
    /// Create a loader over the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            source: Source::Process,
        }
    }

    /// Create a loader over an explicit set of variables, e.g. a parsed `.env` file
    pub fn with_vars(prefix: impl Into<String>, vars: HashMap<String, String>) -> Self {
        Self {
            prefix: prefix.into(),
            source: Source::Vars(vars),
        }
    }

    /// Full variable name for a key, e.g. `PARSE_MODE` -> `LINEWORK_PARSE_MODE`
    pub fn var_name(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_uppercase()
        } else {
            format!("{}_{}", self.prefix, key.to_uppercase())
        }
    }

    /// Load a specific environment variable, `None` when unset
    pub fn load_var(&self, key: &str) -> Option<String> {
        let name = self.var_name(key);
        let value = match &self.source {
            Source::Process => env::var(&name).ok(),
            Source::Vars(vars) => vars.get(&name).cloned(),
        };
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Load and parse a variable, reporting the full name on failure
    pub fn load_parsed<T: FromStr>(&self, key: &str) -> ConfigResult<Option<T>> {
        match self.load_var(key) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    key: self.var_name(key),
                    value,
                }),
            None => Ok(None),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
