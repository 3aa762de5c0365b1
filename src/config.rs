use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PROMPT: &str = "Enter a command, type h for help. Type r to run. > ";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// How the `sm` command renders the memory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryFormat {
    #[default]
    Table,
    Json,
}

/// Console settings, read from a JSON file and overridden by CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebuggerConfig {
    /// Printed before each command; empty disables the prompt.
    pub prompt: String,
    /// Lines armed before the first command.
    pub breakpoints: Vec<u32>,
    /// Print the parsing/loading banners.
    pub banner: bool,
    pub memory_format: MemoryFormat,
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            breakpoints: Vec::new(),
            banner: true,
            memory_format: MemoryFormat::Table,
        }
    }
}

impl DebuggerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Quiet mode: no prompt, no banners.
    pub fn quiet(mut self) -> Self {
        self.prompt.clear();
        self.banner = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = DebuggerConfig::from_json(r#"{ "breakpoints": [3, 5] }"#).unwrap();
        assert_eq!(config.breakpoints, vec![3, 5]);
        assert_eq!(config.prompt, DEFAULT_PROMPT);
        assert_eq!(config.memory_format, MemoryFormat::Table);
        assert!(config.banner);
    }

    #[test]
    fn memory_format_is_lowercase() {
        let config = DebuggerConfig::from_json(r#"{ "memory_format": "json" }"#).unwrap();
        assert_eq!(config.memory_format, MemoryFormat::Json);
    }

    #[test]
    fn quiet_clears_prompt_and_banner() {
        let config = DebuggerConfig::default().quiet();
        assert!(config.prompt.is_empty());
        assert!(!config.banner);
    }
}
