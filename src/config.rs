use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Compiler configuration with validation
#[derive(Clone, Debug, PartialEq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Maximum nesting depth of sub-queries (1-64)
    #[validate(range(
        min = 1,
        max = 64,
        message = "Max sub-query depth must be between 1 and 64"
    ))]
    pub max_sub_query_depth: usize,

    /// Whether to abbreviate IRIs and emit PREFIX declarations
    pub emit_prefixes: bool,

    /// Resource mapping YAML file
    pub mapping_file: Option<PathBuf>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_sub_query_depth: 16,
            emit_prefixes: true,
            mapping_file: None,
        }
    }
}

impl CompilerConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            max_sub_query_depth: parse_env_var("SPARQL_LINQ_MAX_SUB_QUERY_DEPTH", "16")?,
            emit_prefixes: parse_env_var("SPARQL_LINQ_EMIT_PREFIXES", "true")?,
            mapping_file: env::var("SPARQL_LINQ_MAPPING_FILE").ok().map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation; options not
    /// given on the command line keep their defaults
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge(cli);

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Merge command-line options (CLI overrides file and environment)
    pub fn merge(&mut self, cli: CliConfig) {
        if let Some(depth) = cli.max_sub_query_depth {
            self.max_sub_query_depth = depth;
        }
        if let Some(emit_prefixes) = cli.emit_prefixes {
            self.emit_prefixes = emit_prefixes;
        }
        if cli.mapping_file.is_some() {
            self.mapping_file = cli.mapping_file;
        }
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub max_sub_query_depth: Option<usize>,
    pub emit_prefixes: Option<bool>,
    pub mapping_file: Option<PathBuf>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
