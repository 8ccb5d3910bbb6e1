use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .pr-inspector.toml.
/// All fields are optional — the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Heuristic catalogs driving the diff analysis
    #[serde(default)]
    pub rules: RuleSet,
}

/// The two heuristic catalogs. Plain data, never branches: adding a rule is a
/// config edit, not a code change. Matching is whole-token on both catalogs.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSet {
    /// Matched against content-change lines
    #[serde(default = "default_words")]
    pub words: Vec<String>,

    /// Matched against file-header lines
    #[serde(default = "default_file_names")]
    pub file_names: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            words: default_words(),
            file_names: default_file_names(),
        }
    }
}

/// `/dev/null`: deleted file or discarded output; `raise`: exception-raising
/// code; `.write`: direct I/O; `%x`: hex format string, possible obfuscation;
/// `exec`: dynamic code execution.
fn default_words() -> Vec<String> {
    ["/dev/null", "raise", ".write", "%x", "exec"]
        .iter()
        .map(|word| word.to_string())
        .collect()
}

fn default_file_names() -> Vec<String> {
    ["Gemfile", ".gemspec"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

impl Config {
    /// Load configuration from .pr-inspector.toml in the current directory.
    /// Returns the default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".pr-inspector.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}
