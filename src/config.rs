//! Runtime configuration from `.env.local` and the process environment

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Dotenv file read at startup, if present
pub const ENV_FILE: &str = ".env.local";

pub const DEFAULT_SERVER_NAME: &str = "simple-mcp";

/// Errors from configuration loading
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(String),
}

/// Non-fatal problems found while loading configuration.
///
/// Loading runs before the log subscriber exists, so these are returned to
/// the caller instead of being logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigWarning {
    #[error("could not read {file}: {reason}")]
    UnreadableEnvFile { file: String, reason: String },

    #[error("unknown APP_ENV '{value}', falling back to local")]
    UnknownEnvironment { value: String },
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Staging,
    Prod,
}

impl Environment {
    /// Local and dev environments log at debug level
    pub fn is_debug(self) -> bool {
        matches!(self, Environment::Local | Environment::Dev)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" | "development" => Ok(Environment::Dev),
            "staging" | "stage" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `APP_ENV`, defaults to local
    pub env: Environment,
    /// `MCP_SERVER_NAME`, advertised in the MCP handshake
    pub server_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: Environment::default(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load `.env.local` (if present) and then read the environment.
    ///
    /// Variables already set in the process take priority over the file.
    pub fn load() -> (Self, Vec<ConfigWarning>) {
        let file_warning = match dotenvy::from_filename(ENV_FILE) {
            Ok(_) => None,
            Err(e) if e.not_found() => None,
            Err(e) => Some(ConfigWarning::UnreadableEnvFile {
                file: ENV_FILE.to_string(),
                reason: e.to_string(),
            }),
        };

        let (config, mut warnings) = Self::from_lookup(|key| env::var(key).ok());
        if let Some(warning) = file_warning {
            warnings.insert(0, warning);
        }
        (config, warnings)
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigWarning>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut warnings = Vec::new();

        let env = match non_empty("APP_ENV") {
            Some(raw) => raw.parse::<Environment>().unwrap_or_else(|_| {
                warnings.push(ConfigWarning::UnknownEnvironment {
                    value: raw.trim().to_string(),
                });
                Environment::Local
            }),
            None => Environment::Local,
        };

        let config = Self {
            env,
            server_name: non_empty("MCP_SERVER_NAME")
                .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
        };
        (config, warnings)
    }
}

/// Environment variable or `default` when unset or empty
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Environment variable that must be set and non-empty
pub fn require_env(key: &str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::Missing(key.to_string()))
}
