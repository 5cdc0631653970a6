//! Errors raised while reading run settings from the environment or checking model shape.

use thiserror::Error;

/// Configuration failure.
///
/// `Validation` comes from [`Config::validate`](super::Config::validate) and
/// [`RunConfig::validate`](super::RunConfig::validate). `EnvVar` and `Parse` come from the
/// environment helpers; an unset variable is never an error, only one that is set to
/// something unreadable or unparsable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value is out of range or inconsistent with another one.
    #[error("config validation: {0}")]
    Validation(String),

    /// The variable is set but not valid Unicode.
    #[error("env var {key}: {message}")]
    EnvVar { key: String, message: String },

    /// The variable is set but does not parse as the field's type (e.g. `TINYFORMER_SEED=abc`).
    #[error("env var {key}={value:?}: {message}")]
    Parse {
        key: String,
        value: String,
        message: String,
    },
}

impl ConfigError {
    /// The failure reason without the key or prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ConfigError::Validation(m)
            | ConfigError::EnvVar { message: m, .. }
            | ConfigError::Parse { message: m, .. } => m,
        }
    }
}
