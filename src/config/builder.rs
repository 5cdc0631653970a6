//! Build [`RunConfig`] from environment variables.
//!
//! Uses [`env_string`] and [`env_parsed`] to read env vars with a single place for key names
//! (the `constants` submodule) and typed errors ([`ConfigError`]).

use std::path::PathBuf;

use super::constants::{
    ENV_CORPUS_PATH, ENV_EMBEDDING_DIM, ENV_EPOCHS, ENV_LEARNING_RATE, ENV_NUM_HEADS,
    ENV_NUM_LAYERS, ENV_PREFIX, ENV_PROMPT, ENV_SEED, ENV_SEQ_LEN, ENV_TEMPERATURE, ENV_TOP_K,
    ENV_VOCAB_LIMIT,
};
use super::{ConfigError, RunConfig};

/// Returns the full environment variable key for a given suffix (e.g. `SEED` → `TINYFORMER_SEED`).
#[must_use]
pub fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

/// Reads an environment variable as a string.
///
/// Returns `Some(value)` if the variable is set and valid UTF-8, `None` if unset.
/// Returns `Err(ConfigError::EnvVar)` if the variable is set but invalid (e.g. not Unicode).
pub fn env_string(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(s) => Ok(Some(s)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::EnvVar {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Reads an environment variable and parses it into type `T`.
///
/// Returns `Ok(Some(value))` if set and parse succeeds, `Ok(None)` if unset, and
/// `Err(ConfigError::Parse)` if set but parsing fails (e.g. `SEED=abc` for `u64`).
pub fn env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(s) = env_string(key)? else {
        return Ok(None);
    };
    match s.trim().parse() {
        Ok(t) => Ok(Some(t)),
        Err(e) => Err(ConfigError::Parse {
            key: key.to_string(),
            value: s,
            message: e.to_string(),
        }),
    }
}

/// Builds [`RunConfig`] from environment variables, falling back to [`RunConfig::default`] for unset values.
///
/// Returns [`ConfigError`] if any *set* variable fails to parse (e.g. `TINYFORMER_SEED=abc`).
/// The result is not validated; call [`RunConfig::validate`] before use.
pub fn from_env() -> Result<RunConfig, ConfigError> {
    let default = RunConfig::default();

    let seed = env_parsed::<u64>(&env_key(ENV_SEED))?.unwrap_or(default.seed);
    let corpus_path = env_string(&env_key(ENV_CORPUS_PATH))?
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .or(default.corpus_path);
    let vocab_limit =
        env_parsed::<usize>(&env_key(ENV_VOCAB_LIMIT))?.unwrap_or(default.vocab_limit);
    let embedding_dim =
        env_parsed::<usize>(&env_key(ENV_EMBEDDING_DIM))?.unwrap_or(default.embedding_dim);
    let num_heads = env_parsed::<usize>(&env_key(ENV_NUM_HEADS))?.unwrap_or(default.num_heads);
    let num_layers = env_parsed::<usize>(&env_key(ENV_NUM_LAYERS))?.unwrap_or(default.num_layers);
    let seq_len = env_parsed::<usize>(&env_key(ENV_SEQ_LEN))?.unwrap_or(default.seq_len);
    let learning_rate =
        env_parsed::<f64>(&env_key(ENV_LEARNING_RATE))?.unwrap_or(default.learning_rate);
    let epochs = env_parsed::<usize>(&env_key(ENV_EPOCHS))?.unwrap_or(default.epochs);
    let top_k = env_parsed::<usize>(&env_key(ENV_TOP_K))?.unwrap_or(default.top_k);
    let temperature =
        env_parsed::<f64>(&env_key(ENV_TEMPERATURE))?.unwrap_or(default.temperature);
    let prompt = env_string(&env_key(ENV_PROMPT))?.unwrap_or(default.prompt);

    Ok(RunConfig {
        seed,
        corpus_path,
        vocab_limit,
        embedding_dim,
        num_heads,
        num_layers,
        seq_len,
        learning_rate,
        epochs,
        top_k,
        temperature,
        prompt,
    })
}
