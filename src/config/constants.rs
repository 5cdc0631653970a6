//! Default values and environment variable key names used by the config builder.

/// Environment variable prefix (e.g. `TINYFORMER_EMBEDDING_DIM`).
pub(crate) const ENV_PREFIX: &str = "TINYFORMER_";

// --- Env key suffixes (full key = ENV_PREFIX + suffix) ---

pub(crate) const ENV_SEED: &str = "SEED";
pub(crate) const ENV_CORPUS_PATH: &str = "CORPUS_PATH";
pub(crate) const ENV_VOCAB_LIMIT: &str = "VOCAB_LIMIT";
pub(crate) const ENV_EMBEDDING_DIM: &str = "EMBEDDING_DIM";
pub(crate) const ENV_NUM_HEADS: &str = "NUM_HEADS";
pub(crate) const ENV_NUM_LAYERS: &str = "NUM_LAYERS";
pub(crate) const ENV_SEQ_LEN: &str = "SEQ_LEN";
pub(crate) const ENV_LEARNING_RATE: &str = "LEARNING_RATE";
pub(crate) const ENV_EPOCHS: &str = "EPOCHS";
pub(crate) const ENV_TOP_K: &str = "TOP_K";
pub(crate) const ENV_TEMPERATURE: &str = "TEMPERATURE";
pub(crate) const ENV_PROMPT: &str = "PROMPT";

// --- Default values ---

pub(crate) const DEFAULT_SEED: u64 = 42;
pub(crate) const DEFAULT_VOCAB_LIMIT: usize = 100;
pub(crate) const DEFAULT_VOCAB_SIZE: usize = 32;
pub(crate) const DEFAULT_EMBEDDING_DIM: usize = 32;
pub(crate) const DEFAULT_NUM_HEADS: usize = 2;
pub(crate) const DEFAULT_NUM_LAYERS: usize = 2;
pub(crate) const DEFAULT_SEQ_LEN: usize = 16;
pub(crate) const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub(crate) const DEFAULT_EPOCHS: usize = 50;
pub(crate) const DEFAULT_TOP_K: usize = 3;
pub(crate) const DEFAULT_TEMPERATURE: f64 = 1.0;
pub(crate) const DEFAULT_PROMPT: &str = "hello sphere";

/// Standard deviation of the normal distribution used for every random weight.
pub const INIT_STD: f64 = 0.02;
/// Layer norm stability constant.
pub const LAYER_NORM_EPS: f64 = 1e-5;
/// Feed-forward hidden width as a multiple of the embedding dimension.
pub const FF_MULTIPLIER: usize = 4;
