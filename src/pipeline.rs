//! End-to-end runs behind the `train` and `infer` binaries.
//!
//! Both runs load the corpus, train a [`CharTokenizer`] on it and build a
//! [`Transformer`] from one seeded [`StdRng`]. Training then fits the embedding
//! table on next-token samples; inference uses the freshly initialized weights.

use std::fmt;

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use crate::config::{ConfigError, RunConfig};
use crate::data::{load_corpus, DataError};
use crate::model::{ModelError, Transformer};
use crate::sampling::{score, top1, top_k};
use crate::tokenizer::{CharTokenizer, Tokenizer, TokenizerError};
use crate::train::{build_samples, Trainer};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// The prompt has no tokens once whitespace is removed.
    #[error("prompt has no tokens")]
    EmptyPrompt,

    /// No document has two or more tokens.
    #[error("corpus yields no training samples")]
    NoSamples,
}

/// Next-token prediction for one prompt.
#[derive(Clone, Debug)]
pub struct Prediction {
    /// Prompt token ids fed to the model.
    pub tokens: Vec<usize>,
    /// Mean-pooled encoder output.
    pub pooled: Vec<f64>,
    /// Probability of each vocabulary entry.
    pub distribution: Vec<f64>,
    pub top1: usize,
    pub top1_symbol: String,
    pub sampled: usize,
    pub sampled_symbol: String,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input tokens: {:?}", self.tokens)?;
        writeln!(
            f,
            "top-1: {:?} (id {}, p={:.4})",
            self.top1_symbol, self.top1, self.distribution[self.top1]
        )?;
        write!(
            f,
            "top-k sample: {:?} (id {}, p={:.4})",
            self.sampled_symbol, self.sampled, self.distribution[self.sampled]
        )
    }
}

/// Outcome of [`run_training`].
#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub vocab_size: usize,
    pub num_samples: usize,
    /// Average loss of each epoch.
    pub losses: Vec<f64>,
    /// Prediction for the configured prompt with the trained weights.
    pub prediction: Prediction,
}

/// Tokenizer, model and generator built from one [`RunConfig`].
pub struct Session {
    pub tokenizer: CharTokenizer,
    pub model: Transformer,
    pub rng: StdRng,
    documents: Vec<String>,
}

impl Session {
    /// Loads the corpus and builds the tokenizer and model.
    ///
    /// # Errors
    ///
    /// Config validation, corpus loading, or model construction failures.
    pub fn new(config: &RunConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let data = load_corpus(config.corpus_path.as_deref())?;
        let documents: Vec<String> = data.lines().into_iter().map(str::to_string).collect();
        let tokenizer = CharTokenizer::train(&documents, config.vocab_limit);

        let mut rng = StdRng::seed_from_u64(config.seed);
        let model = Transformer::new(config.model_config(tokenizer.vocab_size()), &mut rng)?;
        info!(
            "{} documents, vocab size {}, {} parameters",
            documents.len(),
            tokenizer.vocab_size(),
            model.num_parameters()
        );
        Ok(Session {
            tokenizer,
            model,
            rng,
            documents,
        })
    }

    #[must_use]
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Encodes `prompt` and predicts the token that follows it.
    ///
    /// Only the last `seq_len` tokens of a long prompt are used.
    ///
    /// # Errors
    ///
    /// [`PipelineError::EmptyPrompt`] when the prompt encodes to no tokens.
    pub fn predict(
        &mut self,
        prompt: &str,
        k: usize,
        temperature: f64,
    ) -> Result<Prediction, PipelineError> {
        let mut tokens = self.tokenizer.encode(prompt);
        if tokens.is_empty() {
            return Err(PipelineError::EmptyPrompt);
        }
        let max = self.model.config().seq_len;
        if tokens.len() > max {
            warn!("prompt has {} tokens; keeping the last {max}", tokens.len());
            tokens.drain(..tokens.len() - max);
        }

        let pooled = self.model.forward(&tokens)?;
        let distribution = score(&pooled, self.model.embeddings())?;
        let best = top1(&distribution)?;
        let sampled = top_k(&distribution, k, temperature, &mut self.rng)?;
        debug!("prediction: top1={best} sampled={sampled}");

        Ok(Prediction {
            top1_symbol: self.tokenizer.decode(&[best])?,
            sampled_symbol: self.tokenizer.decode(&[sampled])?,
            tokens,
            pooled,
            distribution,
            top1: best,
            sampled,
        })
    }
}

/// Builds samples from the corpus, fits the embedding table and predicts the
/// configured prompt.
///
/// # Errors
///
/// [`PipelineError::NoSamples`] when no document yields a sample, plus anything
/// [`Session::new`] or [`Session::predict`] returns.
pub fn run_training(config: &RunConfig) -> Result<TrainingReport, PipelineError> {
    let mut session = Session::new(config)?;
    let sequences: Vec<Vec<usize>> = session
        .documents()
        .iter()
        .map(|doc| session.tokenizer.encode(doc))
        .collect();
    let samples = build_samples(&sequences, config.seq_len);
    if samples.is_empty() {
        return Err(PipelineError::NoSamples);
    }
    info!("training on {} samples", samples.len());

    let trainer = Trainer::new(config.learning_rate);
    let losses = trainer.fit(&mut session.model, &samples, config.epochs)?;
    let prediction = session.predict(&config.prompt, config.top_k, config.temperature)?;
    Ok(TrainingReport {
        vocab_size: session.tokenizer.vocab_size(),
        num_samples: samples.len(),
        losses,
        prediction,
    })
}

/// Predicts the token after `prompt` with freshly initialized weights.
pub fn run_inference(config: &RunConfig, prompt: &str) -> Result<Prediction, PipelineError> {
    let mut session = Session::new(config)?;
    session.predict(prompt, config.top_k, config.temperature)
}
