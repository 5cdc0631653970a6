//! Naive gradient step on the embedding table.
//!
//! The loss is MSE between the scored distribution and a one-hot target. Each
//! embedding row `i` moves by `-lr * (p_i - [i == target]) * pooled`, where `pooled`
//! is the forward output computed before the update. Attention and feed-forward
//! weights never change.

use log::{debug, info};

use super::sample::Sample;
use crate::model::{ModelError, ModelResult, Transformer};
use crate::sampling::{mse_loss, score};

#[derive(Clone, Copy, Debug)]
pub struct Trainer {
    learning_rate: f64,
}

impl Trainer {
    #[must_use]
    pub fn new(learning_rate: f64) -> Self {
        Trainer { learning_rate }
    }

    #[must_use]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// One update on one sample. Returns the loss measured before the update.
    ///
    /// # Errors
    ///
    /// Any [`ModelError`] from the forward pass, or [`ModelError::TokenOutOfRange`]
    /// when the target is not in the vocabulary.
    pub fn step(&self, model: &mut Transformer, sample: &Sample) -> ModelResult<f64> {
        let pooled = model.forward(&sample.prefix)?;
        let probs = score(&pooled, model.embeddings())?;
        let loss = mse_loss(&probs, sample.target)?;

        let embeddings = model.embeddings_mut();
        for (i, p) in probs.iter().enumerate() {
            let grad = if i == sample.target { p - 1.0 } else { *p };
            let scale = self.learning_rate * grad;
            for (w, x) in embeddings.row_mut(i).iter_mut().zip(&pooled) {
                *w -= scale * x;
            }
        }
        Ok(loss)
    }

    /// Runs [`step`](Self::step) over every sample in order. Returns the average loss.
    ///
    /// # Errors
    ///
    /// [`ModelError::EmptySequence`] when `samples` is empty, or the first failing step.
    pub fn epoch(&self, model: &mut Transformer, samples: &[Sample]) -> ModelResult<f64> {
        if samples.is_empty() {
            return Err(ModelError::EmptySequence);
        }
        let total = samples
            .iter()
            .map(|s| self.step(model, s))
            .sum::<ModelResult<f64>>()?;
        Ok(total / samples.len() as f64)
    }

    /// `epochs` passes over `samples`; returns the average loss of each epoch.
    pub fn fit(
        &self,
        model: &mut Transformer,
        samples: &[Sample],
        epochs: usize,
    ) -> ModelResult<Vec<f64>> {
        debug!(
            "training on {} samples for {} epochs (lr={})",
            samples.len(),
            epochs,
            self.learning_rate
        );
        let mut history = Vec::with_capacity(epochs);
        for epoch in 1..=epochs {
            let loss = self.epoch(model, samples)?;
            info!("epoch {epoch} | loss: {loss:.4}");
            history.push(loss);
        }
        Ok(history)
    }
}
