//! Training driver: next-token samples and the embedding-only update loop.

mod sample;
mod trainer;

pub use sample::{build_samples, Sample};
pub use trainer::Trainer;
