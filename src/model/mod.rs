//! Numeric core: matrices, primitives, layer norm, feed-forward, attention, and the
//! [`Transformer`] that composes them.
//!
//! Everything here is deterministic given its weights; randomness enters only through
//! the generator passed to the constructors.

pub mod attention;
mod error;
pub mod feed_forward;
pub mod layer_norm;
mod matrix;
pub mod ops;
pub mod transformer;

pub use attention::{HeadArena, HeadProjection, MultiHeadAttention};
pub use error::{ModelError, ModelResult};
pub use feed_forward::FeedForward;
pub use layer_norm::LayerNorm;
pub use matrix::Matrix;
pub use transformer::{Layer, Transformer};
