//! # tinyformer
//!
//! Minimal transformer encoder over character tokens: sinusoidal positions,
//! unmasked multi-head attention, feed-forward and layer norm, mean-pooled to one
//! vector and scored against the tied embedding table. Training updates only the
//! embedding table.

pub mod config;
pub mod data;
pub mod model;
pub mod pipeline;
pub mod sampling;
pub mod tokenizer;
pub mod train;
