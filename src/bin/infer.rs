//! Runs one forward pass over a prompt and prints the pooled vector and predictions.
//!
//! Usage: `infer [PROMPT]`. Without an argument the prompt comes from
//! `TINYFORMER_PROMPT`, or the built-in default.

use anyhow::Context;
use tinyformer::config::from_env;
use tinyformer::pipeline::run_inference;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = from_env().context("reading configuration")?;
    config.validate()?;
    let prompt = std::env::args().nth(1).unwrap_or_else(|| config.prompt.clone());

    let prediction = run_inference(&config, &prompt)?;
    println!("prompt: {prompt:?}");
    println!("{prediction}");
    println!("pooled: {:?}", prediction.pooled);
    Ok(())
}
