//! Trains the embedding table on the corpus and prints the prompt's next-token prediction.
//!
//! Configured through `TINYFORMER_*` environment variables; `RUST_LOG` controls logging.

use anyhow::Context;
use tinyformer::config::from_env;
use tinyformer::pipeline::run_training;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = from_env().context("reading configuration")?;
    config.validate()?;
    let report = run_training(&config)?;

    println!(
        "trained on {} samples, vocab size {}",
        report.num_samples, report.vocab_size
    );
    if let Some(last) = report.losses.last() {
        println!("final loss: {last:.4}");
    }
    println!("prompt: {:?}", config.prompt);
    println!("{}", report.prediction);
    Ok(())
}
