use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use lemmarank::Config;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::parse();
    info!("using lemma table at {}", config.lemma_csv.display());
    info!("using frequency list at {}", config.freq_list.display());
    info!(
        "writing {:?} output to {} (frequency column: {}, load mode: {})",
        config.format,
        config.output.display(),
        config.include_freq,
        config.load_mode
    );

    lemmarank::run(&config)?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
