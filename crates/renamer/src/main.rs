use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reelname::config::RenamerConfig;
use reelname::pipeline::NamingPipeline;
use reelname::prompt::TerminalPrompt;
use reelname_metadata::rate_limit::RateLimiter;
use reelname_metadata::tmdb::TmdbClient;
use reelname_probe::FfprobeProber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the title prompts.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = RenamerConfig::from_env().context("failed to load configuration")?;
    anyhow::ensure!(
        config.root.is_dir(),
        "root directory {} does not exist",
        config.root.display()
    );
    info!(
        root = %config.root.display(),
        rate_limit = config.rate_limit,
        rate_window_ms = config.rate_window.as_millis() as u64,
        "starting"
    );

    let limiter = Arc::new(RateLimiter::new(config.rate_limit, config.rate_window));
    let provider = TmdbClient::new(config.api_key.clone(), limiter).with_base_url(&config.tmdb_url);
    let prober = FfprobeProber::new(&config.ffprobe_path);

    let mut pipeline =
        NamingPipeline::new(Arc::new(provider), Arc::new(prober), TerminalPrompt::stdout())
            .dry_run(config.dry_run);

    let summary = pipeline.run(&config.root).await;
    if summary.failed > 0 {
        warn!(failed = summary.failed, "some renames failed");
    }
    Ok(())
}
