//! framewise CLI binary.
//!
//! Samples frames from a video, narrates each one against the narrations of
//! the frames before it, saves a JSON report and prints the result.

use clap::Parser;
use framewise::FramewiseConfig;
use tokio_util::sync::CancellationToken;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, run_analysis};

    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    #[cfg(feature = "observability")]
    let guard = {
        use framewise::observability::{ObservabilityConfig, init_observability_with_config};

        let mut config = ObservabilityConfig::new("framewise").with_json_logs(cli.json_logs);
        if cli.verbose {
            config = config.with_log_level(cli.log_level());
        }
        init_observability_with_config(config)?
    };

    #[cfg(not(feature = "observability"))]
    init_tracing(&cli)?;

    let mut config = FramewiseConfig::load()?;
    config.apply(cli.overrides())?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling analysis");
            on_interrupt.cancel();
        }
    });

    let result = run_analysis(&cli, &config, cancel).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Analysis failed");
    }

    #[cfg(feature = "observability")]
    guard.shutdown();

    result.map_err(Into::into)
}

#[cfg(not(feature = "observability"))]
fn init_tracing(cli: &cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = if cli.verbose {
        EnvFilter::try_new(cli.log_level())?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(cli.log_level()))?
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    Ok(())
}
