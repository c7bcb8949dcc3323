use anyhow::Result;
use clap::Parser;
use portcullis_cli::{PortcullisCli, run};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "PORTCULLIS_LOG";
const DEFAULT_FILTER: &str = "portcullis=info";

fn main() -> Result<()> {
    let cli = PortcullisCli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("portcullis=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
        .init();

    run(cli, &mut std::io::stdout().lock())
}
