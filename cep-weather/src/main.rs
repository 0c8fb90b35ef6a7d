//! Binary crate for the `cep-weather` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Serving the lookup pipeline over HTTP

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    // A missing WEATHER_API_KEY stops the process here.
    let config = cep_weather_core::Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    cmd.run(config).await
}
