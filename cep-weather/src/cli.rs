use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use cep_weather_core::{Config, ErrorResult};
use clap::{Parser, Subcommand};

use crate::api::{AppState, build_app};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cep-weather", version, about = "Current temperature for a Brazilian CEP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `GET /weather/{cep}` over HTTP.
    Serve {
        /// Listen port; overrides `PORT`.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Look up a single CEP and print the result as JSON.
    Show {
        /// CEP, e.g. "01310-100" or "01310100".
        cep: String,
    },
}

impl Cli {
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        let (location, weather) = config.clients().context("Failed to build upstream clients")?;

        match self.command {
            Command::Serve { port } => {
                let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port.unwrap_or(config.port)));
                let listener = tokio::net::TcpListener::bind(addr)
                    .await
                    .with_context(|| format!("Failed to bind {addr}"))?;

                tracing::info!(%addr, "server starting");
                axum::serve(listener, build_app(AppState::new(location, weather)))
                    .with_graceful_shutdown(shutdown_signal())
                    .await
                    .context("HTTP server failed")?;
            }
            Command::Show { cep } => match cep_weather_core::resolve(&cep, &location, &weather).await {
                Ok(result) => println!("{}", serde_json::to_string(&result)?),
                Err(err) => {
                    tracing::debug!(error = %err, "lookup failed");
                    println!("{}", serde_json::to_string(&ErrorResult::new(err.public_message()))?);
                    anyhow::bail!("lookup for {cep} failed with status {}", err.status_code());
                }
            },
        }

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
