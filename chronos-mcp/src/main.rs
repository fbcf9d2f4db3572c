//! Chronos MCP Server
//!
//! JSON-RPC 2.0 over stdio, one message per line. Logs go to stderr.
//!
//! Tools:
//! - convert, list_units: unit conversion
//! - bmi: body mass index
//! - convert_currency: live exchange rates
//! - calculate: key presses on a four-function calculator
//! - stopwatch, countdown: shared timers
//! - chronos, list_functions: documentation

mod config;
mod protocol;
mod server;

use chronos_currency::{ExchangeRateClient, RateProvider};
use chronos_timer::LogAlarm;
use config::ServerConfig;
use server::{Server, PROTOCOL_VERSION, SERVER_VERSION};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ServerConfig::from_env();
    if config.exchange.api_key.is_empty() {
        tracing::warn!("CHRONOS_EXCHANGE_API_KEY is not set; currency conversion will be unavailable");
    }

    let rates: Arc<dyn RateProvider> = match ExchangeRateClient::new(config.exchange.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "cannot build HTTP client");
            std::process::exit(1);
        }
    };

    let server = Server::new(&config, rates, Arc::new(LogAlarm));

    tracing::info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Chronos MCP server started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                tracing::info!("client disconnected (EOF)");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "error reading input");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(reply) = server.handle_line(line).await else {
            continue;
        };

        let written = async {
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await
        };
        if let Err(e) = written.await {
            tracing::error!(error = %e, "error writing response");
            break;
        }
    }

    tracing::info!("server shutting down");
}
