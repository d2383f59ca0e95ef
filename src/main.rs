//! `aio-log`: write one message through a logger configured from flags,
//! an optional TOML file and the process environment.
//!
//! ```text
//! DEBUG=App:warn aio-log --provider debug --label App warn "disk at %d%%" 93
//! aio-log --config logging.toml error "request %s failed" '{"id": 7}'
//! ```

use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aio_logging::config::load_config;
use aio_logging::{Arg, Logger, LoggerConfig, Severity, TransportConfig};

#[derive(Parser)]
#[command(name = "aio-log")]
#[command(about = "Write a log message through an aio-logging provider", long_about = None)]
struct Cli {
    /// Module label (defaults to AIO).
    #[arg(short, long, default_value = "")]
    label: String,

    /// Provider: structured or debug.
    #[arg(short, long)]
    provider: Option<String>,

    /// Minimum severity; AIO_LOG_LEVEL still takes precedence.
    #[arg(long)]
    level: Option<Severity>,

    /// Transport for the structured provider: console or a file path.
    #[arg(short, long)]
    transport: Option<String>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Severity of the message.
    severity: Severity,

    /// Primary message, may contain %s %d %i %f %j %o %O placeholders.
    message: String,

    /// Substitution values and trailing arguments. JSON literals keep their type.
    args: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aio_logging=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }
    if let Some(level) = cli.level {
        config.level = Some(level);
    }
    if let Some(transport) = cli.transport {
        config.transports = TransportConfig::Named(transport);
    }

    let logger = Logger::from_env(&cli.label, &config)?;

    let mut args = Vec::with_capacity(cli.args.len() + 1);
    args.push(Arg::from(cli.message));
    args.extend(cli.args.iter().map(|raw| cli_arg(raw)));
    logger.log_at(cli.severity, &args);
    logger.close();

    Ok(())
}

/// JSON literals (numbers, objects, arrays, booleans) keep their type, anything else is text.
fn cli_arg(raw: &str) -> Arg {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if !value.is_string() => Arg::from(value),
        _ => Arg::from(raw),
    }
}
