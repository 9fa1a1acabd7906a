//! cascade entry point
//!
//! `rest` serves the HTTP boundary; `cli` runs a single prompt through the
//! provider chain and prints the same JSON the boundary would return.

use cascade_core::server;
use cascade_core::{AggregateResult, AppConfig, FallbackSequencer, GenerationRequest};
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::error::Error;
use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "cascade",
    version,
    about = "Prompt analysis with ordered provider fallback"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// REST API bind address (overrides config if specified)
    #[arg(long)]
    addr: Option<SocketAddr>,

    #[arg(long, short, value_enum, default_value_t = RunMode::Rest)]
    mode: RunMode,

    /// Prompt for `cli` mode; read from stdin when omitted
    prompt: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum RunMode {
    /// REST API server
    Rest,
    /// Analyze one prompt and exit
    Cli,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    init_tracing();
    info!("Starting cascade");
    debug!(mode = ?cli.mode, config = ?cli.config, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let file_config = AppConfig::load(config_path)?;
    let addr = cli.addr.unwrap_or(file_config.bind);

    let sequencer = Arc::new(FallbackSequencer::from_config(&file_config)?);
    debug!(order = ?sequencer.order(), "Provider chain ready");

    match cli.mode {
        RunMode::Rest => {
            info!(%addr, "REST server starting");
            server::serve(sequencer, addr).await?;
            Ok(ExitCode::SUCCESS)
        }
        RunMode::Cli => {
            let prompt = load_prompt(&cli)?;
            let Ok(request) = GenerationRequest::new(prompt) else {
                eprintln!("{}", json!({ "error": "Missing 'prompt' string in body" }));
                return Ok(ExitCode::from(2));
            };
            let (output, code) = match sequencer.run(&request).await {
                AggregateResult::Success { provider, text } => {
                    (json!({ "provider": provider, "text": text }), ExitCode::SUCCESS)
                }
                AggregateResult::AllFailed { attempts } => (
                    json!({ "error": "All providers failed", "attempts": attempts }),
                    ExitCode::FAILURE,
                ),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(code)
        }
    }
}

fn load_prompt(cli: &Cli) -> io::Result<String> {
    if !cli.prompt.is_empty() {
        return Ok(cli.prompt.join(" "));
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}
