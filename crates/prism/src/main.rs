//! Prism - Entry Point
//!
//! Operator CLI for inspecting a router configuration without contacting
//! any vendor. Every provider is served by a null adapter, so `probe` and
//! `route` exercise the real chains, breakers and cache offline.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `prism validate` | Load and validate the layered configuration |
//! | `prism chains` | Print the fallback chain of every capability |
//! | `prism probe` | Route one sample request per capability |
//! | `prism route <capability> <prompt>` | Dry-run a single request |

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use prism::infrastructure::config::{AppConfig, ConfigLoader};
use prism::infrastructure::logging::init_logging;
use prism::infrastructure::routing::CapabilityRegistry;
use prism::{AiRequest, AiRouter, Capability, CapabilityRouter, RouterBuilder};
use tracing::info;

/// Command line interface for Prism
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(about = "Prism - capability-based AI provider routing")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip logger installation so only reports reach stdout
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Operator commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load and validate the configuration
    Validate,
    /// Print the fallback chain of every capability
    Chains,
    /// Route one sample request per served capability through null adapters
    Probe,
    /// Route a single request through null adapters
    Route {
        /// Capability to request (text, vision, audio, search, `image_gen`)
        capability: Capability,
        /// Prompt or query sent with the request
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    if !cli.quiet {
        init_logging(config.logging.clone())?;
    }

    match cli.command {
        Command::Validate => {
            info!(providers = config.providers.len(), "Configuration is valid");
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Chains => {
            let registry = CapabilityRegistry::new(config.providers)?;
            println!("{}", serde_json::to_string_pretty(&registry.chains())?);
        }
        Command::Probe => {
            let router = dry_run_router(config)?;
            let chains = router.registry().chains();
            for capability in chains.keys() {
                report(&router, *capability, sample_request(*capability, "probe")).await;
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&router.circuit_states().await)?
            );
            router.shutdown().await;
        }
        Command::Route { capability, prompt } => {
            let router = dry_run_router(config)?;
            report(&router, capability, sample_request(capability, &prompt)).await;
            router.shutdown().await;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load().context("Failed to load configuration")
}

fn dry_run_router(config: AppConfig) -> anyhow::Result<AiRouter> {
    RouterBuilder::new(config)
        .with_null_fallback()
        .build()
        .context("Failed to build router")
}

async fn report(router: &AiRouter, capability: Capability, request: AiRequest) {
    match router
        .route(capability, request, router.default_options())
        .await
    {
        Ok(response) => println!(
            "{:<10} ok    {} {}",
            capability.as_str(),
            response.provider_id,
            response.content.as_text().unwrap_or("<binary>")
        ),
        Err(e) => println!("{:<10} {:<5} {e}", capability.as_str(), e.kind()),
    }
}

fn sample_request(capability: Capability, prompt: &str) -> AiRequest {
    match capability {
        Capability::Text => AiRequest::text(prompt),
        Capability::Vision => AiRequest::vision(vec![0x89, b'P', b'N', b'G'], "image/png", prompt),
        Capability::Audio => AiRequest::audio(vec![b'R', b'I', b'F', b'F'], "audio/wav"),
        Capability::Search => AiRequest::search(prompt),
        Capability::ImageGen => AiRequest::image_gen(prompt),
    }
}
