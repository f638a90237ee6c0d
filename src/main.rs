//! model-audit: heuristic quality auditing for ML model listings.
//!
//! Reads a file of model/dataset/code URLs and prints one NDJSON record per
//! audited model on stdout. All diagnostics go to stderr.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io::{self, Write as _};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use model_audit::evidence::{ModelHost, RepoSummarySource};
use model_audit::pipeline::{self, AuditOptions};

#[derive(Parser)]
#[command(name = "model-audit")]
#[command(version)]
#[command(about = "Heuristic quality auditing for ML model listings", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  At least one model was scored
    1  Input problem or zero models scored

EXAMPLES:
    # Audit the models listed in a URL file
    model-audit audit urls.txt > results.ndjson

    # Audit without any network or git access
    model-audit --offline audit urls.txt

    # Write an editable config with all defaults
    model-audit config init")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a weight/threshold configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip all network and git evidence fetching
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit models from a URL file and print NDJSON results
    Audit {
        /// File of whitespace/comma-separated model, dataset and code URLs
        url_file: PathBuf,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (defaults merged with file)
    Show,
    /// Generate an example model-audit.yaml in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Stdout is reserved for NDJSON records; all logging goes to stderr.
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::Audit { url_file } => {
            let options = AuditOptions {
                url_file,
                config_path: cli.config.clone(),
            };
            let (host, miner) = build_providers(cli.offline);
            let mut stdout = io::stdout().lock();
            let exit_code = pipeline::run_audit(&options, host, miner, &mut stdout)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    model_audit::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join("model-audit.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = model_audit::config::generate_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "model-audit", &mut io::stdout());
            io::stdout().flush()?;
            Ok(())
        }
    }
}

/// Construct the evidence providers for this run.
#[cfg(feature = "enrichment")]
fn build_providers(offline: bool) -> (Arc<dyn ModelHost>, Arc<dyn RepoSummarySource>) {
    use model_audit::evidence::{
        HubClient, HubClientConfig, MinerConfig, OfflineHost, OfflineMiner, RepoMiner,
    };

    if offline {
        return (Arc::new(OfflineHost), Arc::new(OfflineMiner));
    }

    let host: Arc<dyn ModelHost> = match HubClient::new(HubClientConfig::default()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::warn!("hub client unavailable ({e}); continuing offline");
            Arc::new(OfflineHost)
        }
    };
    let miner: Arc<dyn RepoSummarySource> = match RepoMiner::new(MinerConfig::default()) {
        Ok(miner) => Arc::new(miner),
        Err(e) => {
            tracing::warn!("repo miner unavailable ({e}); continuing without git evidence");
            Arc::new(OfflineMiner)
        }
    };
    (host, miner)
}

#[cfg(not(feature = "enrichment"))]
fn build_providers(_offline: bool) -> (Arc<dyn ModelHost>, Arc<dyn RepoSummarySource>) {
    use model_audit::evidence::{OfflineHost, OfflineMiner};
    (Arc::new(OfflineHost), Arc::new(OfflineMiner))
}
