//! nodebake - node bootstrap parameter derivation
//!
//! Reads a node bootstrapping configuration and prints the parameter sets
//! consumed by the provisioning templates.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use nodebake::NodeBakeError;
use nodebake::catalog::GzipCatalog;
use nodebake::datamodel::loader::load_configuration;
use nodebake::outbound::outbound_command;
use nodebake::params::{self, ParameterSet};
use nodebake::render::TemplateRenderer;

/// Key the Linux set is nested under
const CLOUD_INIT_DATA_KEY: &str = "cloudInitData";

#[derive(Parser)]
#[command(name = "nodebake")]
#[command(author, version, about = "Node bootstrap parameter derivation", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Node bootstrapping configuration (YAML or JSON)
    #[arg(short, long, env = "NODEBAKE_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Linux cloud-init data
    Linux {
        /// Script root directory
        #[arg(long)]
        scripts: PathBuf,
    },
    /// Print the Windows custom data
    Windows,
    /// Print the CSE command variables
    Cse,
    /// Print the outbound connectivity check command
    Outbound,
    /// Render a template against one parameter set
    Render {
        /// Template file
        #[arg(long)]
        template: PathBuf,
        /// Parameter set to render with
        #[arg(long, value_enum)]
        set: ParameterSetKind,
        /// Script root directory (required for the linux set)
        #[arg(long)]
        scripts: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ParameterSetKind {
    Linux,
    Windows,
    Cse,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn print_json(value: &impl serde::Serialize) -> Result<(), NodeBakeError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn load_catalog(scripts: Option<&Path>) -> Result<GzipCatalog, NodeBakeError> {
    let dir = scripts.ok_or_else(|| {
        NodeBakeError::Config("--scripts is required for the linux parameter set".to_string())
    })?;
    GzipCatalog::from_dir(dir).await
}

#[tokio::main]
async fn main() -> Result<(), NodeBakeError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_configuration(&cli.config).await?;
    info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Commands::Linux { scripts } => {
            let catalog = load_catalog(Some(scripts.as_path())).await?;
            let data = params::linux_cloud_init_data(&config, &catalog);
            print_json(&serde_json::json!({ CLOUD_INIT_DATA_KEY: data }))?;
        }
        Commands::Windows => {
            print_json(&params::windows_custom_data(&config))?;
        }
        Commands::Cse => {
            print_json(&params::cse_command_variables(&config))?;
        }
        Commands::Outbound => {
            println!("{}", outbound_command(&config));
        }
        Commands::Render {
            template,
            set,
            scripts,
        } => {
            let content = tokio::fs::read_to_string(&template).await?;
            let mut renderer = TemplateRenderer::new();
            match set {
                ParameterSetKind::Linux => {
                    let catalog = load_catalog(scripts.as_deref()).await?;
                    let data: ParameterSet = params::linux_cloud_init_data(&config, &catalog);
                    renderer.add_nested(CLOUD_INIT_DATA_KEY, &data);
                }
                ParameterSetKind::Windows => {
                    renderer.add_params(&params::windows_custom_data(&config));
                }
                ParameterSetKind::Cse => {
                    renderer.add_params(&params::cse_command_variables(&config));
                }
            }
            print!("{}", renderer.render(&content)?);
        }
    }

    Ok(())
}
