/// Lectern - course playlist inspection and session replay
use anyhow::Context;
use clap::{Parser, Subcommand};
use lectern_cli::{load_materials, load_script, render, run_session, CliConfig};
use lectern_core::MaterialId;
use lectern_playback::Playlist;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Course video playlist and playback simulator", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "LECTERN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the video playlist derived from a material collection
    Playlist {
        /// Material collection (JSON array)
        materials: PathBuf,
        /// Material to start on
        #[arg(short, long)]
        initial: Option<MaterialId>,
    },
    /// Replay a playback script against a recording resource
    Simulate {
        /// Material collection (JSON array)
        materials: PathBuf,
        /// Session script, one command per line
        script: PathBuf,
        /// Material to start on
        #[arg(short, long)]
        initial: Option<MaterialId>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Playlist { materials, initial } => {
            let items = load_materials(&materials)
                .with_context(|| format!("Failed to read materials from {}", materials.display()))?;
            tracing::info!(count = items.len(), "Loaded materials");

            let (playlist, start_index) = Playlist::build(&items, initial).into_parts();
            print!("{}", render::render_playlist(&playlist, start_index));
        }
        Commands::Simulate {
            materials,
            script,
            initial,
            json,
        } => {
            let items = load_materials(&materials)
                .with_context(|| format!("Failed to read materials from {}", materials.display()))?;
            let lines = load_script(&script)
                .with_context(|| format!("Failed to read script from {}", script.display()))?;
            tracing::info!(materials = items.len(), steps = lines.len(), "Replaying session");

            let report = run_session(items, initial, config.player, &lines);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render_report(&report));
            }
        }
    }

    Ok(())
}
