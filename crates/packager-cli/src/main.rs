//! Packager CLI
//!
//! Developer tool that turns a source description into a datapackage.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Packager - normalize dataset descriptions into datapackages
#[derive(Parser)]
#[command(name = "packager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "packager.yaml", env = "PACKAGER_CONFIG")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Packager project
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Dataset title for the sample description
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Normalize the source description and print the datapackage
    Normalize {
        /// Also write the datapackage to the configured file
        #[arg(long)]
        save: bool,

        /// Override the configured source description path
        #[arg(long)]
        source: Option<String>,

        /// Override the configured datapackage output path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check the source description without writing anything
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the datapackage
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { path, title } => {
            commands::init::run(&path, title.as_deref())?;
        }
        Commands::Normalize {
            save,
            source,
            output,
        } => {
            commands::normalize::run(&cli.config, save, source.as_deref(), output.as_deref())?;
        }
        Commands::Validate => {
            commands::validate::run(&cli.config)?;
        }
    }

    Ok(())
}
