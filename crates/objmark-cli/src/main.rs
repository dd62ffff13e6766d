mod commands;
mod script;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "objmark", about = "Object position marking tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an annotation session driven by a command script or stdin
    Run(commands::run::RunArgs),
    /// Print or save a default configuration file
    Config(commands::config::ConfigArgs),
    /// List images in a folder with their marker counts
    Info(commands::info::InfoArgs),
    /// Rewrite an annotation file with one line per image
    Export(commands::export::ExportArgs),
    /// Save every annotated region as a separate image
    Crop(commands::crop::CropArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Crop(args) => commands::crop::run(args),
    }
}
