mod cli;
mod commands;
mod config;
mod error;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use curator::{PluginContext, builtin};
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        error!("Command failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("Curator CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let registry_config = config::resolve(&cli)?;
    let context = PluginContext::with_config(registry_config);
    builtin::register_all(&context)?;

    match cli.command {
        Commands::List(args) => {
            info!("Dispatching to 'list' command.");
            commands::list::run(args, &context)
        }
        Commands::Query(args) => {
            info!("Dispatching to 'query' command.");
            commands::query::run(args, &context)
        }
        Commands::Categories(args) => {
            info!("Dispatching to 'categories' command.");
            commands::inspect::run_categories(args, &context)
        }
        Commands::Keywords(args) => {
            info!("Dispatching to 'keywords' command.");
            commands::inspect::run_keywords(args, &context)
        }
        Commands::Create(args) => {
            info!("Dispatching to 'create' command.");
            commands::create::run(args, &context)
        }
        Commands::Libraries => {
            info!("Dispatching to 'libraries' command.");
            commands::libraries::run(&context)
        }
    }
}
