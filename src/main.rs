mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Args, Commands};

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "dem=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let data_dir = args.data_dir;

    match args.command {
        Commands::Onboard { name, foods } => cli::handle_onboard(name, foods, data_dir),
        Commands::Show { day } => cli::handle_show(day, data_dir),
        Commands::Energy { day, level } => cli::handle_energy(day, level, data_dir),
        Commands::Toggle { day, pillar } => cli::handle_toggle(day, pillar, data_dir),
        Commands::Status => cli::handle_status(data_dir),
        Commands::Recipe { day, meal } => cli::handle_recipe(day, meal, data_dir).await,
        Commands::Insight { day, refresh } => cli::handle_insight(day, refresh, data_dir).await,
        Commands::Cheer { day, pillar } => cli::handle_cheer(day, pillar, data_dir).await,
        Commands::Foods => cli::handle_foods(),
        Commands::Reset { yes } => cli::handle_reset(yes, data_dir),
    }
}
