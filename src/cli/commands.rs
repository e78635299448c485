use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dem::core::{EnergyLevel, MealType, Pillar};

#[derive(Parser)]
#[command(name = "dem")]
#[command(about = "Energy-adaptive three-day health plans")]
#[command(version)]
pub struct Args {
    /// Directory holding config.json and the saved state
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick foods and create the first plan
    Onboard {
        #[arg(long, default_value = "")]
        name: String,
        /// Comma-separated food ids (see `dem foods`)
        #[arg(long, value_delimiter = ',', required = true)]
        foods: Vec<String>,
    },
    /// Show a day of the current plan
    Show {
        /// Defaults to the first incomplete day
        #[arg(long)]
        day: Option<u8>,
    },
    /// Set a day's energy level and regenerate its content
    Energy {
        day: u8,
        /// low, medium or high
        level: EnergyLevel,
    },
    /// Mark a pillar done or not done
    Toggle {
        day: u8,
        /// diet, exercise or mentality
        pillar: Pillar,
    },
    /// Streak and completion overview
    Status,
    /// Generate a recipe for one meal
    Recipe {
        day: u8,
        /// breakfast, lunch, dinner or snack
        meal: MealType,
    },
    /// Care-team insight over the days so far
    Insight {
        #[arg(long)]
        day: Option<u8>,
        /// Ignore the cached insight
        #[arg(long)]
        refresh: bool,
    },
    /// A short encouraging message
    Cheer {
        #[arg(long)]
        day: Option<u8>,
        #[arg(long)]
        pillar: Option<Pillar>,
    },
    /// List the food catalog
    Foods,
    /// Delete everything and start over
    Reset {
        #[arg(long)]
        yes: bool,
    },
}
