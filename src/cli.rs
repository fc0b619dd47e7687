use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "idol-catalog")]
#[command(version, about = "Browse idol skills and ideal team presets from CSV tables")]
pub struct Cli {
    /// Directory containing the CSV tables (overrides the config file)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file path (default: <config dir>/idol-catalog/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Idols grouped by skill, duration and specialization
    Skills {
        /// Only these skills (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        skill: Vec<String>,

        /// Only skills tagged with these categories (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        category: Vec<String>,

        /// Only these durations in seconds (comma-separated)
        #[arg(short = 't', long, value_delimiter = ',')]
        duration: Vec<u32>,

        /// Only these idols (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        name: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Ideal team presets with matching idols per slot
    Teams {
        /// Only presets for these songs (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        song: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Description and categories of one skill
    SkillInfo {
        skill: String,
    },

    /// Selectable values for every filter
    Options {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Interactive terminal browser
    Browse,

    /// Write the loaded tables to a SQLite database
    Export {
        /// Output SQLite database path
        output_db: PathBuf,
    },

    /// List table names and their source files
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
