use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fairmap")]
#[command(about = "Geocode agricultural trade-fair events and browse them from the command line.")]
#[command(version)]
pub struct Cli {
    /// Event dataset (JSON); defaults to `dataset_path` from the config
    #[arg(short = 'd', long)]
    pub dataset: Option<PathBuf>,

    /// Exhibitor directory (JSON object keyed by event id)
    #[arg(short = 'x', long)]
    pub exhibitors: Option<PathBuf>,

    /// Only show events in this month (repeatable)
    #[arg(short = 'm', long = "month")]
    pub months: Vec<String>,

    /// Only show events with this focus segment (repeatable)
    #[arg(short = 's', long = "segment")]
    pub segments: Vec<String>,

    /// Only show events in this state (repeatable)
    #[arg(short = 'u', long = "state")]
    pub states: Vec<String>,

    /// Open the detail panel for this event id
    #[arg(long)]
    pub select: Option<String>,

    /// Don't use or update the persistent geocode cache
    #[arg(short = 'n', long)]
    pub nocache: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Remove every stored geocode result
    #[arg(long)]
    pub clear_cache: bool,

    /// Resolve these place names ("City, State") instead of loading the dataset
    pub places: Vec<String>,
}
