use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "specden")]
#[command(author, version, about = "Spectrogram denoising toolkit")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file path (default: configs/train_config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download every configured dataset source
    Fetch,

    /// Build the denoising U-Net and print its stage summary
    Summary {
        #[command(flatten)]
        options: SummaryOptions,
    },

    /// Check external dependencies
    Doctor,

    /// Show the resolved configuration
    Config,
}

#[derive(clap::Args, Clone)]
pub struct SummaryOptions {
    /// Input spectrogram height (defaults from config)
    #[arg(long)]
    pub height: Option<usize>,

    /// Input spectrogram width (defaults from config)
    #[arg(long)]
    pub width: Option<usize>,

    /// Input channels (defaults from config)
    #[arg(long)]
    pub channels: Option<usize>,

    /// Base channel width multiplier (defaults from config)
    #[arg(long)]
    pub base_filters: Option<usize>,

    /// Emit the stage summary as JSON
    #[arg(long)]
    pub json: bool,
}
