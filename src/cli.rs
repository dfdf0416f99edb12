//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Minimal sitemap feed generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: minsit.toml)
    #[arg(short = 'C', long, default_value = "minsit.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Content export file (JSON array of records)
    #[arg(short, long, default_value = "content.json", value_hint = clap::ValueHint::FilePath)]
    pub content: PathBuf,

    /// Output file path (defaults to stdout)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

// ============================================================================
// Tests
// ============================================================================
