use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::emphasis::ColorMode;

/// Turns raw bundler build failures into developer-facing diagnostics.
///
/// bundle-diagnostics reads a snapshot of a failed build, maps each error back to
/// original source, and shows the chain of imports that pulled the failing
/// module in.
#[derive(Parser, Debug)]
#[command(
    name = "bundle-diagnostics",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for explained errors.
#[derive(Clone, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    /// Label and message per error, followed by a summary line (default).
    #[default]
    Compact,
    /// Structured JSON array suitable for programmatic consumption.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Explain every error in a build report.
    ///
    /// Module-not-found and invalid-image errors are enriched with the original
    /// source location and import trace; anything else is printed as reported.
    Explain {
        /// Path to the build report JSON file.
        report: PathBuf,

        /// Project root. Defaults to the report's `root`, then the current directory.
        #[arg(long)]
        root: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,

        /// When to colorize output. Defaults to the config file, then `auto`.
        #[arg(long, value_enum)]
        color: Option<ColorMode>,

        /// Log debug details (such as source-mapping failures) to stderr.
        #[arg(short, long)]
        verbose: bool,
    },
}
