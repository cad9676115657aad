//! CLI argument parsing.
//!
//! The CLI is a thin shell: it parses arguments, initializes logging and
//! invokes the pipeline. All detection and codegen behavior lives in the
//! library modules.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Global CLI arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    #[arg(long, default_value_t = false, global = true)]
    /// Log per-file detection results.
    pub verbose: bool,

    #[arg(long = "rules", value_name = "PATH", global = true)]
    /// Additional rule table JSON files, searched after the built-in table.
    pub rule_tables: Vec<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a project and report detected authentication features.
    Analyze {
        /// Project root to scan.
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Scan a project and generate wallet-auth replacement artifacts plus
    /// a migration report.
    Migrate {
        /// Project root to scan.
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory for generated files and the report.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Detect and match rules without writing any files.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}
