//! Command execution for the authmigrate CLI.
//!
//! Each command wires configuration into the pipeline's two entry points:
//! `analyze` stops after the scan, `migrate` continues through rule
//! matching, template generation and report writing.

use std::path::Path;

use crate::{config::Config, scanner::ScanOptions};

pub mod analyze;
pub mod migrate;


/// Build scan options from the loaded configuration.
pub(crate) fn scan_options(
    root: &Path,
    config: &Config,
    verbose: bool,
) -> ScanOptions {
    let mut options = ScanOptions::new(root);
    options.extensions = config.scan.extensions.clone();
    options.exclude_dirs = config.scan.exclude_dirs.clone();
    options.verbose = verbose;
    options
}
