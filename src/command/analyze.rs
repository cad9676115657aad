//! Analyze command: scan only, report what was found.

use log::*;
use std::path::Path;

use crate::{cli, command, config, result::Result, scanner::Scanner};

pub async fn execute(args: &cli::Args, path: &Path) -> Result<()> {
    let config = config::load_config(path)?;
    let scanner = Scanner::new();
    let options = command::scan_options(path, &config, args.verbose);

    let result = scanner.analyze_project(&options).await?;

    if result.auth_features.is_empty() {
        warn!(
            "no authentication patterns detected in {} files",
            result.summary.files_scanned
        );
        return Ok(());
    }

    for feature in &result.auth_features {
        info!(
            "detected {} via {} (confidence {}/100, {} files)",
            feature.method,
            feature.provider,
            feature.confidence,
            feature.source_files.len()
        );

        let flags = &feature.metadata.ui_flags;
        debug!(
            "flags: login_form={} password_reset={} registration={}",
            flags.has_login_form,
            flags.has_password_reset,
            flags.has_registration
        );
    }

    for error in &result.errors {
        warn!("{}: {} ({})", error.file, error.message, error.kind);
    }

    info!(
        "scanned {} files, {} patterns, primary method: {}",
        result.summary.files_scanned,
        result.summary.patterns_detected,
        result.summary.primary_method.as_deref().unwrap_or("none")
    );

    Ok(())
}
