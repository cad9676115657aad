//! Migrate command: scan, match a conversion rule, generate artifacts and
//! write the migration report.

use log::*;
use std::path::{Path, PathBuf};

use crate::{
    cli, command, config,
    generator::{TemplateGenerator, context::TemplateContext},
    report::ReportGenerator,
    result::Result,
    rules::{ParsedAction, RuleEngine, parse_actions},
    scanner::Scanner,
};

pub async fn execute(
    args: &cli::Args,
    path: &Path,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let config = config::load_config(path)?;
    let engine = build_engine(args, path, &config)?;

    let scanner = Scanner::new();
    let options = command::scan_options(path, &config, args.verbose);
    let result = scanner.analyze_project(&options).await?;

    let Some(primary) = result.primary_feature() else {
        warn!("no authentication patterns detected: nothing to migrate");
        return Ok(());
    };

    info!(
        "migrating {} via {} (confidence {}/100)",
        primary.method, primary.provider, primary.confidence
    );

    let matches = engine.find_matching_rules(primary);
    let Some(rule) = matches.first() else {
        warn!(
            "no conversion rule matches method '{}' from provider '{}'",
            primary.method, primary.provider
        );
        return Ok(());
    };

    if matches.len() > 1 {
        debug!(
            "{} rules matched; using '{}' (first in table order)",
            matches.len(),
            rule.id
        );
    }

    let actions = parse_actions(&rule.target.actions);
    for action in &actions {
        if let ParsedAction::Unknown { raw } = action {
            warn!("ignoring unrecognized action: {raw}");
        }
    }

    if dry_run {
        info!(
            "dry run: rule '{}' parsed into {} actions, skipping generation",
            rule.id,
            actions.len()
        );
        return Ok(());
    }

    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.generator.output_dir));

    let generator =
        TemplateGenerator::new(template_context(path, &config), &output_dir);
    let files = generator.generate_from_actions(&actions)?;

    let report_generator = ReportGenerator::new();
    let report = report_generator.generate(
        &result.project_path,
        primary,
        rule,
        &actions,
        &files,
    );
    report_generator.write(&report, &output_dir)?;

    let written = files.iter().filter(|f| f.written).count();
    info!(
        "generated {written}/{} files in {}",
        files.len(),
        output_dir.display()
    );

    Ok(())
}

fn build_engine(
    args: &cli::Args,
    project_root: &Path,
    config: &config::Config,
) -> Result<RuleEngine> {
    let mut engine = RuleEngine::with_defaults()?;

    for table in &config.rule_tables {
        engine.register(RuleEngine::load_file(&project_root.join(table))?);
    }

    for table in &args.rule_tables {
        engine.register(RuleEngine::load_file(table)?);
    }

    Ok(engine)
}

fn template_context(path: &Path, config: &config::Config) -> TemplateContext {
    let project_name = config.generator.project_name.clone().unwrap_or_else(|| {
        path.canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "app".to_string())
    });

    let mut context = TemplateContext::new(project_name);
    if let Some(app_name) = &config.generator.app_name {
        context.app_name = app_name.clone();
    }
    context.use_type_script = config.generator.use_typescript;
    context.solana_cluster = config.generator.solana_cluster.clone();
    context
}
