//! Migration report generation.
//!
//! Pure aggregation over earlier stages' outputs: the detected UAM, the
//! chosen rule, the parsed actions and the generated file list become one
//! human-readable Markdown document. Nothing here affects earlier stages.

use log::*;
use std::path::{Path, PathBuf};

use crate::{
    result::Result,
    rules::{ConversionRule, ParsedAction},
    schema::{
        GeneratedFile, MigrationReport, ReportActions, ReportScheme, UamAuth,
    },
};

pub const REPORT_FILE_NAME: &str = "MIGRATION_REPORT.md";

const REPORT_TEMPLATE: &str = r#"# Migration Report — {{ projectPath }}

- **Rule**: `{{ ruleId }}`
- **Generated**: {{ generated | date(format="%Y-%m-%d") }}
- **From**: {{ source.method }} ({{ source.provider }})
- **To**: {{ target.method }} ({{ target.provider }}, {{ target.ecosystem | default(value="unknown") }})
- **Detection confidence**: {{ confidence }}/100

{{ description }}

## Detected evidence
{% for file in sourceFiles %}
### `{{ file.path }}` ({{ file.language }})

| Line | Kind | Name |
|------|------|------|
{% for pattern in file.patterns -%}
| {{ pattern.line }} | {{ pattern.kind }} | `{{ pattern.name }}` |
{% endfor %}
{%- endfor %}

## Packages
{% if actions.packagesRemoved %}
Remove:
{% for pkg in actions.packagesRemoved %}- `{{ pkg }}`
{% endfor %}{% endif %}{% if actions.packagesAdded %}
Add:
{% for pkg in actions.packagesAdded %}- `{{ pkg }}`
{% endfor %}{% endif %}
## Generated files
{% for file in generatedFiles %}
- `{{ file.path }}`{% if not file.written %} — **write failed**{% endif %}
{%- endfor %}
{% if actions.filesToModify %}
## Files to modify by hand
{% for file in actions.filesToModify %}
- `{{ file }}`
{%- endfor %}
{% endif %}{% if actions.filesToCreate %}
## Files to create by hand
{% for file in actions.filesToCreate %}
- `{{ file }}`
{%- endfor %}
{% endif %}{% if actions.unknown %}
## Unrecognized actions
{% for raw in actions.unknown %}
- `{{ raw }}`
{%- endfor %}
{% endif %}{% if manualSteps %}
## Manual steps
{% for step in manualSteps %}
{{ loop.index }}. {{ step }}
{%- endfor %}
{% endif %}{% if notes %}
## Behavioral notes
{% for note in notes %}
- {{ note }}
{%- endfor %}
{% endif %}
"#;

pub struct ReportGenerator {}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {}
    }

    /// Join the pipeline outputs into a report document.
    pub fn generate(
        &self,
        project_path: &str,
        uam: &UamAuth,
        rule: &ConversionRule,
        actions: &[ParsedAction],
        generated_files: &[GeneratedFile],
    ) -> MigrationReport {
        MigrationReport {
            generated: chrono::Utc::now(),
            project_path: project_path.to_string(),
            rule_id: rule.id.clone(),
            description: rule.target.description.clone(),
            confidence: uam.confidence,
            source: ReportScheme {
                method: uam.method.clone(),
                provider: uam.provider.clone(),
                ecosystem: None,
            },
            target: ReportScheme {
                method: rule.target.method.clone(),
                provider: rule.target.provider.clone(),
                ecosystem: Some(rule.target.ecosystem.clone()),
            },
            source_files: uam.source_files.clone(),
            actions: bucket_actions(actions),
            generated_files: generated_files.to_vec(),
            manual_steps: rule.migration_steps.clone(),
            notes: rule.behavioral_notes.clone(),
        }
    }

    /// Render the report to Markdown and write it into the output
    /// directory, returning the written path.
    pub fn write(
        &self,
        report: &MigrationReport,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let context = tera::Context::from_serialize(report)?;
        let markdown = tera::Tera::one_off(REPORT_TEMPLATE, &context, false)?;

        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(REPORT_FILE_NAME);
        std::fs::write(&path, markdown)?;
        info!("wrote migration report to {}", path.display());

        Ok(path)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket parsed actions by type for the report's actions section.
fn bucket_actions(actions: &[ParsedAction]) -> ReportActions {
    let mut buckets = ReportActions::default();

    for action in actions {
        match action {
            ParsedAction::RemovePackage(pkg) => {
                buckets.packages_removed.push(pkg.clone());
            }
            ParsedAction::AddPackage(pkg) => {
                buckets.packages_added.push(pkg.clone());
            }
            ParsedAction::GenerateTemplate(name) => {
                buckets.templates_generated.push(name.clone());
            }
            ParsedAction::ModifyFile(path) => {
                buckets.files_to_modify.push(path.clone());
            }
            ParsedAction::CreateFile(path) => {
                buckets.files_to_create.push(path.clone());
            }
            ParsedAction::Unknown { raw } => {
                buckets.unknown.push(raw.clone());
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rules::{RuleEngine, parse_actions},
        schema::UamMetadata,
    };
    use tempfile::TempDir;

    fn fixture_uam() -> UamAuth {
        UamAuth {
            feature: "authentication".into(),
            method: "email_password".into(),
            provider: "firebase".into(),
            source_files: vec![],
            confidence: 65,
            metadata: UamMetadata::default(),
        }
    }

    fn fixture_rule() -> ConversionRule {
        let engine = RuleEngine::with_defaults().unwrap();
        engine
            .rule_by_id("firebase-email-to-solana-wallet")
            .unwrap()
            .clone()
    }

    #[test]
    fn buckets_actions_by_type() {
        let actions = parse_actions(&[
            "remove_package: firebase",
            "add_package: @solana/web3.js",
            "generate_template: polyfills",
            "modify_file: App.tsx",
            "bogus",
        ]);

        let buckets = bucket_actions(&actions);

        assert_eq!(buckets.packages_removed, vec!["firebase"]);
        assert_eq!(buckets.packages_added, vec!["@solana/web3.js"]);
        assert_eq!(buckets.templates_generated, vec!["polyfills"]);
        assert_eq!(buckets.files_to_modify, vec!["App.tsx"]);
        assert_eq!(buckets.unknown, vec!["bogus"]);
        assert!(buckets.files_to_create.is_empty());
    }

    #[test]
    fn generate_sources_notes_and_steps_from_rule() {
        let rule = fixture_rule();
        let report = ReportGenerator::new().generate(
            "/tmp/project",
            &fixture_uam(),
            &rule,
            &parse_actions(&rule.target.actions),
            &[],
        );

        assert_eq!(report.rule_id, rule.id);
        assert_eq!(report.confidence, 65);
        assert_eq!(report.notes, rule.behavioral_notes);
        assert_eq!(report.manual_steps, rule.migration_steps);
        assert_eq!(report.target.ecosystem.as_deref(), Some("solana"));
    }

    #[test]
    fn writes_markdown_report() {
        let dir = TempDir::new().unwrap();
        let rule = fixture_rule();
        let generator = ReportGenerator::new();
        let report = generator.generate(
            "/tmp/project",
            &fixture_uam(),
            &rule,
            &parse_actions(&rule.target.actions),
            &[GeneratedFile {
                path: "out/polyfills.js".into(),
                content: String::new(),
                template_name: "polyfills".into(),
                written: true,
            }],
        );

        let path = generator.write(&report, dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), REPORT_FILE_NAME);
        let markdown = std::fs::read_to_string(path).unwrap();
        assert!(markdown.contains("firebase-email-to-solana-wallet"));
        assert!(markdown.contains("`out/polyfills.js`"));
        assert!(markdown.contains("## Manual steps"));
    }
}
