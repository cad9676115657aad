//! Template generator: turns `generate_template` actions into files on
//! disk.
//!
//! A failed write is reflected per file as `GeneratedFile.written = false`
//! and never aborts generation of the remaining files. Only failure to
//! create the output directory itself is fatal.

use log::*;
use std::{fs, path::PathBuf};

use crate::{
    generator::{context::TemplateContext, templates::TemplateName},
    result::Result,
    rules::ParsedAction,
    schema::GeneratedFile,
};

pub mod context;
pub mod templates;

pub struct TemplateGenerator {
    context: TemplateContext,
    output_dir: PathBuf,
}

impl TemplateGenerator {
    pub fn new(context: TemplateContext, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            context,
            output_dir: output_dir.into(),
        }
    }

    pub fn context(&self) -> &TemplateContext {
        &self.context
    }

    /// Render and write the template named by every `generate_template`
    /// action, in action order. Unknown template names are logged and
    /// skipped.
    pub fn generate_from_actions(
        &self,
        actions: &[ParsedAction],
    ) -> Result<Vec<GeneratedFile>> {
        let mut names = Vec::new();

        for action in actions {
            if let ParsedAction::GenerateTemplate(name) = action {
                match TemplateName::parse(name) {
                    Some(template) => names.push(template),
                    None => warn!("skipping unknown template '{name}'"),
                }
            }
        }

        self.generate(&names)
    }

    /// Render every known template regardless of which actions were
    /// requested. Convenience entry point for scaffolding a full wallet
    /// auth setup.
    pub fn generate_all(&self) -> Result<Vec<GeneratedFile>> {
        self.generate(TemplateName::ALL)
    }

    fn generate(&self, names: &[TemplateName]) -> Result<Vec<GeneratedFile>> {
        if !names.is_empty() {
            fs::create_dir_all(&self.output_dir)?;
        }

        let mut generated = Vec::with_capacity(names.len());

        for name in names {
            let content = templates::render(*name, &self.context)?;
            let file_name = name.file_name(&self.context);
            let path = self.output_dir.join(&file_name);

            let written = match fs::write(&path, &content) {
                Ok(()) => {
                    info!("generated {}", path.display());
                    true
                }
                Err(err) => {
                    warn!("failed to write {}: {err}", path.display());
                    false
                }
            };

            generated.push(GeneratedFile {
                path: path.to_string_lossy().into_owned(),
                content,
                template_name: name.as_str().to_string(),
                written,
            });
        }

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::parse_actions;
    use tempfile::TempDir;

    fn generator(dir: &TempDir) -> TemplateGenerator {
        TemplateGenerator::new(TemplateContext::new("test-app"), dir.path())
    }

    #[test]
    fn generates_one_file_per_template_action() {
        let dir = TempDir::new().unwrap();
        let actions = parse_actions(&[
            "generate_template: polyfills",
            "generate_template: wallet_provider",
            "add_package: @solana/web3.js",
        ]);

        let files = generator(&dir).generate_from_actions(&actions).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.written));
        assert!(dir.path().join("polyfills.js").exists());
        assert!(dir.path().join("WalletProvider.tsx").exists());
    }

    #[test]
    fn unknown_template_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let actions = parse_actions(&[
            "generate_template: hologram",
            "generate_template: polyfills",
        ]);

        let files = generator(&dir).generate_from_actions(&actions).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].template_name, "polyfills");
    }

    #[test]
    fn generate_all_renders_every_template() {
        let dir = TempDir::new().unwrap();

        let files = generator(&dir).generate_all().unwrap();

        assert_eq!(files.len(), TemplateName::ALL.len());
        for file in &files {
            assert!(file.written);
            assert!(!file.content.is_empty());
        }
    }

    #[test]
    fn write_failure_is_reflected_not_propagated() {
        let dir = TempDir::new().unwrap();
        // occupy the target path with a directory so the file write fails
        std::fs::create_dir_all(dir.path().join("polyfills.js")).unwrap();

        let actions = parse_actions(&[
            "generate_template: polyfills",
            "generate_template: use_auth_hook",
        ]);

        let files = generator(&dir).generate_from_actions(&actions).unwrap();

        assert_eq!(files.len(), 2);
        assert!(!files[0].written);
        // the failure did not cancel the second template
        assert!(files[1].written);
        assert!(dir.path().join("useAuth.tsx").exists());
    }
}
