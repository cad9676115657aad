//! Configuration loading and parsing for `authmigrate.toml` files.
//!
//! The config file is optional: every field has a default, and CLI flags
//! override file values.

use serde::Deserialize;
use std::path::Path;

use crate::{
    error::AuthmigrateError,
    result::Result,
    scanner::{DEFAULT_EXCLUDE_DIRS, DEFAULT_EXTENSIONS},
};

/// Default configuration filename, looked up in the scanned project root.
pub const DEFAULT_CONFIG_FILE: &str = "authmigrate.toml";

/// Default output directory for generated artifacts and the report.
pub const DEFAULT_OUTPUT_DIR: &str = "authmigrate-out";

/// Scan settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to include, without leading dot.
    pub extensions: Vec<String>,
    /// Directory names excluded at any depth.
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Codegen settings threaded into the template context.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Project name; defaults to the scanned directory's name.
    pub project_name: Option<String>,
    /// Display name used inside generated UI code; defaults to the
    /// project name.
    pub app_name: Option<String>,
    /// Emit `.tsx` components instead of `.jsx` (default: true).
    pub use_typescript: bool,
    /// Solana cluster the generated code connects to (default: devnet).
    pub solana_cluster: String,
    /// Output directory for generated files (default: authmigrate-out).
    pub output_dir: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_name: None,
            app_name: None,
            use_typescript: true,
            solana_cluster: "devnet".to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

/// Root configuration structure for `authmigrate.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scan settings.
    pub scan: ScanConfig,
    /// Codegen settings.
    pub generator: GeneratorConfig,
    /// Additional rule table JSON files, registered after the built-in
    /// table.
    pub rule_tables: Vec<String>,
}

/// Load `authmigrate.toml` from the project root, falling back to defaults
/// when the file does not exist. A present-but-malformed file is an error.
pub fn load_config(project_root: &Path) -> Result<Config> {
    let path = project_root.join(DEFAULT_CONFIG_FILE);

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config: Config =
        toml::from_str(&content).map_err(AuthmigrateError::TomlParseError)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path()).unwrap();

        assert!(config.generator.use_typescript);
        assert_eq!(config.generator.solana_cluster, "devnet");
        assert!(config.scan.extensions.contains(&"swift".to_string()));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[generator]\nsolana_cluster = \"mainnet-beta\"\nuse_typescript = false\n",
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();

        assert_eq!(config.generator.solana_cluster, "mainnet-beta");
        assert!(!config.generator.use_typescript);
        assert_eq!(config.generator.output_dir, DEFAULT_OUTPUT_DIR);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[[[not toml")
            .unwrap();

        assert!(load_config(dir.path()).is_err());
    }
}
