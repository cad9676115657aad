//! Render context shared by all templates.

use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

/// Values available to every template. `extra` is flattened into the tera
/// context so callers can extend it without a code change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext {
    pub project_name: String,
    /// Display name used inside generated UI code.
    pub app_name: String,
    pub use_type_script: bool,
    pub generated_date: String,
    /// Solana cluster the generated code connects to.
    pub solana_cluster: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TemplateContext {
    pub fn new(project_name: impl Into<String>) -> Self {
        let project_name = project_name.into();
        Self {
            app_name: project_name.clone(),
            project_name,
            use_type_script: true,
            generated_date: Utc::now().format("%Y-%m-%d").to_string(),
            solana_cluster: "devnet".to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Extension for generated component files. `polyfills` ignores this
    /// and always emits `.js`.
    pub fn component_extension(&self) -> &'static str {
        if self.use_type_script { "tsx" } else { "jsx" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_track_typescript_flag() {
        let mut context = TemplateContext::new("my-app");
        assert_eq!(context.component_extension(), "tsx");

        context.use_type_script = false;
        assert_eq!(context.component_extension(), "jsx");
        assert_eq!(context.app_name, "my-app");
        assert_eq!(context.solana_cluster, "devnet");
    }
}
