//! Shared pattern schema: the vocabulary every pipeline stage speaks.
//!
//! These types carry no logic beyond construction helpers. Detectors emit
//! [`DetectedPattern`]s, the scanner aggregates them into [`UamAuth`]
//! records inside an [`AnalysisResult`], and the rule engine and generators
//! consume those records downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of evidence supporting a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// A module import of an auth-provider package.
    Import,
    /// A call to a provider auth function.
    FunctionCall,
    /// A UI element that looks like part of a login/registration form.
    UiComponent,
    /// A provider configuration reference.
    Config,
}

/// One located occurrence supporting the conclusion that the auth pattern
/// is present in a file.
///
/// `line` and `column` are 1-based and best-effort: regex-based detectors
/// report column 0 because they only know the matched line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub kind: PatternKind,
    /// Import path, function name, or `"<Tag>[auth]"` for UI evidence.
    pub name: String,
    pub line: usize,
    #[serde(default)]
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl DetectedPattern {
    pub fn new(kind: PatternKind, name: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            line,
            column: 0,
            snippet: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

/// Source languages the scanner can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLanguage {
    Javascript,
    Typescript,
    Swift,
    Kotlin,
}

impl SourceLanguage {
    /// Classify a file purely by extension. Unknown extensions fall back to
    /// the JavaScript detector family rather than being dropped.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "ts" | "tsx" => Self::Typescript,
            "swift" => Self::Swift,
            "kt" => Self::Kotlin,
            _ => Self::Javascript,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
        }
    }
}

/// One source file that contained at least one detected pattern.
///
/// Created once per matching file and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    /// Path relative to the scanned project root.
    pub path: String,
    pub language: SourceLanguage,
    /// Deduplicated, sorted set of lines carrying evidence.
    pub detected_lines: Vec<usize>,
    pub patterns: Vec<DetectedPattern>,
}

impl SourceFile {
    /// Build a source file record, deriving `detected_lines` from the
    /// evidence list.
    pub fn new(
        path: impl Into<String>,
        language: SourceLanguage,
        patterns: Vec<DetectedPattern>,
    ) -> Self {
        let detected_lines: BTreeSet<usize> =
            patterns.iter().map(|p| p.line).collect();

        Self {
            path: path.into(),
            language,
            detected_lines: detected_lines.into_iter().collect(),
            patterns,
        }
    }
}

/// Coarse UI flags aggregated across a language family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiFlags {
    pub has_login_form: bool,
    pub has_password_reset: bool,
    pub has_registration: bool,
}

impl UiFlags {
    /// Union of two flag sets, used when merging UAM records.
    pub fn union(self, other: Self) -> Self {
        Self {
            has_login_form: self.has_login_form || other.has_login_form,
            has_password_reset: self.has_password_reset
                || other.has_password_reset,
            has_registration: self.has_registration || other.has_registration,
        }
    }
}

/// Provider-specific metadata attached to a UAM record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UamMetadata {
    /// Names of `Config`-kind evidence (e.g. `Auth.auth()` references).
    #[serde(default)]
    pub provider_config: Vec<String>,
    pub ui_flags: UiFlags,
}

/// Universal App Model record for one detected authentication feature.
///
/// Framework-agnostic: a Swift app and a React Native app using the same
/// provider produce structurally identical records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UamAuth {
    /// Always `"authentication"` for this record type.
    pub feature: String,
    /// Detected auth method, e.g. `"email_password"`.
    pub method: String,
    /// Detected provider, e.g. `"firebase"`.
    pub provider: String,
    pub source_files: Vec<SourceFile>,
    /// Confidence score in `[0, 100]`. Never 0 for a built record.
    pub confidence: u8,
    pub metadata: UamMetadata,
}

/// A non-fatal error recorded during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisError {
    pub file: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl AnalysisError {
    pub const FILE_READ_ERROR: &'static str = "file_read_error";

    pub fn file_read(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            kind: Self::FILE_READ_ERROR.into(),
        }
    }
}

/// Scan summary derived after UAM merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Total files walked, including unreadable and non-matching ones.
    pub files_scanned: usize,
    /// Sum of evidence counts across the per-family raw detection maps.
    pub patterns_detected: usize,
    /// Method of the highest-confidence UAM record, `None` if none detected.
    pub primary_method: Option<String>,
}

/// Top-level output of a project scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub project_path: String,
    pub timestamp: DateTime<Utc>,
    pub auth_features: Vec<UamAuth>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<AnalysisError>,
    pub summary: AnalysisSummary,
}

impl AnalysisResult {
    /// The highest-confidence UAM record, first-found winning ties.
    pub fn primary_feature(&self) -> Option<&UamAuth> {
        let mut best: Option<&UamAuth> = None;
        for feature in &self.auth_features {
            match best {
                Some(current) if feature.confidence <= current.confidence => {}
                _ => best = Some(feature),
            }
        }
        best
    }
}

/// One artifact produced by the template generator.
///
/// `written = false` signals a local I/O failure without aborting the rest
/// of the generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    /// Path of the emitted file, under the output directory.
    pub path: String,
    pub content: String,
    pub template_name: String,
    pub written: bool,
}

/// Auth scheme reference used in the migration report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportScheme {
    pub method: String,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<String>,
}

/// Parsed actions bucketed by type for the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportActions {
    pub packages_removed: Vec<String>,
    pub packages_added: Vec<String>,
    pub templates_generated: Vec<String>,
    pub files_to_modify: Vec<String>,
    pub files_to_create: Vec<String>,
    pub unknown: Vec<String>,
}

/// Denormalized migration report joining the detected UAM, the chosen rule,
/// the parsed actions and the generated files. Meant for a human reader,
/// not for further machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub generated: DateTime<Utc>,
    pub project_path: String,
    pub rule_id: String,
    pub description: String,
    pub confidence: u8,
    pub source: ReportScheme,
    pub target: ReportScheme,
    pub source_files: Vec<SourceFile>,
    pub actions: ReportActions,
    pub generated_files: Vec<GeneratedFile>,
    pub manual_steps: Vec<String>,
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_file_derives_sorted_deduped_lines() {
        let patterns = vec![
            DetectedPattern::new(PatternKind::Import, "firebase/auth", 3),
            DetectedPattern::new(PatternKind::FunctionCall, "signOut", 12),
            DetectedPattern::new(PatternKind::FunctionCall, "getAuth", 3),
        ];

        let file =
            SourceFile::new("src/auth.js", SourceLanguage::Javascript, patterns);

        assert_eq!(file.detected_lines, vec![3, 12]);
    }

    #[test]
    fn unknown_extension_falls_back_to_javascript() {
        assert_eq!(
            SourceLanguage::from_extension("dart"),
            SourceLanguage::Javascript
        );
        assert_eq!(
            SourceLanguage::from_extension("tsx"),
            SourceLanguage::Typescript
        );
    }

    #[test]
    fn primary_feature_prefers_first_on_tie() {
        let make = |method: &str, confidence: u8| UamAuth {
            feature: "authentication".into(),
            method: method.into(),
            provider: "firebase".into(),
            source_files: vec![],
            confidence,
            metadata: UamMetadata::default(),
        };

        let result = AnalysisResult {
            project_path: ".".into(),
            timestamp: Utc::now(),
            auth_features: vec![make("email_password", 70), make("oauth", 70)],
            errors: vec![],
            summary: AnalysisSummary::default(),
        };

        assert_eq!(
            result.primary_feature().map(|f| f.method.as_str()),
            Some("email_password")
        );
    }
}
