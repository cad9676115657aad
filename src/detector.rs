//! Language detectors for the Firebase email/password auth pattern.
//!
//! Three detector families share one contract: the AST-based JS/TS detector
//! (tree-sitter) and two regex-based detectors for Swift and Kotlin. Each
//! produces per-file [`FileDetectionResult`]s which are aggregated into at
//! most one [`UamAuth`] record per language family.

use std::collections::BTreeMap;

use crate::schema::{
    PatternKind, SourceFile, SourceLanguage, UamAuth, UamMetadata, UiFlags,
};

pub mod confidence;
pub mod javascript;
pub mod kotlin;
pub mod swift;
pub mod vocab;

pub use javascript::JavascriptDetector;
pub use kotlin::KotlinDetector;
pub use swift::SwiftDetector;

/// Per-file detection outcome. Empty (default) when nothing matched or the
/// file could not be analyzed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDetectionResult {
    /// Whether the auth pattern family is present in this file.
    pub detected: bool,
    pub patterns: Vec<crate::schema::DetectedPattern>,
    pub has_login_form: bool,
    pub has_password_reset: bool,
    pub has_registration: bool,
}

impl FileDetectionResult {
    pub(crate) fn ui_flags(&self) -> UiFlags {
        UiFlags {
            has_login_form: self.has_login_form,
            has_password_reset: self.has_password_reset,
            has_registration: self.has_registration,
        }
    }
}

/// Contract shared by all detector families.
///
/// `analyze_code` is pure and never fails: parse or tokenize faults inside
/// a detector are swallowed and yield an empty result, since auth detection
/// is best-effort rather than a strict parser.
pub trait AuthDetector {
    /// Detector family name, used in logs.
    fn name(&self) -> &str;

    /// Analyze one file's text and report the evidence found in it.
    fn analyze_code(&self, source: &str, file_path: &str) -> FileDetectionResult;

    /// Aggregate per-file results for this family into zero-or-one UAM
    /// record. Returns `None` when no file in the map reported a match.
    fn build_uam(
        &self,
        results: &BTreeMap<String, FileDetectionResult>,
    ) -> Option<UamAuth>;
}

/// Shared UAM construction: fold every matching file in `results` into one
/// record, scoring confidence with the family's strategy function.
pub(crate) fn build_uam_with(
    results: &BTreeMap<String, FileDetectionResult>,
    language: SourceLanguage,
    confidence_strategy: fn(usize, usize) -> u8,
) -> Option<UamAuth> {
    let mut source_files = Vec::new();
    let mut ui_flags = UiFlags::default();
    let mut provider_config = Vec::new();
    let mut pattern_count = 0usize;

    for (path, result) in results {
        if !result.detected || result.patterns.is_empty() {
            continue;
        }

        pattern_count += result.patterns.len();
        ui_flags = ui_flags.union(result.ui_flags());

        for pattern in &result.patterns {
            if pattern.kind == PatternKind::Config {
                provider_config.push(pattern.name.clone());
            }
        }

        source_files.push(SourceFile::new(
            path.clone(),
            language,
            result.patterns.clone(),
        ));
    }

    if source_files.is_empty() {
        return None;
    }

    provider_config.sort();
    provider_config.dedup();

    let confidence = confidence_strategy(pattern_count, source_files.len());

    Some(UamAuth {
        feature: vocab::AUTH_FEATURE.into(),
        method: vocab::EMAIL_PASSWORD_METHOD.into(),
        provider: vocab::FIREBASE_PROVIDER.into(),
        source_files,
        confidence,
        metadata: UamMetadata {
            provider_config,
            ui_flags,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DetectedPattern;

    fn matched(patterns: Vec<DetectedPattern>) -> FileDetectionResult {
        FileDetectionResult {
            detected: true,
            patterns,
            ..Default::default()
        }
    }

    #[test]
    fn build_uam_with_skips_empty_results() {
        let mut results = BTreeMap::new();
        results.insert("src/a.swift".to_string(), FileDetectionResult::default());

        let uam = build_uam_with(
            &results,
            SourceLanguage::Swift,
            confidence::regex_family_confidence,
        );

        assert!(uam.is_none());
    }

    #[test]
    fn build_uam_with_collects_config_evidence() {
        let mut results = BTreeMap::new();
        results.insert(
            "src/Login.swift".to_string(),
            matched(vec![
                DetectedPattern::new(PatternKind::Config, "Auth.auth()", 4),
                DetectedPattern::new(PatternKind::FunctionCall, "signIn", 9),
            ]),
        );
        results.insert(
            "src/Reset.swift".to_string(),
            matched(vec![DetectedPattern::new(
                PatternKind::Config,
                "Auth.auth()",
                2,
            )]),
        );

        let uam = build_uam_with(
            &results,
            SourceLanguage::Swift,
            confidence::regex_family_confidence,
        )
        .unwrap();

        assert_eq!(uam.source_files.len(), 2);
        assert_eq!(uam.metadata.provider_config, vec!["Auth.auth()"]);
        assert_eq!(uam.method, vocab::EMAIL_PASSWORD_METHOD);
    }
}
