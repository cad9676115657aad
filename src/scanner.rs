//! Project scanner: discovers source files, routes each one to the right
//! detector family and merges the per-family UAM records into one
//! [`AnalysisResult`].
//!
//! File reads are independent async operations; aggregation is a
//! synchronous single-pass reduction over the collected result maps. A file
//! that cannot be read is recorded as a non-fatal [`AnalysisError`] and the
//! scan continues.

use chrono::Utc;
use log::*;
use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::{
    detector::{
        AuthDetector, FileDetectionResult, JavascriptDetector, KotlinDetector,
        SwiftDetector,
    },
    result::Result,
    schema::{
        AnalysisError, AnalysisResult, AnalysisSummary, SourceLanguage, UamAuth,
    },
    scanner::merge::merge_by_method,
};

pub mod merge;

#[cfg(test)]
mod tests;

/// Default file-extension allow-list.
pub const DEFAULT_EXTENSIONS: &[&str] =
    &["js", "jsx", "ts", "tsx", "swift", "kt"];

/// Default directory exclude-list: dependency, build and VCS directories.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    "node_modules",
    "build",
    "dist",
    "out",
    ".git",
    ".gradle",
    "Pods",
    "DerivedData",
    "vendor",
    "coverage",
];

/// Options controlling a project scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Root directory to scan.
    pub root: PathBuf,
    /// File extensions to include (without leading dot).
    pub extensions: Vec<String>,
    /// Directory names excluded at any depth.
    pub exclude_dirs: Vec<String>,
    /// Log per-file detection results at info level.
    pub verbose: bool,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            verbose: false,
        }
    }
}

/// Drives the per-language detectors over a project tree.
pub struct Scanner {
    javascript: JavascriptDetector,
    swift: SwiftDetector,
    kotlin: KotlinDetector,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            javascript: JavascriptDetector::new(),
            swift: SwiftDetector::new(),
            kotlin: KotlinDetector::new(),
        }
    }

    /// Scan a project tree and produce the merged analysis result.
    pub async fn analyze_project(
        &self,
        options: &ScanOptions,
    ) -> Result<AnalysisResult> {
        let files = discover_files(options);
        info!(
            "scanning {} files under {}",
            files.len(),
            options.root.display()
        );

        let mut js_results: BTreeMap<String, FileDetectionResult> =
            BTreeMap::new();
        let mut swift_results: BTreeMap<String, FileDetectionResult> =
            BTreeMap::new();
        let mut kotlin_results: BTreeMap<String, FileDetectionResult> =
            BTreeMap::new();
        let mut errors: Vec<AnalysisError> = Vec::new();

        for path in &files {
            let relative = relative_path(&options.root, path);

            let source = match tokio::fs::read_to_string(path).await {
                Ok(source) => source,
                Err(err) => {
                    warn!("failed to read {relative}: {err}");
                    errors.push(AnalysisError::file_read(
                        relative,
                        err.to_string(),
                    ));
                    continue;
                }
            };

            let language = classify(path);
            let (detector, results): (
                &dyn AuthDetector,
                &mut BTreeMap<String, FileDetectionResult>,
            ) = match language {
                SourceLanguage::Swift => (&self.swift, &mut swift_results),
                SourceLanguage::Kotlin => (&self.kotlin, &mut kotlin_results),
                _ => (&self.javascript, &mut js_results),
            };

            let result = detector.analyze_code(&source, &relative);

            if options.verbose && result.detected {
                info!(
                    "{relative}: {} auth patterns ({})",
                    result.patterns.len(),
                    detector.name()
                );
            } else if result.detected {
                debug!("{relative}: {} auth patterns", result.patterns.len());
            }

            results.insert(relative, result);
        }

        // patternsDetected comes from the raw per-family maps so that
        // cross-family merging cannot double count.
        let patterns_detected = count_patterns(&js_results)
            + count_patterns(&swift_results)
            + count_patterns(&kotlin_results);

        let auth_features = self.merge_families(
            &js_results,
            &swift_results,
            &kotlin_results,
        );

        let primary_method = primary_method(&auth_features);

        Ok(AnalysisResult {
            project_path: options.root.to_string_lossy().into_owned(),
            timestamp: Utc::now(),
            auth_features,
            errors,
            summary: AnalysisSummary {
                files_scanned: files.len(),
                patterns_detected,
                primary_method,
            },
        })
    }

    /// Build each family's UAM records and fold them together. The JS UAM
    /// lands first, then the TS record merges into it when the method
    /// matches, then Swift and Kotlin each merge-by-method independently.
    fn merge_families(
        &self,
        js_results: &BTreeMap<String, FileDetectionResult>,
        swift_results: &BTreeMap<String, FileDetectionResult>,
        kotlin_results: &BTreeMap<String, FileDetectionResult>,
    ) -> Vec<UamAuth> {
        let mut features = Vec::new();

        for uam in self.javascript.build_family_uams(js_results) {
            features = merge_by_method(features, Some(uam));
        }

        features =
            merge_by_method(features, self.swift.build_uam(swift_results));
        features =
            merge_by_method(features, self.kotlin.build_uam(kotlin_results));

        features
    }
}

/// Walk the root, excluding any path under an excluded directory name at
/// any depth, and collect deduplicated paths matching the extension
/// allow-list. The returned list is sorted for reproducible runs.
fn discover_files(options: &ScanOptions) -> Vec<PathBuf> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    let walker = WalkDir::new(&options.root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !options.exclude_dirs.iter().any(|dir| dir.as_str() == name)
        });

    for entry in walker.flatten() {
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                options.extensions.iter().any(|allowed| allowed == ext)
            });

        if matches {
            found.insert(entry.path().to_path_buf());
        }
    }

    found.into_iter().collect()
}

fn classify(path: &Path) -> SourceLanguage {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    SourceLanguage::from_extension(ext)
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn count_patterns(results: &BTreeMap<String, FileDetectionResult>) -> usize {
    results.values().map(|r| r.patterns.len()).sum()
}

fn primary_method(features: &[UamAuth]) -> Option<String> {
    let mut best: Option<&UamAuth> = None;
    for feature in features {
        match best {
            Some(current) if feature.confidence <= current.confidence => {}
            _ => best = Some(feature),
        }
    }
    best.map(|f| f.method.clone())
}
