//! Regex-based detector for Swift sources.
//!
//! Scans line by line for FirebaseAuth imports, `Auth.auth()` references,
//! the email/password call family (`signIn(withEmail:)`,
//! `createUser(withEmail:)`, `sendPasswordReset(withEmail:)`) and SwiftUI
//! form constructs. Evidence carries the 1-based matched line; column is 0
//! because line-scoped regexes do not track it.

use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};

use crate::{
    detector::{
        AuthDetector, FileDetectionResult, build_uam_with, confidence, vocab,
    },
    schema::{DetectedPattern, PatternKind, SourceLanguage, UamAuth},
};

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*import\s+(FirebaseAuth|Firebase)\b").unwrap()
});

static CONFIG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Auth\.auth\(\)").unwrap());

static SIGN_IN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.signIn\s*\(\s*withEmail").unwrap());

static CREATE_USER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.createUser\s*\(\s*withEmail").unwrap());

static PASSWORD_RESET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.sendPasswordReset\s*\(\s*withEmail").unwrap()
});

static SIGN_OUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.signOut\s*\(\s*\)").unwrap());

static LISTENER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.addStateDidChangeListener\s*\(").unwrap()
});

static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(TextField|SecureField)\s*\(\s*"([^"]*)""#).unwrap()
});

static BUTTON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"Button\s*\(\s*"([^"]*)""#).unwrap());

pub struct SwiftDetector {}

impl SwiftDetector {
    pub fn new() -> Self {
        Self {}
    }

    fn scan_line(
        line: &str,
        line_no: usize,
        out: &mut FileDetectionResult,
    ) {
        let snippet = line.trim();

        if let Some(captures) = IMPORT_RE.captures(line) {
            out.patterns.push(
                DetectedPattern::new(PatternKind::Import, &captures[1], line_no)
                    .with_snippet(snippet),
            );
        }

        if CONFIG_RE.is_match(line) {
            out.patterns.push(
                DetectedPattern::new(PatternKind::Config, "Auth.auth()", line_no)
                    .with_snippet(snippet),
            );
        }

        if SIGN_IN_RE.is_match(line) {
            out.patterns.push(
                DetectedPattern::new(PatternKind::FunctionCall, "signIn", line_no)
                    .with_snippet(snippet),
            );
        }

        if CREATE_USER_RE.is_match(line) {
            out.has_registration = true;
            out.patterns.push(
                DetectedPattern::new(
                    PatternKind::FunctionCall,
                    "createUser",
                    line_no,
                )
                .with_snippet(snippet),
            );
        }

        if PASSWORD_RESET_RE.is_match(line) {
            out.has_password_reset = true;
            out.patterns.push(
                DetectedPattern::new(
                    PatternKind::FunctionCall,
                    "sendPasswordReset",
                    line_no,
                )
                .with_snippet(snippet),
            );
        }

        if SIGN_OUT_RE.is_match(line) {
            out.patterns.push(
                DetectedPattern::new(
                    PatternKind::FunctionCall,
                    "signOut",
                    line_no,
                )
                .with_snippet(snippet),
            );
        }

        if LISTENER_RE.is_match(line) {
            out.patterns.push(
                DetectedPattern::new(
                    PatternKind::FunctionCall,
                    "addStateDidChangeListener",
                    line_no,
                )
                .with_snippet(snippet),
            );
        }

        if let Some(captures) = INPUT_RE.captures(line) {
            if vocab::contains_auth_hint(&captures[2]) {
                out.has_login_form = true;
                out.patterns.push(
                    DetectedPattern::new(
                        PatternKind::UiComponent,
                        format!("{}[auth]", &captures[1]),
                        line_no,
                    )
                    .with_snippet(snippet),
                );
            }
        }

        if let Some(captures) = BUTTON_RE.captures(line) {
            if vocab::contains_auth_hint(&captures[1]) {
                out.has_login_form = true;
                out.patterns.push(
                    DetectedPattern::new(
                        PatternKind::UiComponent,
                        "Button[auth]",
                        line_no,
                    )
                    .with_snippet(snippet),
                );
            }
        }
    }
}

impl AuthDetector for SwiftDetector {
    fn name(&self) -> &str {
        "swift"
    }

    fn analyze_code(&self, source: &str, _file_path: &str) -> FileDetectionResult {
        let mut result = FileDetectionResult::default();

        for (index, line) in source.lines().enumerate() {
            Self::scan_line(line, index + 1, &mut result);
        }

        result.detected = !result.patterns.is_empty();
        result
    }

    fn build_uam(
        &self,
        results: &BTreeMap<String, FileDetectionResult>,
    ) -> Option<UamAuth> {
        build_uam_with(
            results,
            SourceLanguage::Swift,
            confidence::regex_family_confidence,
        )
    }
}
