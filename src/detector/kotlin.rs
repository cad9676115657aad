//! Regex-based detector for Kotlin sources.
//!
//! Scans line by line for `com.google.firebase.auth` imports,
//! `FirebaseAuth.getInstance()` references, the email/password call family
//! and view-binding field references that look like auth form fields.
//! Evidence carries the 1-based matched line; column is 0.

use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};

use crate::{
    detector::{
        AuthDetector, FileDetectionResult, build_uam_with, confidence,
    },
    schema::{DetectedPattern, PatternKind, SourceLanguage, UamAuth},
};

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*import\s+(com\.google\.firebase\.auth[\w.]*)").unwrap()
});

static CONFIG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FirebaseAuth\.getInstance\(\)").unwrap());

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\.(signInWithEmailAndPassword|createUserWithEmailAndPassword|sendPasswordResetEmail|signOut|addAuthStateListener)\s*\(",
    )
    .unwrap()
});

static BINDING_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"binding\.(\w*(?i:email|password)\w*)").unwrap()
});

static VIEW_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"R\.id\.(\w*(?i:email|password|login)\w*)").unwrap()
});

pub struct KotlinDetector {}

impl KotlinDetector {
    pub fn new() -> Self {
        Self {}
    }

    fn scan_line(line: &str, line_no: usize, out: &mut FileDetectionResult) {
        let snippet = line.trim();

        if let Some(captures) = IMPORT_RE.captures(line) {
            out.patterns.push(
                DetectedPattern::new(PatternKind::Import, &captures[1], line_no)
                    .with_snippet(snippet),
            );
        }

        if CONFIG_RE.is_match(line) {
            out.patterns.push(
                DetectedPattern::new(
                    PatternKind::Config,
                    "FirebaseAuth.getInstance()",
                    line_no,
                )
                .with_snippet(snippet),
            );
        }

        if let Some(captures) = CALL_RE.captures(line) {
            let name = &captures[1];

            if name == "createUserWithEmailAndPassword" {
                out.has_registration = true;
            }
            if name == "sendPasswordResetEmail" {
                out.has_password_reset = true;
            }

            out.patterns.push(
                DetectedPattern::new(PatternKind::FunctionCall, name, line_no)
                    .with_snippet(snippet),
            );
        }

        if let Some(captures) = BINDING_FIELD_RE.captures(line) {
            out.has_login_form = true;
            out.patterns.push(
                DetectedPattern::new(
                    PatternKind::UiComponent,
                    format!("binding.{}[auth]", &captures[1]),
                    line_no,
                )
                .with_snippet(snippet),
            );
        }

        if let Some(captures) = VIEW_ID_RE.captures(line) {
            out.has_login_form = true;
            out.patterns.push(
                DetectedPattern::new(
                    PatternKind::UiComponent,
                    format!("R.id.{}[auth]", &captures[1]),
                    line_no,
                )
                .with_snippet(snippet),
            );
        }
    }
}

impl AuthDetector for KotlinDetector {
    fn name(&self) -> &str {
        "kotlin"
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
            SourceLanguage::Kotlin,
            confidence::regex_family_confidence,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(source: &str) -> FileDetectionResult {
        KotlinDetector::new().analyze_code(source, "LoginActivity.kt")
    }

    #[test]
    fn detects_firebase_auth_import() {
        let result = analyze("import com.google.firebase.auth.FirebaseAuth\n");

        assert!(result.detected);
        assert_eq!(result.patterns[0].kind, PatternKind::Import);
        assert_eq!(
            result.patterns[0].name,
            "com.google.firebase.auth.FirebaseAuth"
        );
    }

    #[test]
    fn detects_sign_in_call() {
        let result = analyze(
            "auth.signInWithEmailAndPassword(email, password).addOnCompleteListener { }\n",
        );

        assert_eq!(result.patterns[0].kind, PatternKind::FunctionCall);
        assert_eq!(result.patterns[0].name, "signInWithEmailAndPassword");
    }

    #[test]
    fn create_user_sets_registration() {
        let result =
            analyze("auth.createUserWithEmailAndPassword(email, password)\n");
        assert!(result.has_registration);
    }

    #[test]
    fn password_reset_sets_flag() {
        let result = analyze("auth.sendPasswordResetEmail(email)\n");
        assert!(result.has_password_reset);
    }

    #[test]
    fn get_instance_records_config_evidence() {
        let result =
            analyze("private val auth = FirebaseAuth.getInstance()\n");
        assert_eq!(result.patterns[0].kind, PatternKind::Config);
    }

    #[test]
    fn binding_fields_mark_login_form() {
        let source = "val email = binding.emailEditText.text.toString()\nval pw = binding.passwordEditText.text.toString()\n";
        let result = analyze(source);

        assert!(result.has_login_form);
        assert_eq!(result.patterns.len(), 2);
        assert_eq!(result.patterns[0].name, "binding.emailEditText[auth]");
        assert_eq!(result.patterns[1].line, 2);
    }

    #[test]
    fn view_ids_mark_login_form() {
        let result = analyze("val field = findViewById<EditText>(R.id.loginEmailInput)\n");
        assert!(result.has_login_form);
        assert_eq!(result.patterns[0].name, "R.id.loginEmailInput[auth]");
    }

    #[test]
    fn plain_kotlin_file_yields_empty_result() {
        let result = analyze("data class Point(val x: Double, val y: Double)\n");
        assert!(!result.detected);
    }
}
