use std::fs;
use tempfile::TempDir;

use super::*;

const JS_LOGIN: &str = r#"
import { signInWithEmailAndPassword } from "firebase/auth";

export async function login(auth, email, password) {
  return signInWithEmailAndPassword(auth, email, password);
}
"#;

const TS_REGISTER: &str = r#"
import { createUserWithEmailAndPassword } from "firebase/auth";

export async function register(auth: unknown, email: string, password: string) {
  return createUserWithEmailAndPassword(auth, email, password);
}
"#;

const SWIFT_LOGIN: &str = r#"
import FirebaseAuth

func login(email: String, password: String) {
    Auth.auth().signIn(withEmail: email, password: password) { _, _ in }
}
"#;

fn write(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

async fn scan(dir: &TempDir) -> AnalysisResult {
    let scanner = Scanner::new();
    let options = ScanOptions::new(dir.path());
    scanner.analyze_project(&options).await.unwrap()
}

#[test_log::test(tokio::test)]
async fn single_js_file_produces_one_uam() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/login.js", JS_LOGIN);

    let result = scan(&dir).await;

    assert_eq!(result.auth_features.len(), 1);
    let uam = &result.auth_features[0];
    assert_eq!(uam.method, "email_password");
    assert_eq!(uam.provider, "firebase");
    assert!(uam.confidence >= 10);
    assert_eq!(uam.source_files.len(), 1);
    assert_eq!(uam.source_files[0].path, "src/login.js");
    assert_eq!(
        result.summary.primary_method.as_deref(),
        Some("email_password")
    );
}

#[test_log::test(tokio::test)]
async fn empty_project_detects_nothing() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/util.js", "export const add = (a, b) => a + b;\n");

    let result = scan(&dir).await;

    assert!(result.auth_features.is_empty());
    assert_eq!(result.summary.primary_method, None);
    assert_eq!(result.summary.patterns_detected, 0);
    assert_eq!(result.summary.files_scanned, 1);
}

#[test_log::test(tokio::test)]
async fn js_and_ts_files_merge_into_one_feature() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/login.js", JS_LOGIN);
    write(&dir, "src/register.ts", TS_REGISTER);

    let result = scan(&dir).await;

    assert_eq!(result.auth_features.len(), 1);
    let uam = &result.auth_features[0];
    assert_eq!(uam.source_files.len(), 2);
    assert!(uam.metadata.ui_flags.has_registration);

    // merged confidence is the max of both family scores
    let scanner = Scanner::new();
    let js_only = {
        let js_dir = TempDir::new().unwrap();
        write(&js_dir, "src/login.js", JS_LOGIN);
        scanner
            .analyze_project(&ScanOptions::new(js_dir.path()))
            .await
            .unwrap()
            .auth_features[0]
            .confidence
    };
    let ts_only = {
        let ts_dir = TempDir::new().unwrap();
        write(&ts_dir, "src/register.ts", TS_REGISTER);
        scanner
            .analyze_project(&ScanOptions::new(ts_dir.path()))
            .await
            .unwrap()
            .auth_features[0]
            .confidence
    };
    assert_eq!(uam.confidence, js_only.max(ts_only));
}

#[test_log::test(tokio::test)]
async fn swift_merges_by_method_into_js_feature() {
    let dir = TempDir::new().unwrap();
    write(&dir, "app/login.js", JS_LOGIN);
    write(&dir, "ios/Login.swift", SWIFT_LOGIN);

    let result = scan(&dir).await;

    assert_eq!(result.auth_features.len(), 1);
    let languages: Vec<_> = result.auth_features[0]
        .source_files
        .iter()
        .map(|f| f.language)
        .collect();
    assert!(languages.contains(&SourceLanguage::Javascript));
    assert!(languages.contains(&SourceLanguage::Swift));
}

#[test_log::test(tokio::test)]
async fn excluded_directories_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(&dir, "node_modules/firebase/index.js", JS_LOGIN);
    write(&dir, "app/deep/node_modules/lib.js", JS_LOGIN);
    write(&dir, "app/login.js", JS_LOGIN);

    let result = scan(&dir).await;

    assert_eq!(result.summary.files_scanned, 1);
    assert_eq!(result.auth_features[0].source_files[0].path, "app/login.js");
}

#[test_log::test(tokio::test)]
async fn unreadable_file_is_reported_and_excluded() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/login.js", JS_LOGIN);
    // invalid UTF-8 makes read_to_string fail without touching permissions
    fs::write(dir.path().join("src/bad.js"), [0xC3, 0x28, 0xA0, 0xFF]).unwrap();

    let result = scan(&dir).await;

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].file, "src/bad.js");
    assert_eq!(result.errors[0].kind, AnalysisError::FILE_READ_ERROR);
    for feature in &result.auth_features {
        assert!(feature.source_files.iter().all(|f| f.path != "src/bad.js"));
    }
    // unreadable files still count as scanned
    assert_eq!(result.summary.files_scanned, 2);
}

#[test_log::test(tokio::test)]
async fn unknown_extension_falls_back_to_js_detector() {
    let dir = TempDir::new().unwrap();
    write(&dir, "lib/widget.dart", "class Widget { final int x = 0; }\n");

    let scanner = Scanner::new();
    let mut options = ScanOptions::new(dir.path());
    options.extensions.push("dart".to_string());

    // must not fail: the JS detector parses what it can and reports nothing
    let result = scanner.analyze_project(&options).await.unwrap();
    assert!(result.auth_features.is_empty());
    assert_eq!(result.summary.files_scanned, 1);
}

#[test_log::test(tokio::test)]
async fn repeated_scans_are_deterministic() {
    let dir = TempDir::new().unwrap();
    write(&dir, "src/login.js", JS_LOGIN);
    write(&dir, "src/register.ts", TS_REGISTER);
    write(&dir, "ios/Login.swift", SWIFT_LOGIN);

    let first = scan(&dir).await;
    let second = scan(&dir).await;

    assert_eq!(first.auth_features, second.auth_features);
    assert_eq!(first.summary, second.summary);
}
