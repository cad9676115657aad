//! AST-based detector for JavaScript/TypeScript sources.
//!
//! Parses files with the tree-sitter TSX grammar (a superset that accepts
//! plain JS, JSX, TS and TSX) and walks the tree for import declarations,
//! `require()` calls, auth function calls and auth-looking JSX form
//! elements. Parse failures are swallowed: the file simply contributes no
//! evidence.

use log::*;
use std::collections::BTreeMap;
use tree_sitter::{Node, Parser};

use crate::{
    detector::{
        AuthDetector, FileDetectionResult, build_uam_with, confidence, vocab,
    },
    error::AuthmigrateError,
    schema::{DetectedPattern, PatternKind, SourceLanguage, UamAuth},
};

const SNIPPET_MAX_CHARS: usize = 120;

pub struct JavascriptDetector {}

impl JavascriptDetector {
    pub fn new() -> Self {
        Self {}
    }

    /// Build UAM records for the whole JS/TS family, partitioning the
    /// result map by extension first: `.ts`/`.tsx` files score as their own
    /// record, everything else (including unknown extensions routed to this
    /// family) scores as JavaScript. Returned in JS-then-TS order.
    pub fn build_family_uams(
        &self,
        results: &BTreeMap<String, FileDetectionResult>,
    ) -> Vec<UamAuth> {
        let mut js_results = BTreeMap::new();
        let mut ts_results = BTreeMap::new();

        for (path, result) in results {
            if is_typescript_path(path) {
                ts_results.insert(path.clone(), result.clone());
            } else {
                js_results.insert(path.clone(), result.clone());
            }
        }

        let mut uams = Vec::new();

        if let Some(uam) = build_uam_with(
            &js_results,
            SourceLanguage::Javascript,
            confidence::ast_family_confidence,
        ) {
            uams.push(uam);
        }

        if let Some(uam) = build_uam_with(
            &ts_results,
            SourceLanguage::Typescript,
            confidence::ast_family_confidence,
        ) {
            uams.push(uam);
        }

        uams
    }

    fn try_analyze(
        &self,
        source: &str,
    ) -> Result<FileDetectionResult, AuthmigrateError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .map_err(|e| AuthmigrateError::GrammarError(e.to_string()))?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            AuthmigrateError::GrammarError("parser produced no tree".into())
        })?;

        let mut result = FileDetectionResult::default();
        visit(tree.root_node(), source, &mut result);
        result.detected = !result.patterns.is_empty();

        Ok(result)
    }
}

impl AuthDetector for JavascriptDetector {
    fn name(&self) -> &str {
        "javascript"
    }

    fn analyze_code(&self, source: &str, file_path: &str) -> FileDetectionResult {
        match self.try_analyze(source) {
            Ok(result) => result,
            Err(err) => {
                debug!("auth detection skipped for {file_path}: {err}");
                FileDetectionResult::default()
            }
        }
    }

    fn build_uam(
        &self,
        results: &BTreeMap<String, FileDetectionResult>,
    ) -> Option<UamAuth> {
        build_uam_with(
            results,
            SourceLanguage::Javascript,
            confidence::ast_family_confidence,
        )
    }
}

fn is_typescript_path(path: &str) -> bool {
    path.ends_with(".ts") || path.ends_with(".tsx")
}

fn visit(node: Node, source: &str, out: &mut FileDetectionResult) {
    match node.kind() {
        "import_statement" => inspect_import(node, source, out),
        "call_expression" => inspect_call(node, source, out),
        "jsx_opening_element" | "jsx_self_closing_element" => {
            inspect_jsx_element(node, source, out);
        }
        _ => {}
    }

    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            visit(child, source, out);
        }
    }
}

/// Rule 1: module imports from the package allow-list mark the file. Named
/// imports matching the function allow-list are recorded as additional
/// evidence, not deduplicated against the module-level import.
fn inspect_import(node: Node, source: &str, out: &mut FileDetectionResult) {
    let Some(module) = node
        .child_by_field_name("source")
        .and_then(|n| string_value(n, source))
    else {
        return;
    };

    if !vocab::is_auth_package(&module) {
        return;
    }

    out.patterns
        .push(pattern_at(PatternKind::Import, module, node, source));

    collect_import_specifiers(node, source, out);
}

fn collect_import_specifiers(
    node: Node,
    source: &str,
    out: &mut FileDetectionResult,
) {
    if node.kind() == "import_specifier" {
        if let Some(name_node) = node.child_by_field_name("name") {
            let name = node_text(name_node, source);
            if vocab::JS_AUTH_FUNCTIONS.contains(&name) {
                out.patterns.push(pattern_at(
                    PatternKind::Import,
                    name.to_string(),
                    name_node,
                    source,
                ));
            }
        }
        return;
    }

    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            collect_import_specifiers(child, source, out);
        }
    }
}

/// Rules 2 and 4: calls to allow-listed provider functions, either as bare
/// identifiers or member-expression properties, plus `require("<pkg>")`.
fn inspect_call(node: Node, source: &str, out: &mut FileDetectionResult) {
    let Some(function) = node.child_by_field_name("function") else {
        return;
    };

    match function.kind() {
        "identifier" => {
            let name = node_text(function, source);
            if name == "require" {
                inspect_require(node, source, out);
            } else if vocab::JS_AUTH_FUNCTIONS.contains(&name) {
                record_call(name, function, source, out);
            }
        }
        "member_expression" => {
            if let Some(property) = function.child_by_field_name("property") {
                let name = node_text(property, source);
                if vocab::JS_AUTH_FUNCTIONS.contains(&name) {
                    record_call(name, property, source, out);
                }
            }
        }
        _ => {}
    }
}

fn record_call(
    name: &str,
    node: Node,
    source: &str,
    out: &mut FileDetectionResult,
) {
    if name == vocab::CREATE_USER_FUNCTION {
        out.has_registration = true;
    }
    if name == vocab::PASSWORD_RESET_FUNCTION {
        out.has_password_reset = true;
    }

    out.patterns.push(pattern_at(
        PatternKind::FunctionCall,
        name.to_string(),
        node,
        source,
    ));
}

/// A `require(<string literal>)` of an allow-listed package is equivalent
/// to a static import.
fn inspect_require(node: Node, source: &str, out: &mut FileDetectionResult) {
    let Some(arguments) = node.child_by_field_name("arguments") else {
        return;
    };

    for i in 0..arguments.named_child_count() {
        let Some(argument) = arguments.named_child(i) else {
            continue;
        };
        if let Some(module) = string_value(argument, source) {
            if vocab::is_auth_package(&module) {
                out.patterns
                    .push(pattern_at(PatternKind::Import, module, node, source));
            }
        }
    }
}

/// Rule 3: input and button JSX elements whose attribute values contain
/// auth-related substrings mark the file as carrying a login form. One
/// evidence item per element, named `"<Tag>[auth]"`.
fn inspect_jsx_element(node: Node, source: &str, out: &mut FileDetectionResult) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };

    let tag = node_text(name_node, source);
    if !vocab::AUTH_INPUT_TAGS.contains(&tag)
        && !vocab::AUTH_BUTTON_TAGS.contains(&tag)
    {
        return;
    }

    for i in 0..node.named_child_count() {
        let Some(attribute) = node.named_child(i) else {
            continue;
        };
        if attribute.kind() != "jsx_attribute" {
            continue;
        }

        let Some(attr_name) = attribute.named_child(0) else {
            continue;
        };
        if !vocab::UI_ATTRIBUTES.contains(&node_text(attr_name, source)) {
            continue;
        }

        let mut value = None;
        for j in 1..attribute.named_child_count() {
            if let Some(v) =
                attribute.named_child(j).and_then(|n| string_value(n, source))
            {
                value = Some(v);
                break;
            }
        }

        if value.is_some_and(|v| vocab::contains_auth_hint(&v)) {
            out.has_login_form = true;
            out.patterns.push(pattern_at(
                PatternKind::UiComponent,
                format!("{tag}[auth]"),
                node,
                source,
            ));
            return;
        }
    }
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn string_value(node: Node, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }

    Some(
        node_text(node, source)
            .trim_matches(&['"', '\'', '`'][..])
            .to_string(),
    )
}

fn pattern_at(
    kind: PatternKind,
    name: String,
    node: Node,
    source: &str,
) -> DetectedPattern {
    let pos = node.start_position();
    DetectedPattern::new(kind, name, pos.row + 1)
        .with_column(pos.column + 1)
        .with_snippet(line_snippet(source, pos.row))
}

fn line_snippet(source: &str, row: usize) -> String {
    source
        .lines()
        .nth(row)
        .map(str::trim)
        .unwrap_or("")
        .chars()
        .take(SNIPPET_MAX_CHARS)
        .collect()
}
