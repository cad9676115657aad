//! Parser for the flat action string grammar: `"<type>: <value>"`.
//!
//! Intentionally forgiving: a malformed string or an unrecognized type
//! becomes [`ParsedAction::Unknown`] for the caller to warn about, never an
//! error that aborts the pipeline.

use serde::Serialize;

/// Separator between an action's type and its payload. Only the first
/// occurrence splits, so payloads may contain `": "` themselves.
const SEPARATOR: &str = ": ";

/// A typed migration action derived from a rule's action strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParsedAction {
    /// Remove a dependency from the project manifest.
    RemovePackage(String),
    /// Add a dependency to the project manifest.
    AddPackage(String),
    /// Render a named template into the output directory.
    GenerateTemplate(String),
    /// Flag an existing file for manual modification.
    ModifyFile(String),
    /// Flag a file that must be created manually.
    CreateFile(String),
    /// Anything the parser does not recognize, carried verbatim.
    Unknown { raw: String },
}

impl ParsedAction {
    /// Action type tag, as it appears in rule tables and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RemovePackage(_) => "remove_package",
            Self::AddPackage(_) => "add_package",
            Self::GenerateTemplate(_) => "generate_template",
            Self::ModifyFile(_) => "modify_file",
            Self::CreateFile(_) => "create_file",
            Self::Unknown { .. } => "unknown",
        }
    }
}

/// Parse each action string by splitting on the first `": "`.
pub fn parse_actions<S: AsRef<str>>(action_strings: &[S]) -> Vec<ParsedAction> {
    action_strings
        .iter()
        .map(|s| parse_action(s.as_ref()))
        .collect()
}

fn parse_action(raw: &str) -> ParsedAction {
    let Some((kind, value)) = raw.split_once(SEPARATOR) else {
        return ParsedAction::Unknown { raw: raw.into() };
    };

    let value = value.to_string();

    match kind {
        "remove_package" => ParsedAction::RemovePackage(value),
        "add_package" => ParsedAction::AddPackage(value),
        "generate_template" => ParsedAction::GenerateTemplate(value),
        "modify_file" => ParsedAction::ModifyFile(value),
        "create_file" => ParsedAction::CreateFile(value),
        _ => ParsedAction::Unknown { raw: raw.into() },
    }
}
