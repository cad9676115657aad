//! Rule table document shape, matching the on-disk JSON format.

use serde::{Deserialize, Serialize};

/// A versioned rule table loaded from a JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub version: String,
    pub rules: Vec<ConversionRule>,
    pub metadata: RuleSetMetadata,
}

/// Authoring metadata carried on every rule table document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSetMetadata {
    pub last_updated: String,
    pub author: String,
    pub target_platform: String,
    #[serde(default)]
    pub supported_frameworks: Vec<String>,
}

/// One migration path from a detected `(method, provider)` pair to a target
/// auth scheme. Read-only at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRule {
    pub id: String,
    pub source: RuleSource,
    pub target: RuleTarget,
    /// Behavioral differences the developer should know about; feeds the
    /// report's notes section.
    #[serde(default)]
    pub behavioral_notes: Vec<String>,
    /// Manual follow-up steps; feeds the report's manual steps section.
    #[serde(default)]
    pub migration_steps: Vec<String>,
}

/// The detected scheme a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSource {
    pub method: String,
    pub provider: String,
}

/// The target scheme plus the ordered action list that realizes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTarget {
    pub ecosystem: String,
    pub method: String,
    pub provider: String,
    pub description: String,
    /// Flat `"<type>: <value>"` action strings, parsed downstream.
    pub actions: Vec<String>,
}
