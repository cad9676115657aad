//! Conversion rule engine.
//!
//! Rule sets are registered at startup and searched in registration order.
//! The engine never picks a winner: `find_matching_rules` returns every
//! match in table order and callers treat the first as authoritative.

use log::*;
use std::path::Path;

use crate::{
    error::AuthmigrateError,
    rules::types::{ConversionRule, RuleSet},
    schema::UamAuth,
};

/// The rule table shipped with the binary.
const DEFAULT_RULES: &str = include_str!("data/solana_wallet.json");

pub struct RuleEngine {
    rule_sets: Vec<RuleSet>,
}

impl RuleEngine {
    /// Build an engine over explicit rule sets. Tests substitute fixture
    /// tables through this constructor.
    pub fn new(rule_sets: Vec<RuleSet>) -> Self {
        Self { rule_sets }
    }

    /// Build an engine preloaded with the embedded default rule table.
    pub fn with_defaults() -> Result<Self, AuthmigrateError> {
        let default_set: RuleSet = serde_json::from_str(DEFAULT_RULES)?;
        Ok(Self::new(vec![default_set]))
    }

    /// Register an additional rule set, searched after existing ones.
    pub fn register(&mut self, rule_set: RuleSet) {
        debug!(
            "registered rule set v{} with {} rules",
            rule_set.version,
            rule_set.rules.len()
        );
        self.rule_sets.push(rule_set);
    }

    /// Load a rule set document from disk. A malformed table is a broken
    /// deployment and fails loudly, unlike a scan that finds nothing.
    pub fn load_file(path: &Path) -> Result<RuleSet, AuthmigrateError> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            AuthmigrateError::RuleTableLoad {
                path: path.display().to_string(),
                reason: err.to_string(),
            }
        })?;

        let rule_set: RuleSet = serde_json::from_str(&content)?;
        Ok(rule_set)
    }

    /// Every rule whose source matches the UAM's `(method, provider)` pair,
    /// across all registered sets, in table order. Empty when nothing
    /// matches; that is the caller's call to make fatal or not.
    pub fn find_matching_rules(&self, uam: &UamAuth) -> Vec<&ConversionRule> {
        self.rule_sets
            .iter()
            .flat_map(|set| set.rules.iter())
            .filter(|rule| {
                rule.source.method == uam.method
                    && rule.source.provider == uam.provider
            })
            .collect()
    }

    /// Linear search across all registered sets; first match wins.
    pub fn rule_by_id(&self, id: &str) -> Option<&ConversionRule> {
        self.rule_sets
            .iter()
            .flat_map(|set| set.rules.iter())
            .find(|rule| rule.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::UamMetadata;

    fn uam(method: &str, provider: &str) -> UamAuth {
        UamAuth {
            feature: "authentication".into(),
            method: method.into(),
            provider: provider.into(),
            source_files: vec![],
            confidence: 50,
            metadata: UamMetadata::default(),
        }
    }

    fn fixture_set(id: &str, method: &str, provider: &str) -> RuleSet {
        serde_json::from_value(serde_json::json!({
            "version": "0.0.1",
            "rules": [{
                "id": id,
                "source": { "method": method, "provider": provider },
                "target": {
                    "ecosystem": "solana",
                    "method": "wallet_signature",
                    "provider": "mobile_wallet_adapter",
                    "description": "fixture",
                    "actions": ["add_package: @solana/web3.js"]
                }
            }],
            "metadata": {
                "lastUpdated": "2025-01-01",
                "author": "tests",
                "targetPlatform": "react-native"
            }
        }))
        .unwrap()
    }

    #[test]
    fn default_table_parses_and_matches_firebase_email() {
        let engine = RuleEngine::with_defaults().unwrap();
        let matches =
            engine.find_matching_rules(&uam("email_password", "firebase"));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "firebase-email-to-solana-wallet");
        assert_eq!(matches[0].target.ecosystem, "solana");
        assert!(!matches[0].behavioral_notes.is_empty());
        assert!(!matches[0].migration_steps.is_empty());
    }

    #[test]
    fn no_match_returns_empty_not_error() {
        let engine = RuleEngine::with_defaults().unwrap();
        let matches = engine.find_matching_rules(&uam("oauth", "firebase"));
        assert!(matches.is_empty());
    }

    #[test]
    fn rule_sets_are_searched_in_registration_order() {
        let mut engine = RuleEngine::new(vec![fixture_set(
            "first",
            "email_password",
            "firebase",
        )]);
        engine.register(fixture_set("second", "email_password", "firebase"));

        let matches =
            engine.find_matching_rules(&uam("email_password", "firebase"));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "first");
        assert_eq!(matches[1].id, "second");
    }

    #[test]
    fn rule_by_id_finds_first_match() {
        let mut engine =
            RuleEngine::new(vec![fixture_set("a", "email_password", "firebase")]);
        engine.register(fixture_set("b", "email_password", "supabase"));

        assert!(engine.rule_by_id("b").is_some());
        assert!(engine.rule_by_id("missing").is_none());
    }

    #[test]
    fn malformed_table_fails_to_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(RuleEngine::load_file(&path).is_err());
    }
}
