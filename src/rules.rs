//! Conversion rule tables and the action grammar.
//!
//! Rule tables are static, versioned JSON documents: adding a new migration
//! path means appending a rule entry, with no code change as long as the
//! action vocabulary is reused.

pub mod actions;
pub mod engine;
pub mod types;

pub use actions::{ParsedAction, parse_actions};
pub use engine::RuleEngine;
pub use types::{ConversionRule, RuleSet, RuleSetMetadata, RuleSource, RuleTarget};
