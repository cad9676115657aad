//! authmigrate: detects Firebase email/password authentication in app
//! source trees and migrates it to Solana wallet-based authentication.
//!
//! The pipeline runs in stages: the [`scanner`] walks a project and drives
//! the per-language [`detector`]s, producing Universal App Model records;
//! the [`rules`] engine matches those records against declarative
//! conversion tables; the [`generator`] renders replacement artifacts; and
//! the [`report`] module writes a human-readable migration report.

pub mod cli;
pub mod command;
pub mod config;
pub mod detector;
pub mod error;
pub mod generator;
pub mod report;
pub mod result;
pub mod rules;
pub mod scanner;
pub mod schema;

pub use result::Result;
pub use scanner::{ScanOptions, Scanner};
