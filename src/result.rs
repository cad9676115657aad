//! Unified result type for authmigrate.
//!
//! All fallible functions in this crate return the `Result<T>` alias defined
//! here, built on `color-eyre` for contextual, readable error reports. Add
//! context as errors propagate with `.wrap_err()`.

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout authmigrate.
pub type Result<T> = EyreResult<T>;
