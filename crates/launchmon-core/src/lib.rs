//! # launchmon-core - Core Domain Types
//!
//! Foundation crate for launchmon. Provides the domain types shared by the
//! API client and the polling engine, error handling, the log-line
//! sanitizer, and tracing initialization.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Component`] - A supervisor-managed component (name + status)
//! - [`ComponentStatus`] - Running, Stopped, or Unknown
//! - [`LogLevel`] - Log severity filter value (Error..Debug, plus the `Any` wildcard)
//! - [`LogFilter`] - The (component, level) pair selecting which logs to fetch
//! - [`LogSnapshot`] - The full current window of log lines for a filter
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with recoverability classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ### Sanitizer (`ansi`)
//! - [`strip_escape_seqs()`] - Remove ANSI SGR color sequences from a log line
//! - [`contains_escape_seqs()`] - Cheap check for the above
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use launchmon_core::prelude::*;
//! ```

pub mod ansi;
pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all launchmon crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use ansi::{contains_escape_seqs, strip_escape_seqs};
pub use error::{Error, Result};
pub use types::{Component, ComponentStatus, LogFilter, LogLevel, LogSnapshot};
