//! # launchmon-app - Polling Engine and View State
//!
//! The log-tailing core of launchmon plus the thin state the CLI renders.
//!
//! ## Public API
//!
//! ### Log Streaming (`stream`)
//! - [`spawn_log_stream()`] - Spawn the polling/cancellation engine for one filter
//! - [`LogStreamHandle`] - Change the filter or detach the stream
//! - [`LogEvent`] - Sanitized snapshot or transient fetch failure
//! - [`LogFetcher`] - Async seam between the engine and the HTTP client
//!
//! ### Component List (`view`)
//! - [`ComponentListView`] - Name-sorted component snapshot for display
//! - [`start_component()`] / [`stop_component()`] - Control actions
//!
//! ### Configuration (`config`)
//! - [`Settings`] - `config.toml` + environment overrides

pub mod config;
pub mod stream;
pub mod view;

pub use config::Settings;
pub use stream::{
    spawn_log_stream, LogEvent, LogFetcher, LogStreamHandle, DEFAULT_POLL_INTERVAL,
};
pub use view::{sort_components, start_component, stop_component, ComponentListView};
