//! # launchmon-api - Supervisor HTTP Client
//!
//! Typed façade over the remote supervisor's REST endpoints: list managed
//! components, issue start/stop control actions, and fetch one page of log
//! lines for a [`LogFilter`].
//!
//! Depends on [`launchmon_core`] for domain types and error handling.
//!
//! This layer does no retrying -- retry policy belongs to the polling
//! engine in `launchmon-app`, which treats every error here as transient.
//!
//! [`LogFilter`]: launchmon_core::LogFilter

pub mod client;

pub use client::ApiClient;
