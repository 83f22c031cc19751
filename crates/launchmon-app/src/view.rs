//! Component list state and control actions.
//!
//! Deliberately thin: the list is a read-only snapshot refreshed on demand
//! and sorted for deterministic display; the control actions forward to the
//! API client. None of this is concurrency-hard -- the engine in
//! [`crate::stream`] is.

use launchmon_api::ApiClient;
use launchmon_core::prelude::*;
use launchmon_core::Component;

/// The latest component snapshot, sorted by name for stable display.
#[derive(Debug, Clone, Default)]
pub struct ComponentListView {
    components: Vec<Component>,
}

impl ComponentListView {
    /// Re-fetch the component list from the supervisor.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<()> {
        let mut components = client.list_components().await?;
        sort_components(&mut components);
        self.components = components;
        Ok(())
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

/// Sort components by name ascending, case-sensitive ordinal compare.
pub fn sort_components(components: &mut [Component]) {
    components.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Ask the supervisor to start `name`.
///
/// Failures are logged here so list-style callers can fire and forget; the
/// `Result` is still returned so a caller that wants to surface the error
/// can.
pub async fn start_component(client: &ApiClient, name: &str) -> Result<()> {
    client
        .start(name)
        .await
        .inspect_err(|err| warn!("start {name} failed: {err}"))
}

/// Ask the supervisor to stop `name`. Same error contract as
/// [`start_component`].
pub async fn stop_component(client: &ApiClient, name: &str) -> Result<()> {
    client
        .stop(name)
        .await
        .inspect_err(|err| warn!("stop {name} failed: {err}"))
}
