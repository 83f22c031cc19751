//! The log polling/cancellation engine.
//!
//! One spawned task per active log view. The task continuously re-fetches
//! the log snapshot for a *current* [`LogFilter`] that the consumer may
//! replace at any time, and guarantees that:
//!
//! - at most one fetch is in flight at any time,
//! - a filter change abandons the in-flight fetch and refetches immediately
//!   without resetting the tick cadence,
//! - a superseded fetch's result is discarded on arrival, never applied,
//! - a fetch error is reported as a transient signal and polling continues.
//!
//! The loop is an explicit event machine: it `select!`s over the interval
//! tick, the filter watch channel, an internal completion channel carrying
//! `(fetch_id, result)`, and a shutdown watch channel. Every fetch is tagged
//! with a monotonically increasing id and a completion is applied only when
//! its id matches the current in-flight id -- that single check gives the
//! discard-superseded-result behavior. Aborting the superseded task is
//! best-effort on top of it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use launchmon_core::prelude::*;
use launchmon_core::{strip_escape_seqs, LogFilter, LogSnapshot};

/// How often an active stream re-fetches its snapshot.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Capacity of the consumer-facing event channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Capacity of the internal fetch-completion channel. Only one fetch is in
/// flight at a time, so this never backs up.
const COMPLETION_CHANNEL_CAPACITY: usize = 4;

/// Async seam between the polling engine and the HTTP client.
///
/// Implemented by `ApiClient` for production and by hand-rolled fakes in
/// tests that need to control completion order.
#[trait_variant::make(Send)]
pub trait LogFetcher {
    /// Fetch the current snapshot of raw (unsanitized) log lines for `filter`.
    async fn fetch_log(&self, filter: &LogFilter) -> Result<LogSnapshot>;
}

impl LogFetcher for launchmon_api::ApiClient {
    async fn fetch_log(&self, filter: &LogFilter) -> Result<LogSnapshot> {
        launchmon_api::ApiClient::fetch_log(self, filter).await
    }
}

/// What an active stream emits to its consumer.
#[derive(Debug)]
pub enum LogEvent {
    /// A sanitized snapshot replacing the previously emitted one wholesale.
    Snapshot(LogSnapshot),
    /// A fetch failed; the stream keeps polling and the consumer keeps the
    /// last good snapshot.
    FetchFailed(Error),
}

/// Handle to one active log stream.
///
/// Owns the filter channel, the shutdown channel, and the task. Dropping
/// the handle (or the event receiver) also stops the stream; [`detach`]
/// does so deterministically.
///
/// [`detach`]: LogStreamHandle::detach
#[derive(Debug)]
pub struct LogStreamHandle {
    filter_tx: watch::Sender<LogFilter>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl LogStreamHandle {
    /// Replace the stream's filter.
    ///
    /// The in-flight fetch for the old filter (if any) is abandoned and a
    /// fetch for the new filter is issued immediately; the tick cadence is
    /// not reset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelClosed`] if the stream task has already
    /// stopped.
    pub fn set_filter(&self, filter: LogFilter) -> Result<()> {
        self.filter_tx
            .send(filter)
            .map_err(|_| Error::ChannelClosed)
    }

    /// The filter the stream is currently polling with.
    pub fn current_filter(&self) -> LogFilter {
        self.filter_tx.borrow().clone()
    }

    /// Stop the stream: cancel any in-flight fetch, clear the timer, and
    /// wait for the task to finish. No emissions occur afterwards.
    pub async fn detach(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the polling engine for `initial_filter`.
///
/// Issues a fetch immediately (tick 0), then re-fetches every
/// `poll_interval` for as long as the stream stays active. Returns the
/// control handle and the event receiver; dropping the receiver detaches
/// the stream.
pub fn spawn_log_stream<F>(
    fetcher: Arc<F>,
    initial_filter: LogFilter,
    poll_interval: Duration,
) -> (LogStreamHandle, mpsc::Receiver<LogEvent>)
where
    F: LogFetcher + Send + Sync + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (filter_tx, filter_rx) = watch::channel(initial_filter);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(run_stream(
        fetcher,
        filter_rx,
        shutdown_rx,
        event_tx,
        poll_interval,
    ));

    (
        LogStreamHandle {
            filter_tx,
            shutdown_tx,
            task,
        },
        event_rx,
    )
}

/// The single in-flight fetch slot.
struct InFlight {
    id: u64,
    task: JoinHandle<()>,
}

async fn run_stream<F>(
    fetcher: Arc<F>,
    mut filter_rx: watch::Receiver<LogFilter>,
    mut shutdown_rx: watch::Receiver<bool>,
    event_tx: mpsc::Sender<LogEvent>,
    poll_interval: Duration,
) where
    F: LogFetcher + Send + Sync + 'static,
{
    // The first tick completes immediately (tick 0); the cadence stays
    // anchored at stream start no matter how often the filter changes.
    let mut tick = tokio::time::interval(poll_interval);
    let (done_tx, mut done_rx) =
        mpsc::channel::<(u64, Result<LogSnapshot>)>(COMPLETION_CHANNEL_CAPACITY);
    let mut next_fetch_id: u64 = 0;
    let mut in_flight: Option<InFlight> = None;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                start_fetch(&fetcher, &filter_rx, &done_tx, &mut next_fetch_id, &mut in_flight);
            }

            changed = filter_rx.changed() => {
                if changed.is_err() {
                    // Handle dropped without an explicit detach.
                    break;
                }
                debug!("filter now {}, refetching immediately", *filter_rx.borrow());
                start_fetch(&fetcher, &filter_rx, &done_tx, &mut next_fetch_id, &mut in_flight);
            }

            Some((id, result)) = done_rx.recv() => {
                let current = matches!(&in_flight, Some(InFlight { id: expected, .. }) if *expected == id);
                if !current {
                    debug!("discarding superseded fetch {id}");
                    continue;
                }
                in_flight = None;

                let event = match result {
                    Ok(lines) => LogEvent::Snapshot(
                        lines.iter().map(|line| strip_escape_seqs(line)).collect(),
                    ),
                    Err(err) => {
                        warn!("log fetch {id} failed, retrying on next tick: {err}");
                        LogEvent::FetchFailed(err)
                    }
                };
                if event_tx.send(event).await.is_err() {
                    // Consumer dropped the receiver.
                    break;
                }
            }

            changed = shutdown_rx.changed() => {
                // A dropped handle counts as detaching.
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!("log stream detached");
                    break;
                }
            }
        }
    }

    if let Some(stale) = in_flight.take() {
        stale.task.abort();
    }
}

/// Issue a fetch for the filter that is current *now*, superseding any
/// in-flight one.
///
/// The superseded task is aborted best-effort; even if its result was
/// already queued on the completion channel, the id check in the loop
/// discards it.
fn start_fetch<F>(
    fetcher: &Arc<F>,
    filter_rx: &watch::Receiver<LogFilter>,
    done_tx: &mpsc::Sender<(u64, Result<LogSnapshot>)>,
    next_fetch_id: &mut u64,
    in_flight: &mut Option<InFlight>,
) where
    F: LogFetcher + Send + Sync + 'static,
{
    if let Some(old) = in_flight.take() {
        debug!("superseding in-flight fetch {}", old.id);
        old.task.abort();
    }

    let id = *next_fetch_id;
    *next_fetch_id += 1;

    let filter = filter_rx.borrow().clone();
    let fetcher = Arc::clone(fetcher);
    let done_tx = done_tx.clone();
    let task = tokio::spawn(async move {
        let result = fetcher.fetch_log(&filter).await;
        let _ = done_tx.send((id, result)).await;
    });

    *in_flight = Some(InFlight { id, task });
}
