//! The health poller — fetch, render, and reschedule.
//!
//! A [`HealthPoller`] owns one `data_update_url` and drives a strictly
//! sequential loop: the next fetch is only issued after the previous
//! report has been rendered and its `need_update` flag said to continue.
//! At most one re-poll timer is armed at any time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use clusterwatch_types::{HealthCheck, HealthReport};

use crate::config::PollerConfig;
use crate::error::{FetchError, FetchResult};
use crate::source::{HttpReportSource, ReportSource};

/// Alert text shown once when a fetch fails.
pub const UNAVAILABLE_MESSAGE: &str = "Verification is not available.";

/// Where the poller puts its output.
///
/// The view owns the health-check table; the poller never touches it
/// except through these two calls.
pub trait PollView: Send + Sync {
    /// Replace every row of the table with `checks`, in order.
    fn update_health_checks_view(&self, checks: &[HealthCheck]);

    /// Surface a user-visible error notification.
    fn alert(&self, message: &str);
}

/// Why a poller stopped for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The backend reported `need_update: false`.
    Completed,
    /// A fetch failed; the user has been alerted.
    Failed,
    /// [`PollHandle::stop`] was called or the handle was dropped.
    Cancelled,
}

/// Current phase of a poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollPhase {
    /// Constructed, no fetch issued yet.
    Idle,
    /// Waiting for the report.
    Fetching,
    /// Handing checks to the view.
    Rendering,
    /// A re-poll timer is armed.
    Scheduled { delay: Duration },
    /// Terminal.
    Stopped(StopReason),
}

impl PollPhase {
    pub fn is_stopped(&self) -> bool {
        matches!(self, PollPhase::Stopped(_))
    }
}

/// Polls one cluster's verification report until told to stop.
pub struct HealthPoller {
    data_update_url: String,
    config: PollerConfig,
    source: Arc<dyn ReportSource>,
    view: Arc<dyn PollView>,
    phase: watch::Sender<PollPhase>,
}

impl HealthPoller {
    /// Create a poller for `data_update_url` that fetches over HTTP.
    pub fn new(data_update_url: impl Into<String>, view: Arc<dyn PollView>) -> Self {
        let (phase, _) = watch::channel(PollPhase::Idle);
        Self {
            data_update_url: data_update_url.into(),
            config: PollerConfig::default(),
            source: Arc::new(HttpReportSource),
            view,
            phase,
        }
    }

    /// Override timing configuration.
    pub fn with_config(mut self, config: PollerConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetch reports from somewhere other than HTTP.
    pub fn with_source(mut self, source: Arc<dyn ReportSource>) -> Self {
        self.source = source;
        self
    }

    pub fn data_update_url(&self) -> &str {
        &self.data_update_url
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// `{data_update_url}/verifications`.
    pub fn verifications_url(&self) -> String {
        let base = self
            .data_update_url
            .strip_suffix('/')
            .unwrap_or(&self.data_update_url);
        format!("{base}/verifications")
    }

    pub fn phase(&self) -> PollPhase {
        self.phase.borrow().clone()
    }

    /// Watch phase transitions.
    pub fn subscribe(&self) -> watch::Receiver<PollPhase> {
        self.phase.subscribe()
    }

    /// Run one fetch → render → schedule cycle.
    ///
    /// Returns the armed re-poll delay, or `None` when the loop is over
    /// (backend finished, or the fetch failed and the user was alerted).
    pub async fn update_health_checks(&self) -> Option<Duration> {
        let url = self.verifications_url();
        self.set_phase(PollPhase::Fetching);
        debug!(%url, "fetching verification report");

        match self.fetch(&url).await {
            Ok(report) => {
                debug!(
                    %url,
                    checks = report.checks.len(),
                    need_update = report.need_update,
                    "verification report received"
                );
                self.update_health_checks_view(&report.checks);
                self.schedule_next_update(&report)
            }
            Err(e) => {
                warn!(%url, error = %e, "verification fetch failed, polling stopped");
                self.view.alert(UNAVAILABLE_MESSAGE);
                self.set_phase(PollPhase::Stopped(StopReason::Failed));
                None
            }
        }
    }

    /// Clear the table and render `checks` in report order.
    pub fn update_health_checks_view(&self, checks: &[HealthCheck]) {
        self.set_phase(PollPhase::Rendering);
        self.view.update_health_checks_view(checks);
    }

    /// Decide whether to poll again and, if so, after how long.
    ///
    /// The delay is drawn on every call; it is only armed when
    /// `report.need_update` is set.
    pub fn schedule_next_update(&self, report: &HealthReport) -> Option<Duration> {
        let delay = self.config.next_delay();

        if report.need_update {
            debug!(delay_ms = delay.as_millis() as u64, "next verification poll scheduled");
            self.set_phase(PollPhase::Scheduled { delay });
            Some(delay)
        } else {
            info!(url = %self.data_update_url, "verification finished, polling stopped");
            self.set_phase(PollPhase::Stopped(StopReason::Completed));
            None
        }
    }

    /// Drive the loop until it stops or `shutdown` fires.
    ///
    /// Resolves to the terminal phase.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> PollPhase {
        info!(url = %self.data_update_url, "health poller started");

        loop {
            let next = tokio::select! {
                next = self.update_health_checks() => next,
                _ = shutdown.changed() => {
                    self.cancel();
                    break;
                }
            };

            let Some(delay) = next else { break };

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => {
                    self.cancel();
                    break;
                }
            }
        }

        self.phase()
    }

    /// Spawn the loop on the current tokio runtime.
    ///
    /// Dropping the returned handle stops the poller.
    pub fn start(self) -> PollHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let phase_rx = self.subscribe();
        let handle = tokio::spawn(self.run(shutdown_rx));

        PollHandle {
            shutdown_tx,
            phase_rx,
            handle,
        }
    }

    async fn fetch(&self, url: &str) -> FetchResult<HealthReport> {
        match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch(url))
                .await
                .map_err(|_| FetchError::Timeout(limit))?,
            None => self.source.fetch(url).await,
        }
    }

    fn cancel(&self) {
        info!(url = %self.data_update_url, "health poller cancelled");
        self.set_phase(PollPhase::Stopped(StopReason::Cancelled));
    }

    fn set_phase(&self, phase: PollPhase) {
        self.phase.send_replace(phase);
    }
}

/// Handle to a running poller.
pub struct PollHandle {
    shutdown_tx: watch::Sender<bool>,
    phase_rx: watch::Receiver<PollPhase>,
    handle: JoinHandle<PollPhase>,
}

impl PollHandle {
    /// Cancel the poller, disarming any pending re-poll timer.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn phase(&self) -> PollPhase {
        self.phase_rx.borrow().clone()
    }

    /// Watch phase transitions.
    pub fn subscribe(&self) -> watch::Receiver<PollPhase> {
        self.phase_rx.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the poller to stop and return its terminal phase.
    ///
    /// A poller task that panicked counts as [`StopReason::Failed`].
    pub async fn wait(self) -> PollPhase {
        let PollHandle {
            shutdown_tx: _keep_running,
            phase_rx: _,
            handle,
        } = self;

        match handle.await {
            Ok(phase) => phase,
            Err(e) => {
                error!(error = %e, "health poller task failed");
                PollPhase::Stopped(StopReason::Failed)
            }
        }
    }
}
