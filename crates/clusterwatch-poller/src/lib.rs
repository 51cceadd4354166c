//! clusterwatch-poller — self-scheduling health-check poller.
//!
//! Fetches a cluster's verification report, hands the checks to a view,
//! and re-polls after a jittered delay until the backend reports that no
//! further update is needed.
//!
//! # Architecture
//!
//! ```text
//! HealthPoller
//!   ├── ReportSource (HTTP GET {data_update_url}/verifications)
//!   ├── PollView (render checks, surface alerts)
//!   └── PollerConfig::next_delay() → 2001..=3000 ms
//!
//! Idle → Fetching → Rendering → Scheduled ─(timer)→ Fetching
//!                       │            └─(stop)→ Stopped(Cancelled)
//!                       └→ Stopped(Completed | Failed)
//! ```
//!
//! # Failure
//!
//! A failed fetch is reported once through [`PollView::alert`] and ends
//! the loop for good. There is no retry and no backoff.

pub mod config;
pub mod error;
pub mod poller;
pub mod source;

pub use config::PollerConfig;
pub use error::{FetchError, FetchResult};
pub use poller::{HealthPoller, PollHandle, PollPhase, PollView, StopReason, UNAVAILABLE_MESSAGE};
pub use source::{FetchFuture, HttpReportSource, ReportSource, get_report};
