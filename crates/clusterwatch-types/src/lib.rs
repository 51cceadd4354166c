//! clusterwatch-types — shared data model for ClusterWatch.
//!
//! Holds the types exchanged between the verification backend, the
//! health-check poller, and the dashboard widgets:
//!
//! - [`ClusterStatus`] and the name/status and status/message maps used
//!   by the job-launch warning banner.
//! - [`HealthCheck`] and [`HealthReport`], the JSON body served at
//!   `{data_update_url}/verifications`.
//! - Report assembly rules ([`report`]) that turn raw verification
//!   results into display-ready checks.

pub mod error;
pub mod report;
pub mod types;

pub use error::{ReportError, ReportResult};
pub use report::{
    RawCheck, assemble_report, assemble_report_at, format_duration, health_badge_label,
    label_for_status,
};
pub use types::*;
