//! Domain types shared by the poller and the dashboard widgets.
//!
//! Everything here is plain data: statuses and reports are produced by
//! external collaborators and only displayed by ClusterWatch.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Cluster status ─────────────────────────────────────────────────

/// Lifecycle state label of a cluster ("Active", "Error", "Starting", ...).
///
/// The label is opaque: ClusterWatch never computes it, it only compares
/// it against [`ClusterStatus::ACTIVE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterStatus(String);

impl ClusterStatus {
    /// The only status that suppresses the job-launch warning.
    pub const ACTIVE: &'static str = "Active";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive comparison with `"Active"`.
    pub fn is_active(&self) -> bool {
        self.0 == Self::ACTIVE
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterStatus {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ClusterStatus {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Cluster display name → lifecycle status, rebuilt for every form render.
pub type ClusterNameStatusMap = HashMap<String, ClusterStatus>;

/// Lifecycle status → warning text shown next to the cluster selector.
pub type StatusMessageMap = HashMap<ClusterStatus, String>;

// ── Health checks ──────────────────────────────────────────────────

/// A single health-check result as served by the verification endpoint.
///
/// All fields except `id` are display strings. `id` becomes the table
/// row identity and must be unique within one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub id: String,
    pub name: String,
    /// Short status code, e.g. `GREEN` or `CHECKING`.
    pub status: String,
    /// Badge style bucket (`success`, `warning`, `danger`, `info`).
    /// The backend sends `null` for statuses it has no bucket for.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

/// One poll's worth of checks plus the backend's continue-polling flag.
///
/// Reports are immutable and replace their predecessor wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub checks: Vec<HealthCheck>,
    #[serde(default)]
    pub need_update: bool,
}

impl HealthReport {
    /// Ids that appear more than once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        duplicate_ids(&self.checks)
    }
}

/// Ids that appear more than once in `checks`, in first-seen order.
///
/// Rows are keyed by id, so duplicates collide in the rendered table.
pub fn duplicate_ids(checks: &[HealthCheck]) -> Vec<&str> {
    let mut seen = HashMap::new();
    let mut dups = Vec::new();
    for check in checks {
        let count = seen.entry(check.id.as_str()).or_insert(0u32);
        *count += 1;
        if *count == 2 {
            dups.push(check.id.as_str());
        }
    }
    dups
}
