//! View types for template rendering.
//!
//! These carry pre-formatted strings so the templates stay trivial.

use clusterwatch_types::HealthCheck;

/// Badge style used when a check has no label.
pub const DEFAULT_LABEL: &str = "default";

/// Fixed heading of every warning banner.
pub const WARNING_HEADING: &str = "Warning!";

// ── Health check row ────────────────────────────────────────────

/// One `<tr>` of the health-check table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRow {
    /// Row element id; unique per report.
    pub id: String,
    /// Badge style suffix, rendered as `label-{label}`.
    pub label: String,
    /// Badge text.
    pub status: String,
    pub name: String,
    pub duration: String,
    pub description: String,
}

impl CheckRow {
    pub fn from_check(check: &HealthCheck) -> Self {
        Self {
            id: check.id.clone(),
            label: check
                .label
                .clone()
                .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            status: check.status.clone(),
            name: check.name.clone(),
            duration: check.duration.clone(),
            description: check.description.clone(),
        }
    }
}

// ── Warning banner ──────────────────────────────────────────────

/// The "cluster not active" banner shown under the cluster selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningBanner {
    pub heading: &'static str,
    pub message: String,
}

impl WarningBanner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            heading: WARNING_HEADING,
            message: message.into(),
        }
    }
}
