//! Verification report assembly.
//!
//! The verification backend is an external collaborator, but the rules
//! it applies to raw check results are fixed: status → badge label,
//! empty description fallback, `H:MM:SS` durations, and "keep polling
//! while anything is still checking". They live here so a backend or a
//! test stub can build reports the widgets understand.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::types::{HealthCheck, HealthReport};

/// Status of a check that has not finished yet.
pub const STATUS_CHECKING: &str = "CHECKING";

/// Description used when a check carries none.
pub const NO_DESCRIPTION: &str = "No description";

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// A check result as recorded by the verification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCheck {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
    /// Missing or empty while the check is still running.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Badge label for a per-check status, matched case-insensitively.
pub fn label_for_status(status: &str) -> Option<&'static str> {
    match status.to_ascii_lowercase().as_str() {
        "red" => Some("danger"),
        "yellow" => Some("warning"),
        "green" => Some("success"),
        "checking" => Some("info"),
        _ => None,
    }
}

/// Badge label for a cluster-level health summary.
///
/// Unlike [`label_for_status`] this is exact-match on the upper-case
/// summary values and falls back to `default`.
pub fn health_badge_label(health: &str) -> &'static str {
    match health {
        "GREEN" => "success",
        "YELLOW" => "warning",
        "RED" => "danger",
        "CHECKING" => "info",
        _ => "default",
    }
}

/// Build a report from raw results, measuring running checks against now.
pub fn assemble_report(raw: Vec<RawCheck>) -> ReportResult<HealthReport> {
    assemble_report_at(raw, Utc::now().naive_utc())
}

/// Build a report from raw results with an explicit "now".
pub fn assemble_report_at(raw: Vec<RawCheck>, now: NaiveDateTime) -> ReportResult<HealthReport> {
    let mut not_done = 0usize;
    let mut checks = Vec::with_capacity(raw.len());

    for check in raw {
        if check.status == STATUS_CHECKING {
            not_done += 1;
        }

        let start = parse_timestamp(&check.created_at)?;
        let end = match check.updated_at.as_deref() {
            Some(ts) if !ts.is_empty() => parse_timestamp(ts)?,
            _ => now,
        };

        let description = match check.description {
            Some(d) if !d.is_empty() => d,
            _ => NO_DESCRIPTION.to_string(),
        };

        checks.push(HealthCheck {
            label: label_for_status(&check.status).map(str::to_string),
            duration: format_delta(end - start),
            id: check.id,
            name: check.name,
            status: check.status,
            description,
        });
    }

    debug!(checks = checks.len(), not_done, "verification report assembled");

    Ok(HealthReport {
        checks,
        need_update: not_done > 0,
    })
}

/// Elapsed time between two timestamps, rendered as `H:MM:SS`.
///
/// Spans of a day or more are prefixed with `N day(s), `. A negative span
/// (clock skew between services) renders as `0:00:00`.
pub fn format_duration(start: &str, end: &str) -> ReportResult<String> {
    Ok(format_delta(parse_timestamp(end)? - parse_timestamp(start)?))
}

fn format_delta(delta: chrono::TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    let days = total / 86_400;
    let rem = total % 86_400;
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

fn parse_timestamp(value: &str) -> ReportResult<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(ts);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.naive_utc())
        .map_err(|e| ReportError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
