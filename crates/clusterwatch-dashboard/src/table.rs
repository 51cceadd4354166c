//! Health-check table widget.
//!
//! [`HealthChecksPanel`] owns the `<tbody>` of the health-check table and
//! the page's alert area. A poller writes into it through [`PollView`];
//! the page reads it back as HTML.

use std::sync::{Mutex, RwLock};

use tracing::{debug, error, info, warn};

use clusterwatch_poller::PollView;
use clusterwatch_types::{HealthCheck, duplicate_ids};

use crate::error::ViewResult;
use crate::partials::{AlertsPartial, HEALTH_CHECKS_BODY_ID, HealthRowsPartial, render};
use crate::views::CheckRow;

// ── Alerts ──────────────────────────────────────────────────────

/// Severity of a page alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertLevel {
    /// Bootstrap alert class suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "danger",
        }
    }
}

/// A fire-and-forget notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

/// Alerts raised on the page, oldest first.
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: Mutex<Vec<Alert>>,
}

impl AlertLog {
    pub fn push(&self, level: AlertLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            AlertLevel::Error => error!(%message, "alert raised"),
            AlertLevel::Warning => warn!(%message, "alert raised"),
            AlertLevel::Success | AlertLevel::Info => info!(%message, "alert raised"),
        }
        self.lock().push(Alert { level, message });
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn render(&self) -> ViewResult<String> {
        let alerts = self.alerts();
        render(&AlertsPartial { alerts: &alerts })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Alert>> {
        self.alerts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ── Table ───────────────────────────────────────────────────────

/// The health-check table body plus the alert area.
#[derive(Debug, Default)]
pub struct HealthChecksPanel {
    rows: RwLock<Vec<CheckRow>>,
    alerts: AlertLog,
}

impl HealthChecksPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rows, in display order.
    pub fn rows(&self) -> Vec<CheckRow> {
        self.rows.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn row_count(&self) -> usize {
        self.rows.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    /// Render the `<tbody>` fragment.
    pub fn render_body(&self) -> ViewResult<String> {
        let rows = self.rows();
        render(&HealthRowsPartial {
            body_id: HEALTH_CHECKS_BODY_ID,
            rows: &rows,
        })
    }

    /// Drop every row.
    pub fn clear(&self) {
        self.rows.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Append one row for `check` at the end of `rows`.
    fn create_check_row(rows: &mut Vec<CheckRow>, check: &HealthCheck) {
        rows.push(CheckRow::from_check(check));
    }
}

impl PollView for HealthChecksPanel {
    fn update_health_checks_view(&self, checks: &[HealthCheck]) {
        let dups = duplicate_ids(checks);
        if !dups.is_empty() {
            warn!(ids = ?dups, "health checks share row ids");
        }

        let mut rows = self.rows.write().unwrap_or_else(|e| e.into_inner());
        rows.clear();
        for check in checks {
            Self::create_check_row(&mut rows, check);
        }
        debug!(rows = rows.len(), "health check table redrawn");
    }

    fn alert(&self, message: &str) {
        self.alerts.push(AlertLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use clusterwatch_poller::{FetchResult, HealthPoller, PollPhase, ReportSource, StopReason};
    use clusterwatch_types::HealthReport;

    use super::*;

    fn check(id: &str, name: &str, status: &str, label: &str) -> HealthCheck {
        HealthCheck {
            id: id.to_string(),
            name: name.to_string(),
            status: status.to_string(),
            label: Some(label.to_string()),
            duration: "0:00:03".to_string(),
            description: format!("{name} check"),
        }
    }

    #[test]
    fn redraw_replaces_existing_rows() {
        let panel = HealthChecksPanel::new();
        panel.update_health_checks_view(&[check("old", "Stale", "RED", "danger")]);
        assert_eq!(panel.row_count(), 1);

        let checks = vec![
            check("c1", "NTP", "GREEN", "success"),
            check("c2", "HDFS", "YELLOW", "warning"),
            check("c3", "YARN", "CHECKING", "info"),
        ];
        panel.update_health_checks_view(&checks);

        let rows = panel.rows();
        assert_eq!(rows.len(), 3);
        for (row, check) in rows.iter().zip(&checks) {
            assert_eq!(row.id, check.id);
            assert_eq!(row.status, check.status);
            assert_eq!(row.name, check.name);
            assert_eq!(row.duration, check.duration);
            assert_eq!(row.description, check.description);
        }
        assert!(!panel.render_body().unwrap().contains("Stale"));
    }

    #[test]
    fn redraw_keeps_duplicates_and_order() {
        let panel = HealthChecksPanel::new();
        panel.update_health_checks_view(&[
            check("b", "Second", "GREEN", "success"),
            check("a", "First", "GREEN", "success"),
            check("b", "Again", "RED", "danger"),
        ]);

        let ids: Vec<String> = panel.rows().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["b", "a", "b"]);
    }

    #[test]
    fn empty_report_clears_table() {
        let panel = HealthChecksPanel::new();
        panel.update_health_checks_view(&[check("c1", "NTP", "GREEN", "success")]);
        panel.update_health_checks_view(&[]);
        assert_eq!(panel.row_count(), 0);
    }

    #[test]
    fn alerts_are_errors() {
        let panel = HealthChecksPanel::new();
        panel.alert("Verification is not available.");

        assert_eq!(
            panel.alerts().alerts(),
            vec![Alert {
                level: AlertLevel::Error,
                message: "Verification is not available.".to_string(),
            }]
        );
        assert!(panel.alerts().render().unwrap().contains("alert-danger"));
    }

    struct OneShot(HealthReport);

    impl ReportSource for OneShot {
        fn fetch<'a>(&'a self, _url: &'a str) -> clusterwatch_poller::FetchFuture<'a> {
            let report: FetchResult<HealthReport> = Ok(self.0.clone());
            Box::pin(async move { report })
        }
    }

    #[tokio::test]
    async fn poller_renders_into_panel() {
        let panel = Arc::new(HealthChecksPanel::new());
        let report = HealthReport {
            checks: vec![HealthCheck {
                id: "c1".to_string(),
                name: "NTP".to_string(),
                status: "green".to_string(),
                label: Some("success".to_string()),
                duration: "2s".to_string(),
                description: "ok".to_string(),
            }],
            need_update: false,
        };

        let phase = HealthPoller::new("http://dashboard.local/cluster/c1", panel.clone())
            .with_source(Arc::new(OneShot(report)))
            .start()
            .wait()
            .await;

        assert_eq!(phase, PollPhase::Stopped(StopReason::Completed));
        let html = panel.render_body().unwrap();
        assert!(html.contains(r#"<tr id="c1">"#));
        assert!(html.contains(r#"<span class="label label-success">green</span>"#));
        assert!(html.contains("<td>NTP</td>"));
        assert!(panel.alerts().is_empty());
    }
}
