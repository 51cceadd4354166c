//! Cluster state warning for the job launch form.
//!
//! When the cluster picked in the launch form is not `Active`, a warning
//! banner goes under the selector. The advisor is synchronous and keeps
//! no state between calls; the caller re-runs it on every selection
//! change with fresh maps.

use tracing::debug;

use clusterwatch_types::{ClusterNameStatusMap, ClusterStatus, StatusMessageMap};

use crate::error::ViewResult;
use crate::partials::{BannersPartial, WARNING_CLASS, render};
use crate::views::WarningBanner;

// ── Form model ──────────────────────────────────────────────────

/// The cluster `<select>` of the launch form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterSelect {
    options: Vec<String>,
    selected: Option<usize>,
}

impl ClusterSelect {
    /// A select with `options`; the first one starts selected.
    pub fn new(options: Vec<String>) -> Self {
        let selected = if options.is_empty() { None } else { Some(0) };
        Self { options, selected }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Select the option whose text is `text`. Returns false if absent.
    pub fn select(&mut self, text: &str) -> bool {
        match self.options.iter().position(|o| o == text) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    /// Visible text of the selected option, empty when nothing is selected.
    pub fn selected_text(&self) -> &str {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// The parts of the job launch form the advisor touches.
#[derive(Debug, Clone, Default)]
pub struct JobLaunchForm {
    pub cluster_choice: ClusterSelect,
    banners: Vec<WarningBanner>,
}

impl JobLaunchForm {
    pub fn new(cluster_choice: ClusterSelect) -> Self {
        Self {
            cluster_choice,
            banners: Vec::new(),
        }
    }

    /// Banners currently shown after the selector, oldest first.
    pub fn banners(&self) -> &[WarningBanner] {
        &self.banners
    }

    /// Render the banner slot.
    pub fn render_banners(&self) -> ViewResult<String> {
        render(&BannersPartial {
            class: WARNING_CLASS,
            banners: &self.banners,
        })
    }

    fn remove_banners(&mut self) -> usize {
        let count = self.banners.len();
        self.banners.clear();
        count
    }
}

// ── Advisor ─────────────────────────────────────────────────────

/// What to do with existing banners when a new one is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BannerPolicy {
    /// Append without touching existing banners. Repeated calls for an
    /// inactive cluster stack up duplicates.
    #[default]
    Accumulate,
    /// Remove existing banners first, so at most one is ever shown.
    Replace,
}

/// Result of one [`WarningAdvisor::show_warning`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningOutcome {
    /// Nothing to warn about; `count` banners were taken down.
    Removed { count: usize },
    /// A banner with `message` was appended.
    Shown { message: String },
}

/// Decides whether the launch form shows a "cluster not active" warning.
#[derive(Debug, Clone, Default)]
pub struct WarningAdvisor {
    policy: BannerPolicy,
    fallback_message: String,
}

impl WarningAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: BannerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Message used when the selected cluster or its status has no entry.
    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn policy(&self) -> BannerPolicy {
        self.policy
    }

    /// Show or remove the warning for the currently selected cluster.
    ///
    /// An empty `cluster_name_status_map`, or a selected cluster whose
    /// status is exactly `Active`, removes every banner. Anything else,
    /// including a selection missing from the map, shows one.
    pub fn show_warning(
        &self,
        form: &mut JobLaunchForm,
        cluster_name_status_map: &ClusterNameStatusMap,
        status_message_map: &StatusMessageMap,
    ) -> WarningOutcome {
        let current_cluster_name = form.cluster_choice.selected_text().to_string();
        let current_cluster_status = cluster_name_status_map.get(current_cluster_name.as_str());

        if cluster_name_status_map.is_empty()
            || current_cluster_status.is_some_and(ClusterStatus::is_active)
        {
            let count = form.remove_banners();
            debug!(cluster = %current_cluster_name, removed = count, "cluster warning cleared");
            return WarningOutcome::Removed { count };
        }

        let message = current_cluster_status
            .and_then(|status| status_message_map.get(status))
            .cloned()
            .unwrap_or_else(|| self.fallback_message.clone());

        debug!(
            cluster = %current_cluster_name,
            status = ?current_cluster_status.map(ClusterStatus::as_str),
            "cluster warning shown"
        );

        if self.policy == BannerPolicy::Replace {
            form.remove_banners();
        }
        form.banners.push(WarningBanner::new(message.clone()));

        WarningOutcome::Shown { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERROR_MSG: &str = "cluster is in error";

    fn maps() -> (ClusterNameStatusMap, StatusMessageMap) {
        let clusters = ClusterNameStatusMap::from([
            ("alpha".to_string(), ClusterStatus::from("Active")),
            ("beta (in error state)".to_string(), ClusterStatus::from("Error")),
            ("gamma".to_string(), ClusterStatus::from("Starting")),
        ]);
        let messages = StatusMessageMap::from([(ClusterStatus::from("Error"), ERROR_MSG.to_string())]);
        (clusters, messages)
    }

    fn form(selected: &str) -> JobLaunchForm {
        let mut select = ClusterSelect::new(vec![
            "alpha".to_string(),
            "beta (in error state)".to_string(),
            "gamma".to_string(),
            "delta".to_string(),
        ]);
        assert!(select.select(selected));
        JobLaunchForm::new(select)
    }

    #[test]
    fn select_defaults_to_first_option() {
        let select = ClusterSelect::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(select.selected_text(), "a");
        assert_eq!(ClusterSelect::default().selected_text(), "");
    }

    #[test]
    fn select_unknown_option_keeps_selection() {
        let mut select = ClusterSelect::new(vec!["a".to_string()]);
        assert!(!select.select("zzz"));
        assert_eq!(select.selected_text(), "a");
    }

    #[test]
    fn inactive_cluster_shows_one_banner_with_message() {
        let (clusters, messages) = maps();
        let mut form = form("beta (in error state)");

        let outcome = WarningAdvisor::new().show_warning(&mut form, &clusters, &messages);

        assert_eq!(outcome, WarningOutcome::Shown { message: ERROR_MSG.to_string() });
        assert_eq!(form.banners().len(), 1);
        assert_eq!(form.banners()[0].message, ERROR_MSG);
        assert!(form.render_banners().unwrap().contains(ERROR_MSG));
    }

    #[test]
    fn active_cluster_removes_existing_banner() {
        let (clusters, messages) = maps();
        let advisor = WarningAdvisor::new();
        let mut form = form("beta (in error state)");
        advisor.show_warning(&mut form, &clusters, &messages);

        form.cluster_choice.select("alpha");
        let outcome = advisor.show_warning(&mut form, &clusters, &messages);

        assert_eq!(outcome, WarningOutcome::Removed { count: 1 });
        assert!(form.banners().is_empty());
        assert!(!form.render_banners().unwrap().contains(WARNING_CLASS));
    }

    #[test]
    fn empty_map_removes_banners() {
        let (clusters, messages) = maps();
        let advisor = WarningAdvisor::new();
        let mut form = form("gamma");
        advisor.show_warning(&mut form, &clusters, &messages);
        assert_eq!(form.banners().len(), 1);

        let outcome = advisor.show_warning(&mut form, &ClusterNameStatusMap::new(), &messages);
        assert_eq!(outcome, WarningOutcome::Removed { count: 1 });
        assert!(form.banners().is_empty());
    }

    #[test]
    fn repeated_calls_accumulate_by_default() {
        let (clusters, messages) = maps();
        let advisor = WarningAdvisor::new();
        let mut form = form("beta (in error state)");

        advisor.show_warning(&mut form, &clusters, &messages);
        advisor.show_warning(&mut form, &clusters, &messages);

        assert_eq!(form.banners().len(), 2);
    }

    #[test]
    fn replace_policy_keeps_a_single_banner() {
        let (clusters, messages) = maps();
        let advisor = WarningAdvisor::new().with_policy(BannerPolicy::Replace);
        let mut form = form("beta (in error state)");

        advisor.show_warning(&mut form, &clusters, &messages);
        form.cluster_choice.select("gamma");
        advisor.show_warning(&mut form, &clusters, &messages);

        assert_eq!(form.banners().len(), 1);
        assert_eq!(form.banners()[0].message, "");
    }

    #[test]
    fn status_without_message_uses_fallback() {
        let (clusters, messages) = maps();
        let mut form = form("gamma");

        let outcome = WarningAdvisor::new().show_warning(&mut form, &clusters, &messages);
        assert_eq!(outcome, WarningOutcome::Shown { message: String::new() });

        let advisor = WarningAdvisor::new().with_fallback_message("Cluster is not active.");
        let outcome = advisor.show_warning(&mut form, &clusters, &messages);
        assert_eq!(outcome, WarningOutcome::Shown { message: "Cluster is not active.".to_string() });
    }

    #[test]
    fn selection_missing_from_map_still_warns() {
        let (clusters, messages) = maps();
        let mut form = form("delta");

        let outcome = WarningAdvisor::new().show_warning(&mut form, &clusters, &messages);

        assert!(matches!(outcome, WarningOutcome::Shown { .. }));
        assert_eq!(form.banners().len(), 1);
    }

    #[test]
    fn active_match_is_exact() {
        let clusters = ClusterNameStatusMap::from([("alpha".to_string(), ClusterStatus::from("ACTIVE"))]);
        let mut form = JobLaunchForm::new(ClusterSelect::new(vec!["alpha".to_string()]));

        let outcome = WarningAdvisor::new().show_warning(&mut form, &clusters, &StatusMessageMap::new());
        assert!(matches!(outcome, WarningOutcome::Shown { .. }));
    }
}
