//! Cluster choices and status messages for the job launch form.

use serde::Deserialize;

use clusterwatch_types::{ClusterNameStatusMap, ClusterStatus, StatusMessageMap};

/// Statuses a job can be launched on, with the suffix appended to the
/// cluster name in the selector.
pub const ALLOWED_STATUSES: &[(&str, &str)] = &[("Active", ""), ("Error", "(in error state)")];

const ERROR_STATE_MESSAGE: &str = "You've chosen a cluster that is in 'Error' state. \
     Appropriate execution of the job can't be guaranteed.";

/// A cluster as listed by the data processing service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterInfo {
    pub name: String,
    pub status: ClusterStatus,
}

/// Selector entries `(display name, status)` for launchable clusters.
///
/// Clusters in other states are left out. Input order is kept.
pub fn cluster_choices(clusters: &[ClusterInfo]) -> Vec<(String, ClusterStatus)> {
    clusters
        .iter()
        .filter_map(|cluster| {
            ALLOWED_STATUSES
                .iter()
                .find(|(status, _)| *status == cluster.status.as_str())
                .map(|(_, suffix)| {
                    let display = format!("{} {}", cluster.name, suffix);
                    (display.trim_end().to_string(), cluster.status.clone())
                })
        })
        .collect()
}

/// The name → status map the warning advisor consumes.
pub fn name_status_map(choices: &[(String, ClusterStatus)]) -> ClusterNameStatusMap {
    choices.iter().cloned().collect()
}

/// Warning text per status shown in the launch form.
pub fn default_status_messages() -> StatusMessageMap {
    StatusMessageMap::from([(ClusterStatus::from("Error"), ERROR_STATE_MESSAGE.to_string())])
}
