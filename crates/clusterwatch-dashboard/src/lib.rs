//! clusterwatch-dashboard — server-rendered dashboard widgets.
//!
//! Two independent widgets, no shared state:
//!
//! | Widget | Owns | Driven by |
//! |---|---|---|
//! | [`HealthChecksPanel`] | health-check `<tbody>` + alerts | a [`HealthPoller`](clusterwatch_poller::HealthPoller) via [`PollView`](clusterwatch_poller::PollView) |
//! | [`WarningAdvisor`] | warning banners of a [`JobLaunchForm`] | the caller, on every cluster selection change |
//!
//! All markup goes through Askama templates, so every check field and
//! warning message is HTML-escaped.

pub mod advisor;
pub mod choices;
pub mod error;
pub mod partials;
pub mod table;
pub mod views;

pub use advisor::{BannerPolicy, ClusterSelect, JobLaunchForm, WarningAdvisor, WarningOutcome};
pub use choices::{ALLOWED_STATUSES, ClusterInfo, cluster_choices, default_status_messages, name_status_map};
pub use error::{ViewError, ViewResult};
pub use table::{Alert, AlertLevel, AlertLog, HealthChecksPanel};
pub use views::{CheckRow, WarningBanner};
