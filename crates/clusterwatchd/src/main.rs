//! clusterwatch — command line front end for the dashboard widgets.
//!
//! - `watch` polls a cluster's verification endpoint and prints the
//!   health-check table body after every redraw.
//! - `warn` previews the job launch warning for a cluster list and a
//!   selected cluster.
//!
//! # Usage
//!
//! ```text
//! clusterwatch watch --url http://dashboard.local/project/clusters/cluster/c1
//! clusterwatch warn --clusters '[{"name":"etl","status":"Error"}]' --selected 'etl (in error state)'
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use clusterwatch_dashboard::{
    BannerPolicy, ClusterInfo, ClusterSelect, HealthChecksPanel, JobLaunchForm, WarningAdvisor,
    WarningOutcome, cluster_choices, default_status_messages, name_status_map,
};
use clusterwatch_poller::{HealthPoller, PollPhase, PollView, PollerConfig, StopReason};
use clusterwatch_types::HealthCheck;

#[derive(Parser)]
#[command(name = "clusterwatch", about = "Cluster verification watcher")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Poll a cluster's health checks until verification finishes.
    Watch {
        /// Cluster data update URL; `/verifications` is appended.
        #[arg(long)]
        url: String,

        /// Fixed part of the re-poll delay, in milliseconds.
        #[arg(long, default_value = "2000")]
        base_delay_ms: u64,

        /// Upper bound of the random part of the delay, in milliseconds.
        #[arg(long, default_value = "1000")]
        max_jitter_ms: u64,

        /// Per-request timeout in milliseconds. Unlimited if omitted.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Show the launch form warning for the selected cluster.
    Warn {
        /// JSON list of `{"name": ..., "status": ...}` objects.
        #[arg(long)]
        clusters: String,

        /// Selector text of the chosen cluster. Defaults to the first choice.
        #[arg(long)]
        selected: Option<String>,

        /// Replace existing banners instead of stacking them.
        #[arg(long)]
        dedupe: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,clusterwatch=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Watch {
            url,
            base_delay_ms,
            max_jitter_ms,
            timeout_ms,
        } => {
            let config = PollerConfig {
                base_delay: Duration::from_millis(base_delay_ms),
                max_jitter_ms,
                request_timeout: timeout_ms.map(Duration::from_millis),
            };
            watch(url, config).await
        }
        Command::Warn {
            clusters,
            selected,
            dedupe,
        } => warn(&clusters, selected.as_deref(), dedupe),
    }
}

/// Prints the table body to stdout after every redraw.
struct ConsoleView {
    panel: HealthChecksPanel,
}

impl PollView for ConsoleView {
    fn update_health_checks_view(&self, checks: &[HealthCheck]) {
        self.panel.update_health_checks_view(checks);
        match self.panel.render_body() {
            Ok(html) => println!("{html}"),
            Err(e) => error!(error = %e, "failed to render health checks"),
        }
    }

    fn alert(&self, message: &str) {
        self.panel.alert(message);
    }
}

async fn watch(url: String, config: PollerConfig) -> anyhow::Result<()> {
    let view = Arc::new(ConsoleView {
        panel: HealthChecksPanel::new(),
    });
    let handle = HealthPoller::new(url, view.clone()).with_config(config).start();
    let mut phases = handle.subscribe();

    tokio::select! {
        _ = phases.wait_for(PollPhase::is_stopped) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
            handle.stop();
        }
    }

    match handle.wait().await {
        PollPhase::Stopped(StopReason::Failed) => {
            let message = view
                .panel
                .alerts()
                .alerts()
                .pop()
                .map(|a| a.message)
                .unwrap_or_default();
            bail!("polling stopped: {message}")
        }
        phase => {
            info!(?phase, "polling finished");
            Ok(())
        }
    }
}

fn warn(clusters: &str, selected: Option<&str>, dedupe: bool) -> anyhow::Result<()> {
    let clusters: Vec<ClusterInfo> =
        serde_json::from_str(clusters).context("failed to parse --clusters")?;

    let choices = cluster_choices(&clusters);
    let mut select = ClusterSelect::new(choices.iter().map(|(name, _)| name.clone()).collect());
    if let Some(name) = selected {
        if !select.select(name) {
            bail!("{name:?} is not a launchable cluster");
        }
    }

    let policy = if dedupe {
        BannerPolicy::Replace
    } else {
        BannerPolicy::Accumulate
    };
    let advisor = WarningAdvisor::new().with_policy(policy);
    let mut form = JobLaunchForm::new(select);

    match advisor.show_warning(&mut form, &name_status_map(&choices), &default_status_messages()) {
        WarningOutcome::Removed { .. } => info!(cluster = form.cluster_choice.selected_text(), "no warning"),
        WarningOutcome::Shown { .. } => println!("{}", form.render_banners()?),
    }
    Ok(())
}
