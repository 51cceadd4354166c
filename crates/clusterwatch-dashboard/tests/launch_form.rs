//! Job launch form flow: cluster list → selector → warning banner.

use clusterwatch_dashboard::*;
use clusterwatch_types::ClusterStatus;

fn clusters() -> Vec<ClusterInfo> {
    vec![
        ClusterInfo { name: "analytics".to_string(), status: ClusterStatus::from("Active") },
        ClusterInfo { name: "etl".to_string(), status: ClusterStatus::from("Error") },
        ClusterInfo { name: "scratch".to_string(), status: ClusterStatus::from("Scaling") },
    ]
}

fn launch_form() -> (JobLaunchForm, clusterwatch_types::ClusterNameStatusMap) {
    let choices = cluster_choices(&clusters());
    let select = ClusterSelect::new(choices.iter().map(|(name, _)| name.clone()).collect());
    (JobLaunchForm::new(select), name_status_map(&choices))
}

#[test]
fn switching_between_clusters_toggles_the_banner() {
    let (mut form, map) = launch_form();
    let messages = default_status_messages();
    let advisor = WarningAdvisor::new();

    assert_eq!(form.cluster_choice.options(), ["analytics", "etl (in error state)"]);

    // First option is active: nothing shown.
    assert_eq!(
        advisor.show_warning(&mut form, &map, &messages),
        WarningOutcome::Removed { count: 0 }
    );

    assert!(form.cluster_choice.select("etl (in error state)"));
    let outcome = advisor.show_warning(&mut form, &map, &messages);
    assert!(matches!(outcome, WarningOutcome::Shown { ref message } if message.contains("'Error' state")));

    let html = form.render_banners().unwrap();
    assert!(html.contains("<h4>Warning!</h4>"));
    // The apostrophes in the message are escaped.
    assert!(!html.contains("You've"));

    assert!(form.cluster_choice.select("analytics"));
    advisor.show_warning(&mut form, &map, &messages);
    assert!(form.banners().is_empty());
}

#[test]
fn no_launchable_clusters_means_no_banner() {
    let mut form = JobLaunchForm::new(ClusterSelect::default());
    let map = name_status_map(&cluster_choices(&[]));

    let outcome = WarningAdvisor::new().show_warning(&mut form, &map, &default_status_messages());
    assert_eq!(outcome, WarningOutcome::Removed { count: 0 });
}
