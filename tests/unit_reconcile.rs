// tests/unit_reconcile.rs
use covtable_core::config::ReportConfig;
use covtable_core::error::CoverageError;
use covtable_core::profile::parse_profiles;
use covtable_core::reconcile::reconcile;
use covtable_core::types::FileUniverse;

const MODULE: &str = "example.com/m";

fn universe(paths: &[&str]) -> FileUniverse {
    paths.iter().copied().collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_scenario_excludes_mocks_and_averages() {
    // a.go: 4 of 5 statements executed; b.go: 2 of 5.
    let profile = "mode: set
example.com/m/a.go:1.1,2.1 4 1
example.com/m/a.go:3.1,4.1 1 0
example.com/m/b.go:1.1,2.1 2 3
example.com/m/b.go:3.1,4.1 3 0
example.com/m/mocks/c.go:1.1,2.1 5 1
";
    let profiles = parse_profiles(profile).unwrap();
    let report = reconcile(
        universe(&["a.go", "b.go", "mocks/c.go"]),
        MODULE,
        &profiles,
        &ReportConfig::default(),
    )
    .unwrap();

    let rows: Vec<(&str, f64)> = report
        .rows
        .iter()
        .map(|r| (r.path.as_str(), r.percentage))
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, "a.go");
    assert!(close(rows[0].1, 80.0));
    assert_eq!(rows[1].0, "b.go");
    assert!(close(rows[1].1, 40.0));
    assert!(close(report.total, 60.0));
    assert_eq!(report.excluded, vec!["mocks/c.go".to_string()]);
}

#[test]
fn test_aggregate_is_unweighted_mean() {
    // Very different statement counts; the mean must ignore them.
    let profile = "mode: count
example.com/m/full.go:1.1,2.1 1 1
example.com/m/half.go:1.1,2.1 50 7
example.com/m/half.go:3.1,4.1 50 0
example.com/m/none.go:1.1,2.1 1000 0
";
    let profiles = parse_profiles(profile).unwrap();
    let report = reconcile(
        universe(&["full.go", "half.go", "none.go"]),
        MODULE,
        &profiles,
        &ReportConfig::default(),
    )
    .unwrap();
    let pcts: Vec<f64> = report.rows.iter().map(|r| r.percentage).collect();
    assert!(close(pcts[0], 100.0) && close(pcts[1], 50.0) && close(pcts[2], 0.0));
    assert!(close(report.total, 50.0));
}

#[test]
fn test_untouched_files_report_zero() {
    let profile = "mode: set\nexample.com/m/pkg/a.go:1.1,2.1 2 1\n";
    let profiles = parse_profiles(profile).unwrap();
    let report = reconcile(
        universe(&["pkg/a.go", "pkg/b.go", "z.go"]),
        MODULE,
        &profiles,
        &ReportConfig::default(),
    )
    .unwrap();
    let paths: Vec<&str> = report.rows.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["pkg/a.go", "pkg/b.go", "z.go"]);
    assert_eq!(report.rows[1].percentage, 0.0);
    assert_eq!(report.rows[2].percentage, 0.0);
    assert_eq!(report.uncovered_count(), 2);
}

#[test]
fn test_zero_statement_entry_is_zero_not_nan() {
    let profile = "mode: set\nexample.com/m/a.go:1.1,1.2 0 1\n";
    let profiles = parse_profiles(profile).unwrap();
    let report = reconcile(universe(&["a.go"]), MODULE, &profiles, &ReportConfig::default())
        .unwrap();
    assert_eq!(report.rows[0].percentage, 0.0);
    assert!(!report.total.is_nan());
}

#[test]
fn test_every_path_appears_once_in_order() {
    let files = ["c/z.go", "a.go", "c/a.go", "b_util.go", "B.go"];
    let profile = "mode: set
example.com/m/c/a.go:1.1,2.1 1 1
example.com/m/B.go:1.1,2.1 1 1
";
    let profiles = parse_profiles(profile).unwrap();
    let report = reconcile(universe(&files), MODULE, &profiles, &ReportConfig::default())
        .unwrap();
    let paths: Vec<&str> = report.rows.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["B.go", "a.go", "b_util.go", "c/a.go", "c/z.go"]);
}

#[test]
fn test_mocks_never_affect_total_even_when_covered() {
    let profile = "mode: set
example.com/m/a.go:1.1,2.1 1 0
example.com/m/internal/mocks/fake.go:1.1,2.1 9 1
";
    let profiles = parse_profiles(profile).unwrap();
    let report = reconcile(
        universe(&["a.go", "internal/mocks/fake.go"]),
        MODULE,
        &profiles,
        &ReportConfig::default(),
    )
    .unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.total, 0.0);
}

#[test]
fn test_unknown_profile_path_is_mismatch() {
    let profile = "mode: set\nexample.com/m/gen/stale.go:1.1,2.1 1 1\n";
    let profiles = parse_profiles(profile).unwrap();
    let err = reconcile(universe(&["a.go"]), MODULE, &profiles, &ReportConfig::default())
        .unwrap_err();
    match err {
        CoverageError::Mismatch { file_name, path, .. } => {
            assert_eq!(file_name, "example.com/m/gen/stale.go");
            assert_eq!(path, "gen/stale.go");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_foreign_module_profile_is_mismatch() {
    let profile = "mode: set\nother.org/x/a.go:1.1,2.1 1 1\n";
    let profiles = parse_profiles(profile).unwrap();
    let err = reconcile(universe(&["a.go"]), MODULE, &profiles, &ReportConfig::default())
        .unwrap_err();
    assert!(matches!(err, CoverageError::Mismatch { .. }));
}

#[test]
fn test_custom_non_counting_segments() {
    let report_config = ReportConfig {
        non_counting: vec!["fakes".into(), "mocks/".into()],
    };
    let report = reconcile(
        universe(&["a.go", "fakes/f.go", "mocks/m.go"]),
        MODULE,
        &[],
        &report_config,
    )
    .unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.excluded, vec!["fakes/f.go".to_string(), "mocks/m.go".to_string()]);
}
