use boids_charts::ChartError;
use boids_charts::batch::{render_all, render_planned, split_planned};
use boids_charts::storage::Manifest;
use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;

#[test]
fn builtin_catalogue_renders_every_chart() {
    let dir = tempdir().unwrap();
    let (specs, failures) = split_planned(Manifest::builtin().into_specs());
    assert!(failures.is_empty(), "{failures:?}");
    let report = render_all(&specs, dir.path());
    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(report.written.len(), specs.len());

    // every chart lands on its own file
    let names: BTreeSet<String> = specs.iter().map(|s| s.file_name()).collect();
    assert_eq!(names.len(), specs.len());
    for path in &report.written {
        assert!(fs::metadata(path).unwrap().len() > 0);
    }
}

#[test]
fn zero_timing_fails_only_its_speedup() {
    let mut manifest = Manifest::builtin();
    manifest.benchmarks[0].times[3] = 0.0;

    let dir = tempdir().unwrap();
    let report = render_planned(manifest.into_specs(), dir.path());
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.file_name, "Speedup_20000ParallelBoids_Global.png");
    assert!(matches!(failure.error, ChartError::DivisionByZero { index: 3 }));

    assert_eq!(report.written.len(), 18);
    assert!(dir.path().join("Time_20000ParallelBoids_Global.png").exists());
    assert!(!dir.path().join("Speedup_20000ParallelBoids_Global.png").exists());
}
