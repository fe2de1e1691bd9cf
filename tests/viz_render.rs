use boids_charts::viz;
use boids_charts::{AnnotationFormat, ChartError, ChartSpec, ImageFormat, Series};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn procs_series(times: Vec<f64>) -> Series {
    Series::from_counts(&[1, 2, 4, 8, 12, 16, 24, 32], times)
}

fn check_file(path: &Path) {
    let meta = fs::metadata(path).expect("file created");
    assert!(meta.len() > 0, "image has content");
}

#[test]
fn annotated_timing_chart() {
    let dir = tempdir().unwrap();
    let spec = ChartSpec::new("20000 Parallel Boids")
        .caption("Timing: 20000 Parallel Boids on Global")
        .axes("Number of Processors", "Time")
        .series(procs_series(vec![59.15, 65.49, 38.71, 19.35, 14.47, 12.38, 12.93, 11.64]))
        .annotate(AnnotationFormat::seconds())
        .force_ticks(true)
        .x_padding(5.0)
        .size(700, 600)
        .contrast_markers(true)
        .file_affixes("Time_", Some("Global".into()));
    let path = viz::render(&spec, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "Time_20000ParallelBoids_Global.png");
    check_file(&path);
}

#[test]
fn overlay_with_legend_and_more_series_than_colors() {
    let dir = tempdir().unwrap();
    let x: Vec<f64> = (1..=10).map(|i| (i * 10) as f64).collect();
    let mut spec = ChartSpec::new("10000 Boids Granular Flock Sizes")
        .axes("Maximum Flock Size", "Time (s)");
    for (i, label) in ["1 Thread", "2 Threads", "4 Threads", "8 Threads", "16 Threads"]
        .iter()
        .enumerate()
    {
        let y = x.iter().map(|v| 10.0 / (i as f64 + 1.0) + v / 100.0).collect();
        spec = spec.labeled_series(Series::new(x.clone(), y), *label);
    }
    let path = viz::render(&spec, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "10000BoidsGranularFlockSizes.png");
    check_file(&path);
}

#[test]
fn svg_output_uses_svg_extension() {
    let dir = tempdir().unwrap();
    let spec = ChartSpec::new("Tick Timings")
        .axes("Tick Index", "Time (s)")
        .series(Series::indexed((0..100).map(|i| 0.01 + (i % 7) as f64 * 0.001).collect()))
        .format(ImageFormat::Svg);
    let path = viz::render(&spec, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "TickTimings.svg");
    let txt = fs::read_to_string(&path).unwrap();
    assert!(txt.contains("<svg"));
}

#[test]
fn single_point_series_renders() {
    let dir = tempdir().unwrap();
    let spec = ChartSpec::new("One")
        .series(Series::new(vec![0.0], vec![4.2]))
        .annotate(AnnotationFormat::speedup())
        .force_ticks(true);
    let path = viz::render(&spec, dir.path()).unwrap();
    check_file(&path);
}

#[test]
fn rendering_twice_overwrites_same_path() {
    let dir = tempdir().unwrap();
    let spec = ChartSpec::new("Speedup Parallel Boids on Global")
        .series(procs_series(vec![1.0, 0.9, 1.5, 3.1, 4.1, 4.8, 4.6, 5.1]))
        .annotate(AnnotationFormat::speedup());
    let first = viz::render(&spec, dir.path()).unwrap();
    let second = viz::render(&spec, dir.path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn creates_nested_output_dir() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("py_out").join("nested");
    let spec = ChartSpec::new("Nested").series(Series::indexed(vec![1.0, 2.0, 3.0]));
    let path = viz::render(&spec, &out).unwrap();
    assert!(path.starts_with(&out));
    check_file(&path);
}

#[test]
fn invalid_series_writes_nothing() {
    let dir = tempdir().unwrap();
    let cases = [
        ChartSpec::new("Mismatch").series(Series::new(vec![1.0, 2.0], vec![1.0, 2.0, 3.0])),
        ChartSpec::new("Empty").series(Series::new(vec![], vec![])),
        ChartSpec::new("Unordered").series(Series::new(vec![2.0, 1.0], vec![1.0, 2.0])),
        ChartSpec::new("NoSeries"),
    ];
    for spec in &cases {
        let err = viz::render(spec, dir.path()).unwrap_err();
        assert!(matches!(err, ChartError::InvalidSeries(_)), "{err}");
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unwritable_output_dir_is_io_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, b"x").unwrap();
    let spec = ChartSpec::new("Blocked").series(Series::indexed(vec![1.0, 2.0]));
    let err = viz::render(&spec, &blocker.join("out")).unwrap_err();
    assert!(matches!(err, ChartError::Io { .. }));
}

#[test]
fn existing_directory_at_image_path_is_io_error() {
    let dir = tempdir().unwrap();
    for format in [ImageFormat::Png, ImageFormat::Svg] {
        let spec = ChartSpec::new("X")
            .series(Series::indexed(vec![1.0, 2.0]))
            .format(format);
        let taken = dir.path().join(spec.file_name());
        fs::create_dir(&taken).unwrap();

        let err = viz::render(&spec, dir.path()).unwrap_err();
        assert!(matches!(err, ChartError::Io { .. }), "{err}");
        assert!(taken.is_dir());
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn values_too_far_apart_are_rejected_before_drawing() {
    let dir = tempdir().unwrap();
    let spec = ChartSpec::new("Extreme").series(Series::new(vec![1.0, 2.0], vec![-1e308, 1e308]));
    let err = viz::render(&spec, dir.path()).unwrap_err();
    assert!(matches!(err, ChartError::InvalidSeries(_)), "{err}");
    assert!(!dir.path().join("Extreme.png").exists());
}

#[test]
fn title_cannot_leave_output_dir() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let spec = ChartSpec::new("../escaped").series(Series::indexed(vec![1.0, 2.0]));
    let err = viz::render(&spec, &out).unwrap_err();
    assert!(matches!(err, ChartError::InvalidSeries(_)), "{err}");
    assert!(!dir.path().join("escaped.png").exists());
    assert!(!out.exists());
}
