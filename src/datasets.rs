//! Measured benchmark data and the chart layouts used to present it.
//!
//! A [`TimingBenchmark`] becomes a timing chart plus a speedup chart, an [`Overlay`]
//! becomes one multi-series chart, and a [`WriteupRun`] becomes a timing chart plus
//! its step-difference chart.

use crate::batch::{Failure, PlannedChart};
use crate::derive::{DeriveMode, derive};
use crate::error::Result;
use crate::models::{AnnotationFormat, ChartSpec, Series};
use serde::{Deserialize, Serialize};

/// Processor counts every parallel run was measured at.
pub const PROCS: [u32; 8] = [1, 2, 4, 8, 12, 16, 24, 32];

/// Sequential (no OpenMP) baseline for 20000 boids, in seconds.
pub const SEQ_20K: f64 = 59.15;

/// Wall-clock times of one simulation configuration across processor counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingBenchmark {
    pub title: String,
    /// Neighbourhood variant the run used, e.g. `Global` or `Local`.
    pub machine: String,
    pub procs: Vec<u32>,
    pub times: Vec<f64>,
    #[serde(default)]
    pub speedup: DeriveMode,
}

impl TimingBenchmark {
    pub fn new(title: &str, machine: &str, times: Vec<f64>) -> Self {
        Self {
            title: title.into(),
            machine: machine.into(),
            procs: PROCS.to_vec(),
            times,
            speedup: DeriveMode::BaselineRatio,
        }
    }

    pub fn series(&self) -> Series {
        Series::from_counts(&self.procs, self.times.clone())
    }

    /// `Time_` chart of the raw timings, annotated in seconds.
    pub fn timing_chart(&self) -> ChartSpec {
        ChartSpec::new(self.title.as_str())
            .caption(format!("Timing: {} on {}", self.title, self.machine))
            .axes("Number of Processors", "Time")
            .series(self.series())
            .annotate(AnnotationFormat::seconds())
            .force_ticks(true)
            .x_padding(5.0)
            .size(700, 600)
            .contrast_markers(true)
            .file_affixes("Time_", Some(self.machine.clone()))
    }

    /// `Speedup_` chart of the derived series, annotated as multipliers.
    pub fn speedup_chart(&self) -> Result<ChartSpec> {
        let derived = derive(&self.series(), self.speedup)?;
        Ok(self.speedup_layout().series(derived))
    }

    fn speedup_layout(&self) -> ChartSpec {
        ChartSpec::new(self.title.as_str())
            .caption(format!("Speedup: {} on {}", self.title, self.machine))
            .axes("Number of Processors", "Speedup")
            .annotate(AnnotationFormat::speedup())
            .force_ticks(true)
            .x_padding(0.5)
            .size(700, 600)
            .contrast_markers(true)
            .file_affixes("Speedup_", Some(self.machine.clone()))
    }

    /// Timing and speedup charts; a speedup that cannot be derived fails on its own.
    pub fn charts(&self) -> Vec<PlannedChart> {
        vec![
            Ok(self.timing_chart()),
            with_derived(self.speedup_layout(), derive(&self.series(), self.speedup)),
        ]
    }
}

fn with_derived(layout: ChartSpec, derived: Result<Series>) -> PlannedChart {
    match derived {
        Ok(series) => Ok(layout.series(series)),
        Err(error) => Err(Failure::new(&layout, error)),
    }
}

/// Several labeled series over shared x positions, drawn on one chart with a legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub series: Vec<(String, Vec<f64>)>,
}

impl Overlay {
    pub fn chart(&self) -> ChartSpec {
        self.series.iter().fold(
            ChartSpec::new(self.title.as_str()).axes(self.x_label.as_str(), self.y_label.as_str()),
            |spec, (label, y)| {
                spec.labeled_series(Series::new(self.x.clone(), y.clone()), label.as_str())
            },
        )
    }
}

/// A short single-machine run: timings plus how much each added processor changed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteupRun {
    pub title: String,
    pub procs: Vec<u32>,
    pub times: Vec<f64>,
}

impl WriteupRun {
    fn layout(&self, suffix: Option<String>) -> ChartSpec {
        ChartSpec::new(self.title.as_str())
            .caption(format!("Simulating {}", self.title))
            .axes("Number of Processors", "Time")
            .annotate(AnnotationFormat::seconds())
            .force_ticks(true)
            .x_padding(5.0)
            .contrast_markers(true)
            .file_affixes("boids_", suffix)
    }

    /// Timing chart plus the `_diff` chart of per-step changes.
    pub fn charts(&self) -> Vec<PlannedChart> {
        let series = Series::from_counts(&self.procs, self.times.clone());
        let diffs = derive(&series, DeriveMode::ConsecutiveDifference);
        vec![
            Ok(self.layout(None).series(series)),
            with_derived(self.layout(Some("diff".into())), diffs),
        ]
    }
}

/// Dynamic-schedule and static-schedule runs for 20000 boids.
pub fn timing_benchmarks() -> Vec<TimingBenchmark> {
    vec![
        TimingBenchmark::new(
            "20000 Parallel Boids",
            "Global",
            vec![SEQ_20K, 65.49, 38.71, 19.35, 14.47, 12.38, 12.93, 11.64],
        ),
        TimingBenchmark::new(
            "20000 Parallel Boids",
            "Local",
            vec![SEQ_20K, 32.16, 18.32, 9.88, 7.52, 6.32, 7.54, 7.13],
        ),
        TimingBenchmark::new(
            "20000 Parallel Flocks",
            "Global",
            vec![SEQ_20K, 54.46, 34.55, 17.37, 14.48, 11.88, 15.78, 11.74],
        ),
        TimingBenchmark::new(
            "20000 Parallel Flocks",
            "Local",
            vec![SEQ_20K, 30.86, 17.78, 9.546, 7.500, 5.83, 6.678, 5.47],
        ),
        TimingBenchmark::new(
            "20000 (static) Parallel Boids",
            "Global",
            vec![SEQ_20K, 70.270, 38.454, 21.613, 20.483, 16.857, 14.953, 13.911],
        ),
        TimingBenchmark::new(
            "20000 (static) Parallel Boids",
            "Local",
            vec![SEQ_20K, 34.220, 19.684, 12.232, 10.352, 8.7766, 9.965, 9.139],
        ),
        TimingBenchmark::new(
            "20000 (static) Parallel Flocks",
            "Global",
            vec![SEQ_20K, 55.312, 36.703, 20.03, 22.773, 17.015, 14.585, 15.745],
        ),
        TimingBenchmark::new(
            "20000 (static) Parallel Flocks",
            "Local",
            vec![SEQ_20K, 34.944, 20.067, 12.721, 10.627, 8.70, 8.856, 8.144],
        ),
    ]
}

/// 10000 boids with the maximum flock size swept, one line per thread count.
pub fn granular_flocks_overlay() -> Overlay {
    Overlay {
        title: "10000 Boids Granular Flock Sizes".into(),
        x_label: "Maximum Flock Size".into(),
        y_label: "Time (s)".into(),
        x: (1..=10).map(|i| (i * 10) as f64).collect(),
        series: vec![
            (
                "4 Threads".into(),
                vec![7.67, 6.23, 5.75, 5.74, 5.57, 5.48, 5.54, 5.56, 5.81, 6.00],
            ),
            (
                "8 Threads".into(),
                vec![4.13, 3.51, 3.20, 3.13, 3.07, 3.02, 3.04, 3.099, 3.14, 3.31],
            ),
            (
                "16 Threads".into(),
                vec![2.59, 2.24, 2.07, 2.03, 1.95, 1.96, 1.949, 2.05, 2.08, 2.15],
            ),
        ],
    }
}

/// The laptop run reported in the writeup.
pub fn writeup_run() -> WriteupRun {
    WriteupRun {
        title: "Parallel Boids".into(),
        procs: vec![1, 2, 4, 8, 12],
        times: vec![9.14, 5.51, 3.441, 4.517, 6.76],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;

    #[test]
    fn timing_benchmark_yields_time_and_speedup() {
        let bench = &timing_benchmarks()[0];
        let charts: Vec<ChartSpec> = bench.charts().into_iter().map(|c| c.unwrap()).collect();
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].file_name(), "Time_20000ParallelBoids_Global.png");
        assert_eq!(charts[1].file_name(), "Speedup_20000ParallelBoids_Global.png");
        assert_eq!(charts[1].display_caption(), "Speedup: 20000 Parallel Boids on Global");

        let speedup = &charts[1].series[0].series;
        assert_eq!(speedup.y[0], 1.0);
        assert_eq!(speedup.len(), PROCS.len());
    }

    #[test]
    fn consecutive_speedup_drops_last_proc() {
        let mut bench = timing_benchmarks()[1].clone();
        bench.speedup = DeriveMode::ConsecutiveRatio;
        let chart = bench.speedup_chart().unwrap();
        let s = &chart.series[0].series;
        assert_eq!(s.len(), PROCS.len() - 1);
        assert_eq!(s.x.last().copied(), Some(24.0));
    }

    #[test]
    fn zero_time_fails_speedup_but_keeps_timing() {
        let mut bench = timing_benchmarks()[0].clone();
        bench.times[3] = 0.0;
        let charts = bench.charts();
        assert!(charts[0].is_ok());
        let failure = charts[1].as_ref().unwrap_err();
        assert_eq!(failure.file_name, "Speedup_20000ParallelBoids_Global.png");
        assert!(matches!(failure.error, ChartError::DivisionByZero { index: 3 }));
    }

    #[test]
    fn overlay_has_labeled_series() {
        let chart = granular_flocks_overlay().chart();
        assert_eq!(chart.series.len(), 3);
        assert!(chart.series.iter().all(|s| s.label.is_some()));
        assert!(!chart.annotations);
        assert!(chart.validate().is_ok());
    }

    #[test]
    fn writeup_diff_chart_is_shorter() {
        let charts: Vec<ChartSpec> = writeup_run()
            .charts()
            .into_iter()
            .map(|c| c.unwrap())
            .collect();
        assert_eq!(charts[0].file_name(), "boids_ParallelBoids.png");
        assert_eq!(charts[1].file_name(), "boids_ParallelBoids_diff.png");
        assert_eq!(charts[1].series[0].series.len(), 4);
    }
}
