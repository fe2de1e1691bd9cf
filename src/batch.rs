//! Sequential batch rendering that keeps going past failing charts.

use crate::error::ChartError;
use crate::models::ChartSpec;
use crate::viz;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// A chart that could not be rendered.
#[derive(Debug)]
pub struct Failure {
    pub title: String,
    pub file_name: String,
    pub error: ChartError,
}

impl Failure {
    pub fn new(spec: &ChartSpec, error: ChartError) -> Self {
        Self {
            title: spec.title.clone(),
            file_name: spec.file_name(),
            error,
        }
    }
}

/// A chart ready to render, or the reason it could not be built.
pub type PlannedChart = Result<ChartSpec, Failure>;

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render every spec into `output_dir`, one after another.
pub fn render_all(specs: &[ChartSpec], output_dir: &Path) -> BatchReport {
    let mut report = BatchReport::default();
    for spec in specs {
        match viz::render(spec, output_dir) {
            Ok(path) => {
                info!("wrote {}", path.display());
                report.written.push(path);
            }
            Err(error) => {
                warn!("failed to render '{}': {}", spec.title, error);
                report.failures.push(Failure::new(spec, error));
            }
        }
    }
    report
}

/// Render the charts that were built and report the rest as failures next to render errors.
pub fn render_planned(planned: Vec<PlannedChart>, output_dir: &Path) -> BatchReport {
    let (specs, unbuilt) = split_planned(planned);
    let mut report = render_all(&specs, output_dir);
    report.failures.extend(unbuilt);
    report
}

/// Separate buildable charts from those that failed to build, logging each failure.
pub fn split_planned(planned: Vec<PlannedChart>) -> (Vec<ChartSpec>, Vec<Failure>) {
    let mut specs = Vec::with_capacity(planned.len());
    let mut failures = Vec::new();
    for chart in planned {
        match chart {
            Ok(spec) => specs.push(spec),
            Err(failure) => {
                warn!("cannot build '{}': {}", failure.title, failure.error);
                failures.push(failure);
            }
        }
    }
    (specs, failures)
}
