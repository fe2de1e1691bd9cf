//! Chart manifests (JSON) and per-chart data tables (CSV).

use crate::batch::PlannedChart;
use crate::datasets::{self, Overlay, TimingBenchmark, WriteupRun};
use crate::error::{ChartError, Result};
use crate::models::ChartSpec;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// A batch of charts described as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<ChartSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benchmarks: Vec<TimingBenchmark>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlays: Vec<Overlay>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub writeups: Vec<WriteupRun>,
}

impl Manifest {
    /// The measured data shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            charts: Vec::new(),
            benchmarks: datasets::timing_benchmarks(),
            overlays: vec![datasets::granular_flocks_overlay()],
            writeups: vec![datasets::writeup_run()],
        }
    }

    /// Expand into charts: raw charts, then benchmarks, overlays, writeups.
    ///
    /// Each chart is built on its own, so a series that cannot be derived only
    /// fails the chart that needs it.
    pub fn into_specs(self) -> Vec<PlannedChart> {
        let mut planned: Vec<PlannedChart> = self.charts.into_iter().map(Ok).collect();
        for bench in &self.benchmarks {
            planned.extend(bench.charts());
        }
        planned.extend(self.overlays.iter().map(|o| Ok(o.chart())));
        for run in &self.writeups {
            planned.extend(run.charts());
        }
        planned
    }
}

/// Read a JSON manifest.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ChartError::io(path, e))?;
    serde_json::from_str(&text)
        .map_err(|e| ChartError::Manifest(format!("{}: {}", path.display(), e)))
}

/// Save a manifest as pretty JSON.
pub fn save_manifest_json<P: AsRef<Path>>(manifest: &Manifest, path: P) -> Result<()> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(manifest)
        .map_err(|e| ChartError::Manifest(e.to_string()))?;
    let mut f = File::create(path).map_err(|e| ChartError::io(path, e))?;
    f.write_all(s.as_bytes()).map_err(|e| ChartError::io(path, e))?;
    Ok(())
}

/// Save a chart's data as a long-format CSV table (`series,x,y`) with header.
///
/// Unlabeled series are named by their position (`series0`, `series1`, ...).
pub fn save_table_csv<P: AsRef<Path>>(spec: &ChartSpec, path: P) -> Result<()> {
    let path = path.as_ref();
    let csv_err = |e: csv::Error| ChartError::Manifest(format!("{}: {}", path.display(), e));
    let mut wtr = WriterBuilder::new().from_path(path).map_err(csv_err)?;
    wtr.serialize(("series", "x", "y")).map_err(csv_err)?;
    for (idx, entry) in spec.series.iter().enumerate() {
        let name = entry
            .label
            .clone()
            .unwrap_or_else(|| format!("series{idx}"));
        for (x, y) in entry.series.points() {
            wtr.serialize((&name, x, y)).map_err(csv_err)?;
        }
    }
    wtr.flush().map_err(|e| ChartError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Series;
    use tempfile::tempdir;

    #[test]
    fn write_table_and_manifest() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("t.csv");
        let jsonp = dir.path().join("m.json");
        let spec = ChartSpec::new("T")
            .labeled_series(Series::indexed(vec![1.0, 2.0]), "a")
            .series(Series::indexed(vec![3.0]));
        save_table_csv(&spec, &csvp).unwrap();
        let txt = fs::read_to_string(&csvp).unwrap();
        assert_eq!(txt.lines().next(), Some("series,x,y"));
        assert_eq!(txt.lines().count(), 4);
        assert!(txt.contains("series1,0.0,3.0"));

        save_manifest_json(&Manifest::builtin(), &jsonp).unwrap();
        let back = load_manifest(&jsonp).unwrap();
        assert_eq!(back, Manifest::builtin());
    }

    #[test]
    fn builtin_expands_every_chart() {
        let planned = Manifest::builtin().into_specs();
        // 8 benchmarks x 2, one overlay, one writeup x 2
        assert_eq!(planned.len(), 19);
        assert!(planned.iter().all(|c| c.is_ok()));
    }

    #[test]
    fn malformed_manifest_is_reported() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("bad.json");
        fs::write(&p, "{ not json").unwrap();
        assert!(matches!(load_manifest(&p), Err(ChartError::Manifest(_))));
    }
}
