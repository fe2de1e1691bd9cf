//! Derived series: speedup ratios and step differences computed from a timing series.

use crate::error::{ChartError, Result};
use crate::models::Series;
use serde::{Deserialize, Serialize};

/// Transform applied to a series' y values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeriveMode {
    /// `y[i] / y[i+1]`, one value shorter than the input.
    ConsecutiveRatio,
    /// `y[0] / y[i]`, same length as the input.
    #[default]
    BaselineRatio,
    /// `y[i+1] - y[i]`, one value shorter than the input.
    ConsecutiveDifference,
}

impl DeriveMode {
    /// Whether the output drops the last sample.
    pub fn shortens(self) -> bool {
        !matches!(self, DeriveMode::BaselineRatio)
    }
}

/// Apply `mode` to raw values.
pub fn derive_values(values: &[f64], mode: DeriveMode) -> Result<Vec<f64>> {
    let first = *values
        .first()
        .ok_or_else(|| ChartError::InvalidSeries("cannot derive from an empty series".into()))?;

    match mode {
        DeriveMode::ConsecutiveRatio => values
            .windows(2)
            .enumerate()
            .map(|(i, w)| ratio(w[0], w[1], i + 1))
            .collect(),
        DeriveMode::BaselineRatio => values
            .iter()
            .enumerate()
            .map(|(i, &v)| ratio(first, v, i))
            .collect(),
        DeriveMode::ConsecutiveDifference => Ok(values.windows(2).map(|w| w[1] - w[0]).collect()),
    }
}

fn ratio(num: f64, den: f64, index: usize) -> Result<f64> {
    if den == 0.0 {
        return Err(ChartError::DivisionByZero { index });
    }
    Ok(num / den)
}

/// Apply `mode` to a series, keeping the x positions the derived values line up with.
pub fn derive(series: &Series, mode: DeriveMode) -> Result<Series> {
    series.validate()?;
    let y = derive_values(&series.y, mode)?;
    let x = series.x[..y.len()].to_vec();
    Ok(Series::new(x, y))
}
