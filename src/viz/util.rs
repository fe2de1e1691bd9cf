//! Utility functions for visualization: colors, axis ranges, tick placement and labels.

use crate::error::{ChartError, Result};
use crate::models::ChartSpec;
use num_format::{Locale, ToFormattedString};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::ops::Range;

use super::text::estimate_text_width_px;

/// Series palette: red, blue, green, yellow (matplotlib's `r`, `b`, `g`, `y`).
const PALETTE: [RGBColor; 4] = [
    RGBColor(255, 0, 0),
    RGBColor(0, 0, 255),
    RGBColor(0, 128, 0),
    RGBColor(191, 191, 0),
];

/// Color for the series at `idx`, cycling through the palette.
#[inline]
pub fn series_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// X axis runs from 0 (or the smallest x, if negative) to the largest x plus padding.
pub fn x_range(spec: &ChartSpec) -> (f64, f64) {
    let xs = spec.series.iter().flat_map(|s| s.series.x.iter().copied());
    let (min_x, max_x) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });
    let lo = min_x.min(0.0);
    let mut hi = max_x + spec.x_padding.max(0.0);
    if hi - lo < f64::EPSILON {
        hi = lo + lo.abs().max(1.0);
    }
    (lo, hi)
}

/// Y axis covers every value (and annotation anchor) with a 5% margin on both ends.
pub fn y_range(spec: &ChartSpec) -> (f64, f64) {
    let dy = if spec.annotations {
        spec.annotation_format.offset.1
    } else {
        0.0
    };
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for (_, y) in spec.series.iter().flat_map(|s| s.series.points()) {
        lo = lo.min(y).min(y + dy);
        hi = hi.max(y).max(y + dy);
    }
    if (hi - lo).abs() < f64::EPSILON {
        let bump = (lo.abs() * 0.05).max(1.0);
        lo -= bump;
        hi += bump;
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Both axis ranges, rejected when either span is not a finite positive number.
pub fn plot_ranges(spec: &ChartSpec) -> Result<((f64, f64), (f64, f64))> {
    let x = x_range(spec);
    let y = y_range(spec);
    for (axis, (lo, hi)) in [("x", x), ("y", y)] {
        let span = hi - lo;
        if !span.is_finite() || span <= 0.0 {
            return Err(ChartError::InvalidSeries(format!(
                "{axis} values span too wide a range to plot ({lo:e} to {hi:e})"
            )));
        }
    }
    Ok((x, y))
}

/// "Nice" evenly spaced ticks (steps of 1, 2 or 5 times a power of ten) inside `lo..=hi`.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let span = hi - lo;
    if span.is_nan() || span <= 0.0 || target == 0 {
        return vec![lo];
    }
    let raw = span / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * mag);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Tick positions for the x axis: every data x when forced, nice ticks otherwise.
pub fn x_key_points(spec: &ChartSpec, lo: f64, hi: f64) -> Vec<f64> {
    if spec.force_ticks {
        let mut ticks: Vec<f64> = spec
            .series
            .first()
            .map(|s| s.series.x.clone())
            .unwrap_or_default();
        ticks.retain(|x| *x >= lo && *x <= hi);
        ticks
    } else {
        nice_ticks(lo, hi, 8)
    }
}

/// Linear f64 axis whose bold key points are a fixed list of positions.
///
/// `WithKeyPoints` opts out of default label formatting, which the mesh needs.
pub struct TickedAxis {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickedAxis {
    pub fn new(lo: f64, hi: f64, ticks: Vec<f64>) -> Self {
        Self {
            inner: (lo..hi).into(),
            ticks,
        }
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

/// Integral ticks get thousands separators (`1,000`), others up to two decimals.
pub fn format_x_tick(v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() < 1e-9 && rounded.abs() < 1e15 {
        (rounded as i64).to_formatted_string(&Locale::en)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Y tick labels: fewer decimals for larger magnitudes.
pub fn format_y_tick(v: f64) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(ymin: f64, ymax: f64, ticks: usize, font_px: u32) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        max_px = max_px.max(estimate_text_width_px(&format_y_tick(v), font_px));
    }
    // room for the tick marks and the rotated axis description
    let with_padding = max_px.saturating_add(36);
    with_padding.clamp(56, 160)
}
