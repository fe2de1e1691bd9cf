//! Chart rendering: draw a [`ChartSpec`] to **PNG** or **SVG**.
//!
//! - Line + circle markers per series, colored red, blue, green, yellow (cycling)
//! - Optional per-point value labels (`65.49s`, `5.082x`)
//! - Optional ticks at every x value, thousands separators on integer ticks
//! - Legend with color patches when several labeled series share a chart
//! - File name derived from the title, so re-rendering overwrites in place

pub mod text;
pub mod util;

use crate::error::{ChartError, Result};
use crate::models::{ChartSpec, ImageFormat};

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use text::fit_font_px;
use util::{
    TickedAxis, compute_left_label_area_px, format_x_tick, format_y_tick, plot_ranges,
    series_color, x_key_points,
};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

const MARGIN: u32 = 16;
const Y_LABELS: usize = 10;
const TICK_FONT_PX: u32 = 16;
const DESC_FONT_PX: u32 = 20;
const CAPTION_FONT_PX: u32 = 24;
const ANNOTATION_FONT_PX: u32 = 16;
const LEGEND_FONT_PX: u32 = 18;
const MARKER_RADIUS: u32 = 4;

fn render_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Render(format!("{:?}", e))
}

/// Render `spec` into `output_dir` (created if missing) and return the written file's path.
///
/// Series are validated before anything touches the filesystem, so an invalid spec
/// leaves no file behind.
pub fn render(spec: &ChartSpec, output_dir: &Path) -> Result<PathBuf> {
    spec.validate()?;
    fs::create_dir_all(output_dir).map_err(|e| ChartError::io(output_dir, e))?;
    let out_path = output_dir.join(spec.file_name());
    render_to_path(spec, &out_path)?;
    Ok(out_path)
}

/// Render `spec` to an explicit file path; the encoding follows `spec.format`.
///
/// The backend and drawing areas are dropped before this returns on every path.
/// If drawing fails part-way, the partially written file is removed.
pub fn render_to_path(spec: &ChartSpec, out_path: &Path) -> Result<()> {
    spec.validate()?;
    let ranges = plot_ranges(spec)?;
    ensure_fonts_registered();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (spec.width, spec.height);

    let outcome = match spec.format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_chart(&root, spec, ranges).and_then(|_| {
                root.present()
                    .map_err(|e| write_err(out_path, format!("{:?}", e)))
            })
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_chart(&root, spec, ranges).and_then(|_| {
                root.present()
                    .map_err(|e| write_err(out_path, format!("{:?}", e)))
            })
        }
    };

    if let Err(e) = outcome {
        let _ = fs::remove_file(out_path);
        return Err(e);
    }
    debug!("rendered '{}' to {}", spec.title, out_path.display());
    Ok(())
}

fn write_err(path: &Path, msg: String) -> ChartError {
    ChartError::io(path, std::io::Error::other(msg))
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    ((x_lo, x_hi), (y_lo, y_hi)): ((f64, f64), (f64, f64)),
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(render_err)?;

    let x_ticks = x_key_points(spec, x_lo, x_hi);

    let caption = spec.display_caption();
    let caption_px = fit_font_px(
        caption,
        CAPTION_FONT_PX,
        12,
        spec.width.saturating_sub(2 * MARGIN),
    );
    let left_px = compute_left_label_area_px(y_lo, y_hi, Y_LABELS, TICK_FONT_PX);

    let mut chart = ChartBuilder::on(root)
        .margin(MARGIN)
        .caption(caption, (FontFamily::SansSerif, caption_px))
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d(TickedAxis::new(x_lo, x_hi, x_ticks), y_lo..y_hi)
        .map_err(render_err)?;

    let x_label_fmt = |x: &f64| format_x_tick(*x);
    let y_label_fmt = |y: &f64| format_y_tick(*y);

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .y_labels(Y_LABELS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, TICK_FONT_PX))
        .axis_desc_style((FontFamily::SansSerif, DESC_FONT_PX))
        .draw()
        .map_err(render_err)?;

    // Value labels sit with their lower-left corner on the (offset) anchor.
    let note_style = TextStyle::from((FontFamily::SansSerif, ANNOTATION_FONT_PX).into_font())
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    let (dx, dy) = spec.annotation_format.offset;

    for (idx, entry) in spec.series.iter().enumerate() {
        let line_color = series_color(idx);
        let marker_color = if spec.contrast_markers {
            series_color(idx + 1)
        } else {
            line_color
        };
        let points: Vec<(f64, f64)> = entry.series.points().collect();

        let elem = chart
            .draw_series(LineSeries::new(points.clone(), line_color.stroke_width(2)))
            .map_err(render_err)?;
        if let Some(label) = entry.label.as_deref() {
            elem.label(label).legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 16, y + 6)], line_color.filled())
            });
        }

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), MARKER_RADIUS, marker_color.filled())),
            )
            .map_err(render_err)?;

        if spec.annotations {
            chart
                .draw_series(points.iter().map(|&(x, y)| {
                    Text::new(
                        spec.annotation_format.format(y),
                        (x + dx, y + dy),
                        note_style.clone(),
                    )
                }))
                .map_err(render_err)?;
        }
    }

    let labeled = spec.series.iter().any(|s| s.label.is_some());
    if spec.series.len() > 1 && labeled {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, LEGEND_FONT_PX))
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}
