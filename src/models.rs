use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};

/// Ordered (x, y) samples behind one plotted line.
///
/// Construction does not validate; [`Series::validate`] runs before anything is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    /// Series with index-derived x positions `0, 1, 2, ...`.
    pub fn indexed(y: Vec<f64>) -> Self {
        let x = (0..y.len()).map(|i| i as f64).collect();
        Self { x, y }
    }

    /// Series with integer x positions, e.g. processor counts.
    pub fn from_counts(x: &[u32], y: Vec<f64>) -> Self {
        Self {
            x: x.iter().map(|&v| v as f64).collect(),
            y,
        }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Check length agreement, non-emptiness, finiteness, and strictly increasing x.
    pub fn validate(&self) -> Result<()> {
        if self.x.len() != self.y.len() {
            return Err(ChartError::InvalidSeries(format!(
                "x has {} values but y has {}",
                self.x.len(),
                self.y.len()
            )));
        }
        if self.x.is_empty() {
            return Err(ChartError::InvalidSeries("series is empty".into()));
        }
        if let Some(i) = self
            .points()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChartError::InvalidSeries(format!(
                "non-finite value at index {i}"
            )));
        }
        if let Some(i) = self.x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ChartError::InvalidSeries(format!(
                "x values must be strictly increasing (index {})",
                i + 1
            )));
        }
        Ok(())
    }

    pub fn max_x(&self) -> Option<f64> {
        self.x.iter().copied().reduce(f64::max)
    }
}

/// A series plus the text shown for it in the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub series: Series,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// How per-point value labels are written and where they sit relative to the marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationFormat {
    pub precision: usize,
    pub suffix: String,
    /// Data-space offset `(dx, dy)` from the point to the label anchor.
    pub offset: (f64, f64),
}

impl AnnotationFormat {
    /// Elapsed time labels, e.g. `65.49s`, nudged right of the marker.
    pub fn seconds() -> Self {
        Self {
            precision: 2,
            suffix: "s".into(),
            offset: (0.5, 0.0),
        }
    }

    /// Speedup labels, e.g. `3.845x`, nudged above the marker.
    pub fn speedup() -> Self {
        Self {
            precision: 3,
            suffix: "x".into(),
            offset: (0.0, 0.1),
        }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}{}", self.precision, value, self.suffix)
    }
}

impl Default for AnnotationFormat {
    fn default() -> Self {
        Self::seconds()
    }
}

/// Output image encoding; also decides the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

fn default_width() -> u32 {
    600
}

fn default_height() -> u32 {
    600
}

/// Everything needed to draw and name one figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Source of the file name; also the caption unless `caption` is set.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    pub series: Vec<LabeledSeries>,
    #[serde(default)]
    pub annotations: bool,
    #[serde(default)]
    pub annotation_format: AnnotationFormat,
    /// Put a tick at every x value of the first series.
    #[serde(default)]
    pub force_ticks: bool,
    /// Extra room to the right of the largest x value.
    #[serde(default)]
    pub x_padding: f64,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Draw markers in the next palette color (red line, blue dots).
    #[serde(default)]
    pub contrast_markers: bool,
    #[serde(default)]
    pub file_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_suffix: Option<String>,
    #[serde(default)]
    pub format: ImageFormat,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            caption: None,
            x_label: String::new(),
            y_label: String::new(),
            series: Vec::new(),
            annotations: false,
            annotation_format: AnnotationFormat::default(),
            force_ticks: false,
            x_padding: 0.0,
            width: default_width(),
            height: default_height(),
            contrast_markers: false,
            file_prefix: String::new(),
            file_suffix: None,
            format: ImageFormat::Png,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(LabeledSeries {
            series,
            label: None,
        });
        self
    }

    pub fn labeled_series(mut self, series: Series, label: impl Into<String>) -> Self {
        self.series.push(LabeledSeries {
            series,
            label: Some(label.into()),
        });
        self
    }

    pub fn annotate(mut self, format: AnnotationFormat) -> Self {
        self.annotations = true;
        self.annotation_format = format;
        self
    }

    pub fn force_ticks(mut self, on: bool) -> Self {
        self.force_ticks = on;
        self
    }

    pub fn x_padding(mut self, padding: f64) -> Self {
        self.x_padding = padding;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn contrast_markers(mut self, on: bool) -> Self {
        self.contrast_markers = on;
        self
    }

    pub fn file_affixes(mut self, prefix: impl Into<String>, suffix: Option<String>) -> Self {
        self.file_prefix = prefix.into();
        self.file_suffix = suffix;
        self
    }

    pub fn format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Text drawn above the plot.
    pub fn display_caption(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.title)
    }

    /// `<prefix><title without whitespace>[_<suffix>].<ext>`
    pub fn file_name(&self) -> String {
        let stem: String = self.title.chars().filter(|c| !c.is_whitespace()).collect();
        let suffix = match self.file_suffix.as_deref() {
            Some(s) if !s.is_empty() => format!("_{s}"),
            _ => String::new(),
        };
        format!(
            "{}{}{}.{}",
            self.file_prefix,
            stem,
            suffix,
            self.format.extension()
        )
    }

    /// Validate every series; a spec with no series is rejected too, as is a title
    /// or affix that would put the file outside its output directory.
    pub fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            return Err(ChartError::InvalidSeries(format!(
                "chart '{}' has no series",
                self.title
            )));
        }
        for s in &self.series {
            s.series.validate()?;
        }
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidSeries(format!(
                "canvas size {}x{} is empty",
                self.width, self.height
            )));
        }
        let name = self.file_name();
        if name.contains(['/', '\\', '\0']) {
            return Err(ChartError::InvalidSeries(format!(
                "file name '{name}' must not contain path separators"
            )));
        }
        Ok(())
    }
}
