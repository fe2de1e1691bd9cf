//! boids_charts
//!
//! A small Rust library for turning boids simulation benchmark timings into
//! static charts. Pairs with the `boids-charts` CLI.
//!
//! ### Features
//! - One configurable line + marker renderer (PNG or SVG)
//! - Optional per-point value labels, forced ticks, multi-series legends
//! - Speedup transforms: consecutive ratio, baseline ratio, step difference
//! - Built-in catalogue of the measured runs, or JSON manifests
//!
//! ### Example
//! ```no_run
//! use boids_charts::{AnnotationFormat, ChartSpec, DeriveMode, Series};
//!
//! let times = Series::from_counts(&[1, 2, 4, 8], vec![13.094, 7.758, 4.105, 3.028]);
//! let speedup = boids_charts::derive::derive(&times, DeriveMode::BaselineRatio)?;
//! let spec = ChartSpec::new("10000 Parallel Boids")
//!     .axes("Number of Processors", "Speedup")
//!     .series(speedup)
//!     .annotate(AnnotationFormat::speedup())
//!     .force_ticks(true)
//!     .file_affixes("Speedup_", Some("Local".into()));
//! let path = boids_charts::viz::render(&spec, std::path::Path::new("py_out"))?;
//! println!("{}", path.display());
//! # Ok::<(), boids_charts::ChartError>(())
//! ```

pub mod batch;
pub mod datasets;
pub mod derive;
pub mod error;
pub mod models;
pub mod storage;
pub mod viz;

pub use derive::DeriveMode;
pub use error::ChartError;
pub use models::{AnnotationFormat, ChartSpec, ImageFormat, LabeledSeries, Series};
