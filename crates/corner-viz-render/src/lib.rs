//! # corner-viz-render
//!
//! Draws corner plots as SVG (PNG/PDF behind features).
//!
//! [`render`] marginalizes a binned histogram with `corner-viz`, sizes an
//! N×N grid of square panels and returns a [`Figure`] whose canvas and
//! per-panel [`AxesHandle`]s stay available to the caller.

pub mod canvas;
pub mod color;
pub mod config;
pub mod figure;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

use corner_core::BinnedHistogram;
use ndarray::ArrayD;
use thiserror::Error;

pub use config::{
    Hist1dStyle, Hist2dStyle, HistType, Norm, VizConfig, resolve_config, resolve_config_with_theme,
};
pub use figure::{AxesHandle, AxesKind, Figure, PanelValues};
pub use output::OutputFormat;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] corner_core::Error),
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("unknown colormap: {0}")]
    UnknownColormap(String),
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[cfg(feature = "pdf")]
    #[error("PDF conversion error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Render the corner plot of an already binned histogram.
///
/// Diagonal panels show the 1D marginals, the lower triangle the 2D
/// marginals, the upper triangle stays empty. Each style applies to every
/// panel of its kind.
pub fn render(
    hist: &BinnedHistogram,
    labels: Option<&[String]>,
    style_1d: &Hist1dStyle,
    style_2d: &Hist2dStyle,
    config: &VizConfig,
) -> Result<Figure> {
    let grid = corner_viz::corner_grid(hist, labels)?;
    plots::corner::render_grid(&grid, style_1d, style_2d, config)
}

/// [`render`] from raw counts and edges.
///
/// Fails with `ShapeMismatch` when the edge count differs from the number
/// of dimensions; nothing is drawn in that case.
pub fn render_counts(
    counts: ArrayD<f64>,
    edges: Vec<Vec<f64>>,
    labels: Option<&[String]>,
    style_1d: &Hist1dStyle,
    style_2d: &Hist2dStyle,
    config: &VizConfig,
) -> Result<Figure> {
    let hist = BinnedHistogram::new(counts, edges)?;
    render(&hist, labels, style_1d, style_2d, config)
}

/// Render a `corner_marginals_v0` panel-grid JSON with the config's styles.
pub fn render_artifact_svg(grid_json: &str, config: &VizConfig) -> Result<String> {
    let grid: corner_viz::PanelGrid = serde_json::from_str(grid_json)?;
    let fig = plots::corner::render_grid(&grid, &config.hist1d, &config.hist2d, config)?;
    Ok(fig.to_svg())
}

/// Serialize a figure in the named format (`svg`, `png`, `pdf`).
pub fn render_to_bytes(fig: &Figure, format: &str, config: &VizConfig) -> Result<Vec<u8>> {
    output::OutputFormat::from_name(format)?.encode(fig.to_svg(), config.output.dpi)
}

/// Write a figure to a file, choosing the format from its extension.
pub fn render_to_file(fig: &Figure, path: &std::path::Path, config: &VizConfig) -> Result<()> {
    let bytes = output::OutputFormat::from_path(path)?.encode(fig.to_svg(), config.output.dpi)?;
    output::write(path, &bytes)
}
