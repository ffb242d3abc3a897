//! Corner-plot panel grid (numbers-first).
//!
//! Builds the full N×N description of a corner plot: which panels are
//! visible, the weighted points each one draws, and how its axes are
//! decorated (limits, labels, tick-label visibility, tick side, rotation).

use corner_core::{BinnedHistogram, Result};
use serde::{Deserialize, Serialize};

use crate::marginal::{marginal_1d, marginal_2d};
use crate::points::{WeightedPoints1D, WeightedPoints2D};

/// Schema tag written into serialized grids.
pub const SCHEMA_VERSION: &str = "corner_marginals_v0";

/// Vertical-axis label of diagonal panels.
pub const COUNTS_LABEL: &str = "counts";

/// Rotation of bottom-row x tick labels, in degrees.
pub const BOTTOM_TICK_ROTATION_DEG: f64 = 60.0;

/// Side of the panel that carries the vertical ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickSide {
    /// Data-value axis.
    Left,
    /// Count axis on diagonal panels.
    Right,
}

/// Decoration of one panel axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Fixed `[min, max]`; `None` means auto-scaled from the drawn values.
    pub limits: Option<[f64; 2]>,
    /// Axis label, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether tick labels are drawn.
    pub tick_labels: bool,
    /// Tick-label rotation in degrees (counter-clockwise).
    pub tick_rotation: f64,
}

impl AxisSpec {
    fn hidden() -> Self {
        Self { limits: None, label: None, tick_labels: false, tick_rotation: 0.0 }
    }

    fn fixed((lo, hi): (f64, f64)) -> Self {
        Self { limits: Some([lo, hi]), label: None, tick_labels: true, tick_rotation: 0.0 }
    }

    fn auto() -> Self {
        Self { limits: None, label: None, tick_labels: true, tick_rotation: 0.0 }
    }
}

/// What a panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelKind {
    /// Strict upper triangle: nothing drawn.
    Hidden,
    /// Diagonal: 1D marginal of `dim`.
    Marginal1d {
        /// Dimension on the horizontal axis.
        dim: usize,
        /// Weighted points to histogram.
        points: WeightedPoints1D,
    },
    /// Strict lower triangle: 2D marginal, `x_dim` horizontal, `y_dim` vertical.
    Marginal2d {
        /// Dimension on the horizontal axis (the panel column).
        x_dim: usize,
        /// Dimension on the vertical axis (the panel row).
        y_dim: usize,
        /// Weighted points to histogram.
        points: WeightedPoints2D,
    },
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
    /// Panel content.
    #[serde(flatten)]
    pub kind: PanelKind,
    /// Horizontal axis decoration.
    pub x_axis: AxisSpec,
    /// Vertical axis decoration.
    pub y_axis: AxisSpec,
    /// Side of the vertical ticks.
    pub y_side: TickSide,
    /// Draw with a square box.
    pub square: bool,
}

impl Panel {
    /// Whether the panel is drawn at all.
    pub fn is_visible(&self) -> bool {
        !matches!(self.kind, PanelKind::Hidden)
    }

    /// Total weight drawn by the panel (0 when hidden).
    pub fn total(&self) -> f64 {
        match &self.kind {
            PanelKind::Hidden => 0.0,
            PanelKind::Marginal1d { points, .. } => points.total(),
            PanelKind::Marginal2d { points, .. } => points.total(),
        }
    }
}

/// N×N corner-plot description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelGrid {
    /// Schema tag ([`SCHEMA_VERSION`]).
    pub schema_version: String,
    /// Producing crate version.
    pub tool_version: String,
    /// Number of histogram dimensions.
    pub ndim: usize,
    /// Axis labels, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Panels in row-major order: `panels[row][col]`.
    pub panels: Vec<Vec<Panel>>,
}

impl PanelGrid {
    /// Panel at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<&Panel> {
        self.panels.get(row).and_then(|r| r.get(col))
    }

    /// Iterate over every panel, row by row.
    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter().flatten()
    }

    /// Number of diagonal (1D) panels.
    pub fn diagonal_count(&self) -> usize {
        self.iter().filter(|p| matches!(p.kind, PanelKind::Marginal1d { .. })).count()
    }

    /// Number of lower-triangle (2D) panels.
    pub fn lower_count(&self) -> usize {
        self.iter().filter(|p| matches!(p.kind, PanelKind::Marginal2d { .. })).count()
    }

    /// Number of hidden panels.
    pub fn hidden_count(&self) -> usize {
        self.iter().filter(|p| !p.is_visible()).count()
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a grid previously emitted with [`Self::to_json_pretty`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Build the corner-plot grid for `hist`.
///
/// `labels` is optional; a short list leaves the missing axes unlabeled and
/// extra entries are ignored. Use [`corner_core::validate_labels`] for a
/// strict count check.
pub fn corner_grid(hist: &BinnedHistogram, labels: Option<&[String]>) -> Result<PanelGrid> {
    let n = hist.ndim();
    let counts = hist.counts();
    let mids: Vec<Vec<f64>> = (0..n).map(|d| hist.midpoints(d)).collect();
    let label_of = |dim: usize| labels.and_then(|l| l.get(dim)).cloned();
    let last_row = n - 1;

    let mut panels = Vec::with_capacity(n);
    for row in 0..n {
        let mut cells = Vec::with_capacity(n);
        for col in 0..n {
            if col > row {
                cells.push(Panel {
                    row,
                    col,
                    kind: PanelKind::Hidden,
                    x_axis: AxisSpec::hidden(),
                    y_axis: AxisSpec::hidden(),
                    y_side: TickSide::Left,
                    square: false,
                });
                continue;
            }

            let mut x_axis = AxisSpec::fixed(hist.range(col));
            if row == last_row {
                x_axis.label = label_of(col);
                x_axis.tick_rotation = BOTTOM_TICK_ROTATION_DEG;
            } else {
                x_axis.tick_labels = false;
            }

            let panel = if row == col {
                let points = WeightedPoints1D {
                    positions: mids[row].clone(),
                    weights: marginal_1d(&counts, row),
                    edges: hist.edges_of(row).to_vec(),
                };
                let mut y_axis = AxisSpec::auto();
                if labels.is_some() {
                    y_axis.label = Some(COUNTS_LABEL.to_string());
                }
                Panel {
                    row,
                    col,
                    kind: PanelKind::Marginal1d { dim: row, points },
                    x_axis,
                    y_axis,
                    y_side: TickSide::Right,
                    square: true,
                }
            } else {
                let grid = marginal_2d(&counts, row, col)?;
                let points = WeightedPoints2D::from_grid(
                    &mids[col],
                    &mids[row],
                    grid.view(),
                    hist.edges_of(col).to_vec(),
                    hist.edges_of(row).to_vec(),
                );
                let mut y_axis = AxisSpec::fixed(hist.range(row));
                if col == 0 {
                    y_axis.label = label_of(row);
                } else {
                    y_axis.tick_labels = false;
                }
                Panel {
                    row,
                    col,
                    kind: PanelKind::Marginal2d { x_dim: col, y_dim: row, points },
                    x_axis,
                    y_axis,
                    y_side: TickSide::Left,
                    square: true,
                }
            };
            cells.push(panel);
        }
        panels.push(cells);
    }

    tracing::debug!(ndim = n, panels = n * n, total = hist.total(), "corner grid built");

    Ok(PanelGrid {
        schema_version: SCHEMA_VERSION.to_string(),
        tool_version: corner_core::VERSION.to_string(),
        ndim: n,
        labels: labels.map(<[String]>::to_vec),
        panels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn example() -> BinnedHistogram {
        BinnedHistogram::new(
            arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).into_dyn(),
            vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0, 3.0]],
        )
        .unwrap()
    }

    fn labels() -> Vec<String> {
        vec!["a".into(), "b".into()]
    }

    #[test]
    fn limits_follow_edges() {
        let g = corner_grid(&example(), None).unwrap();
        let lower = g.get(1, 0).unwrap();
        assert_eq!(lower.x_axis.limits, Some([0.0, 2.0]));
        assert_eq!(lower.y_axis.limits, Some([0.0, 3.0]));

        let diag = g.get(1, 1).unwrap();
        assert_eq!(diag.x_axis.limits, Some([0.0, 3.0]));
        assert_eq!(diag.y_axis.limits, None);
        assert_eq!(diag.y_side, TickSide::Right);
    }

    #[test]
    fn labels_land_on_outer_axes() {
        let g = corner_grid(&example(), Some(&labels())).unwrap();
        assert_eq!(g.get(1, 0).unwrap().x_axis.label.as_deref(), Some("a"));
        assert_eq!(g.get(1, 1).unwrap().x_axis.label.as_deref(), Some("b"));
        assert_eq!(g.get(1, 0).unwrap().y_axis.label.as_deref(), Some("b"));
        assert_eq!(g.get(0, 0).unwrap().y_axis.label.as_deref(), Some(COUNTS_LABEL));
        assert_eq!(g.get(1, 1).unwrap().y_axis.label.as_deref(), Some(COUNTS_LABEL));
        assert_eq!(g.get(0, 0).unwrap().x_axis.label, None);
    }

    #[test]
    fn no_labels_means_unlabeled() {
        let g = corner_grid(&example(), None).unwrap();
        assert!(g.iter().all(|p| p.x_axis.label.is_none() && p.y_axis.label.is_none()));
    }

    #[test]
    fn short_label_list_leaves_gaps() {
        let short = vec!["a".to_string()];
        let g = corner_grid(&example(), Some(&short)).unwrap();
        assert_eq!(g.get(1, 0).unwrap().x_axis.label.as_deref(), Some("a"));
        assert_eq!(g.get(1, 1).unwrap().x_axis.label, None);
        assert_eq!(g.get(1, 0).unwrap().y_axis.label, None);
    }

    #[test]
    fn tick_label_stripping() {
        let g = corner_grid(&example(), None).unwrap();
        assert!(!g.get(0, 0).unwrap().x_axis.tick_labels);
        assert!(g.get(1, 0).unwrap().x_axis.tick_labels);
        assert_eq!(g.get(1, 0).unwrap().x_axis.tick_rotation, BOTTOM_TICK_ROTATION_DEG);
        assert_eq!(g.get(0, 0).unwrap().x_axis.tick_rotation, 0.0);
        assert!(g.get(1, 0).unwrap().y_axis.tick_labels);
    }

    #[test]
    fn json_round_trip_keeps_kind_tag() {
        let g = corner_grid(&example(), Some(&labels())).unwrap();
        let json = g.to_json_pretty().unwrap();
        assert!(json.contains("\"kind\": \"marginal2d\""));
        assert!(json.contains(SCHEMA_VERSION));
        assert_eq!(PanelGrid::from_json(&json).unwrap(), g);
    }
}
