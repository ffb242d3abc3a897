use corner_viz::TickSide;
use ndarray::Array2;

use crate::canvas::Canvas;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;

/// What a panel ended up showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxesKind {
    /// Upper triangle, nothing drawn.
    Hidden,
    /// Diagonal 1D histogram of `dim`.
    Hist1d { dim: usize },
    /// Lower-triangle heatmap, `x_dim` horizontal and `y_dim` vertical.
    Hist2d { x_dim: usize, y_dim: usize },
}

/// Values a panel actually drew.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelValues {
    Empty,
    /// 1D bin heights.
    Heights(Vec<f64>),
    /// 2D cell sums, `[y_bin, x_bin]`.
    Grid(Array2<f64>),
}

impl PanelValues {
    pub fn total(&self) -> f64 {
        match self {
            Self::Empty => 0.0,
            Self::Heights(h) => h.iter().sum(),
            Self::Grid(g) => g.sum(),
        }
    }
}

/// Handle on one panel of a rendered figure.
#[derive(Debug, Clone)]
pub struct AxesHandle {
    pub row: usize,
    pub col: usize,
    pub kind: AxesKind,
    /// Panel box on the canvas (zero-sized when hidden).
    pub area: PlotArea,
    pub x_axis: Option<Axis>,
    pub y_axis: Option<Axis>,
    pub y_side: TickSide,
    pub values: PanelValues,
}

impl AxesHandle {
    pub fn is_visible(&self) -> bool {
        self.kind != AxesKind::Hidden
    }

    /// Canvas position of a data point, for drawing on top of the panel.
    pub fn data_to_canvas(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (xa, ya) = (self.x_axis.as_ref()?, self.y_axis.as_ref()?);
        Some((
            xa.data_to_pixel(x, self.area.left, self.area.right()),
            ya.data_to_pixel(y, self.area.bottom(), self.area.top),
        ))
    }
}

/// A rendered corner plot: drawing surface plus an N×N grid of panel handles.
///
/// The canvas stays open; callers may add to it before serializing.
pub struct Figure {
    canvas: Canvas,
    axes: Vec<Vec<AxesHandle>>,
}

impl Figure {
    pub(crate) fn new(canvas: Canvas, axes: Vec<Vec<AxesHandle>>) -> Self {
        Self { canvas, axes }
    }

    /// Panel handles, `axes()[row][col]`.
    pub fn axes(&self) -> &[Vec<AxesHandle>] {
        &self.axes
    }

    pub fn ax(&self, row: usize, col: usize) -> Option<&AxesHandle> {
        self.axes.get(row)?.get(col)
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn width(&self) -> f64 {
        self.canvas.width
    }

    pub fn height(&self) -> f64 {
        self.canvas.height
    }

    pub fn to_svg(&self) -> String {
        self.canvas.finish_svg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn values_total() {
        assert_eq!(PanelValues::Empty.total(), 0.0);
        assert_eq!(PanelValues::Heights(vec![1.0, 2.0]).total(), 3.0);
        assert_eq!(PanelValues::Grid(arr2(&[[1.0, 2.0], [3.0, 4.0]])).total(), 10.0);
    }

    #[test]
    fn hidden_handle_has_no_data_mapping() {
        let h = AxesHandle {
            row: 0,
            col: 1,
            kind: AxesKind::Hidden,
            area: PlotArea::manual(0.0, 0.0, 0.0, 0.0),
            x_axis: None,
            y_axis: None,
            y_side: TickSide::Left,
            values: PanelValues::Empty,
        };
        assert!(!h.is_visible());
        assert_eq!(h.data_to_canvas(0.0, 0.0), None);
    }

    #[test]
    fn data_maps_into_panel_box() {
        let h = AxesHandle {
            row: 1,
            col: 0,
            kind: AxesKind::Hist2d { x_dim: 0, y_dim: 1 },
            area: PlotArea::manual(10.0, 20.0, 100.0, 100.0),
            x_axis: Some(Axis::fixed(0.0, 2.0)),
            y_axis: Some(Axis::fixed(0.0, 3.0)),
            y_side: TickSide::Left,
            values: PanelValues::Empty,
        };
        assert_eq!(h.data_to_canvas(0.0, 0.0), Some((10.0, 120.0)));
        assert_eq!(h.data_to_canvas(2.0, 3.0), Some((110.0, 20.0)));
    }
}
