use corner_viz::WeightedPoints2D;
use ndarray::Array2;

use crate::canvas::Canvas;
use crate::color::{Colormap, colormap};
use crate::config::{Hist2dStyle, Norm};
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::plots::hist1d::bin_index;
use crate::primitives::Paint;

/// Overlap added to heatmap cells so neighbours leave no hairline seams.
const CELL_OVERLAP: f64 = 0.3;

/// Sum weighted points into a `[y_bin, x_bin]` grid.
///
/// Same bin rules as the 1D case on each axis; a point outside either
/// range is dropped.
pub fn bin_weighted_2d(
    x: &[f64],
    y: &[f64],
    weights: &[f64],
    x_edges: &[f64],
    y_edges: &[f64],
) -> Array2<f64> {
    let nx = x_edges.len().saturating_sub(1);
    let ny = y_edges.len().saturating_sub(1);
    let mut grid = Array2::zeros((ny, nx));
    for (i, (&px, &py)) in x.iter().zip(y).enumerate() {
        if let (Some(ix), Some(iy)) = (bin_index(x_edges, px), bin_index(y_edges, py)) {
            grid[[iy, ix]] += weights.get(i).copied().unwrap_or(0.0);
        }
    }
    grid
}

/// Maps cell values to `[0, 1]` colormap positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    norm: Norm,
    vmin: f64,
    vmax: f64,
}

impl ColorScale {
    /// Autoscale from the finite cells; log scaling only looks at positive ones.
    pub fn autoscale(grid: &Array2<f64>, norm: Norm) -> Self {
        let usable = |v: &&f64| v.is_finite() && (norm == Norm::Linear || **v > 0.0);
        let (vmin, vmax) = grid
            .iter()
            .filter(usable)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Self { norm, vmin, vmax }
    }

    /// Position of `v` on the colormap, `None` for masked cells.
    pub fn position(&self, v: f64) -> Option<f64> {
        if !v.is_finite() || !(self.vmin <= self.vmax) {
            return None;
        }
        let (v, lo, hi) = match self.norm {
            Norm::Linear => (v, self.vmin, self.vmax),
            Norm::Log if v > 0.0 => (v.ln(), self.vmin.ln(), self.vmax.ln()),
            Norm::Log => return None,
        };
        if hi > lo { Some(((v - lo) / (hi - lo)).clamp(0.0, 1.0)) } else { Some(0.0) }
    }
}

/// Histogram the weighted points and draw them as a heatmap; returns the grid.
pub fn hist2d(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    points: &WeightedPoints2D,
    style: &Hist2dStyle,
) -> crate::Result<Array2<f64>> {
    let cmap = colormap(&style.cmap)
        .ok_or_else(|| crate::RenderError::UnknownColormap(style.cmap.clone()))?;
    let grid =
        bin_weighted_2d(&points.x, &points.y, &points.weights, &points.x_edges, &points.y_edges);
    draw_heatmap(canvas, area, x_axis, y_axis, &grid, points, &cmap, style);
    Ok(grid)
}

#[allow(clippy::too_many_arguments)]
fn draw_heatmap(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    grid: &Array2<f64>,
    points: &WeightedPoints2D,
    cmap: &Colormap,
    style: &Hist2dStyle,
) {
    let scale = ColorScale::autoscale(grid, style.norm);
    let x_px = |v: f64| x_axis.data_to_pixel(v, area.left, area.right());
    let y_px = |v: f64| y_axis.data_to_pixel(v, area.bottom(), area.top);

    for ((iy, ix), &v) in grid.indexed_iter() {
        let Some(t) = scale.position(v) else { continue };
        let (x0, x1) = (x_px(points.x_edges[ix]), x_px(points.x_edges[ix + 1]));
        let (y0, y1) = (y_px(points.y_edges[iy + 1]), y_px(points.y_edges[iy]));
        let fill = Paint::solid(cmap.sample(t)).with_opacity(style.alpha);
        canvas.rect(x0, y0, x1 - x0 + CELL_OVERLAP, y1 - y0 + CELL_OVERLAP, &fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn example_points() -> WeightedPoints2D {
        WeightedPoints2D {
            x: vec![0.5, 1.5, 0.5, 1.5, 0.5, 1.5],
            y: vec![0.5, 0.5, 1.5, 1.5, 2.5, 2.5],
            weights: vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0],
            x_edges: vec![0.0, 1.0, 2.0],
            y_edges: vec![0.0, 1.0, 2.0, 3.0],
        }
    }

    #[test]
    fn grid_is_y_major() {
        let p = example_points();
        let g = bin_weighted_2d(&p.x, &p.y, &p.weights, &p.x_edges, &p.y_edges);
        assert_eq!(g, arr2(&[[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]));
    }

    #[test]
    fn out_of_range_points_dropped() {
        let g = bin_weighted_2d(&[0.5, 5.0], &[0.5, 0.5], &[1.0, 9.0], &[0.0, 1.0], &[0.0, 1.0]);
        assert_eq!(g, arr2(&[[1.0]]));
    }

    #[test]
    fn linear_scale_spans_min_to_max() {
        let s = ColorScale::autoscale(&arr2(&[[0.0, 5.0], [10.0, 2.5]]), Norm::Linear);
        assert_eq!(s.position(0.0), Some(0.0));
        assert_eq!(s.position(5.0), Some(0.5));
        assert_eq!(s.position(10.0), Some(1.0));
    }

    #[test]
    fn log_scale_masks_empty_cells() {
        let s = ColorScale::autoscale(&arr2(&[[0.0, 1.0], [10.0, 100.0]]), Norm::Log);
        assert_eq!(s.position(0.0), None);
        assert_eq!(s.position(1.0), Some(0.0));
        assert!((s.position(10.0).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn flat_grid_maps_to_bottom_of_colormap() {
        let s = ColorScale::autoscale(&arr2(&[[3.0, 3.0]]), Norm::Linear);
        assert_eq!(s.position(3.0), Some(0.0));
    }

    #[test]
    fn draws_one_cell_per_bin() {
        let mut canvas = Canvas::new(100.0, 100.0);
        let area = PlotArea::manual(0.0, 0.0, 100.0, 100.0);
        let g = hist2d(
            &mut canvas,
            &area,
            &Axis::fixed(0.0, 2.0),
            &Axis::fixed(0.0, 3.0),
            &example_points(),
            &Hist2dStyle::default(),
        )
        .unwrap();
        assert_eq!(g.sum(), 21.0);
        assert_eq!(canvas.element_count(), 6);
    }

    #[test]
    fn unknown_colormap_is_an_error() {
        let mut canvas = Canvas::new(10.0, 10.0);
        let style = Hist2dStyle { cmap: "nope".into(), ..Default::default() };
        let err = hist2d(
            &mut canvas,
            &PlotArea::manual(0.0, 0.0, 10.0, 10.0),
            &Axis::fixed(0.0, 2.0),
            &Axis::fixed(0.0, 3.0),
            &example_points(),
            &style,
        )
        .unwrap_err();
        assert!(matches!(err, crate::RenderError::UnknownColormap(_)));
        assert_eq!(canvas.element_count(), 0);
    }
}
