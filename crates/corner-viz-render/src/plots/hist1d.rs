use corner_viz::WeightedPoints1D;

use crate::canvas::Canvas;
use crate::config::{Hist1dStyle, HistType};
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::{Paint, Stroke};

/// Index of the bin holding `v`: half-open bins, the last one closed on the right.
pub(crate) fn bin_index(edges: &[f64], v: f64) -> Option<usize> {
    let (&first, &last) = (edges.first()?, edges.last()?);
    if edges.len() < 2 || !(v >= first && v <= last) {
        return None;
    }
    if v == last {
        return Some(edges.len() - 2);
    }
    // First edge strictly greater than v, minus one.
    let upper = edges.partition_point(|&e| e <= v);
    upper.checked_sub(1).filter(|&i| i < edges.len() - 1)
}

/// Sum weights into the bins delimited by `edges`.
///
/// Points outside `[edges[0], edges[last]]` or NaN are dropped; a missing
/// weight counts as zero.
pub fn bin_weighted(positions: &[f64], weights: &[f64], edges: &[f64]) -> Vec<f64> {
    let mut heights = vec![0.0; edges.len().saturating_sub(1)];
    for (i, &p) in positions.iter().enumerate() {
        if let Some(b) = bin_index(edges, p) {
            heights[b] += weights.get(i).copied().unwrap_or(0.0);
        }
    }
    heights
}

/// Count axis for a 1D panel: starts at zero, nice ticks above the tallest bar.
pub fn count_axis(heights: &[f64], target_ticks: usize) -> Axis {
    let top = heights.iter().copied().filter(|h| h.is_finite()).fold(0.0_f64, f64::max);
    Axis::auto_linear(0.0, if top > 0.0 { top } else { 1.0 }, target_ticks)
}

/// Histogram the weighted points and draw them; returns the bin heights.
pub fn hist1d(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    points: &WeightedPoints1D,
    style: &Hist1dStyle,
) -> Vec<f64> {
    let heights = bin_weighted(&points.positions, &points.weights, &points.edges);
    let bottom = y_axis.data_to_pixel(0.0_f64.max(y_axis.min), area.bottom(), area.top);
    let x_px = |v: f64| x_axis.data_to_pixel(v, area.left, area.right());
    let y_px = |v: f64| y_axis.data_to_pixel(v, area.bottom(), area.top);

    match style.histtype {
        HistType::Bar => {
            let fill = Paint::solid(style.color).with_opacity(style.alpha);
            for (i, &h) in heights.iter().enumerate() {
                if h <= 0.0 || !h.is_finite() {
                    continue;
                }
                let (x0, x1) = (x_px(points.edges[i]), x_px(points.edges[i + 1]));
                let top = y_px(h);
                canvas.rect(x0, top, x1 - x0, bottom - top, &fill);
            }
        }
        HistType::Step => {
            let mut outline = Vec::with_capacity(2 * heights.len() + 2);
            for (i, &h) in heights.iter().enumerate() {
                let h = if h.is_finite() { h } else { 0.0 };
                if i == 0 {
                    outline.push((x_px(points.edges[0]), bottom));
                }
                outline.push((x_px(points.edges[i]), y_px(h)));
                outline.push((x_px(points.edges[i + 1]), y_px(h)));
            }
            if let Some(&last) = points.edges.last() {
                outline.push((x_px(last), bottom));
            }
            let line = Stroke::new(style.color.with_alpha(style.alpha), style.line_width);
            canvas.polyline(&outline, &line);
        }
    }

    tracing::trace!(bins = heights.len(), "hist1d drawn");
    heights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn last_bin_is_right_closed() {
        let edges = [0.0, 1.0, 2.0];
        assert_eq!(bin_index(&edges, 0.0), Some(0));
        assert_eq!(bin_index(&edges, 1.0), Some(1));
        assert_eq!(bin_index(&edges, 2.0), Some(1));
        assert_eq!(bin_index(&edges, 2.5), None);
        assert_eq!(bin_index(&edges, -0.1), None);
        assert_eq!(bin_index(&edges, f64::NAN), None);
        assert_eq!(bin_index(&[1.0], 1.0), None);
    }

    #[test]
    fn midpoints_reproduce_heights() {
        let h = bin_weighted(&[0.5, 1.5, 2.5], &[5.0, 7.0, 9.0], &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(h, vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn out_of_range_dropped() {
        let h = bin_weighted(&[-1.0, 0.5, 10.0, f64::NAN], &[1.0, 2.0, 3.0, 4.0], &[0.0, 1.0]);
        assert_eq!(h, vec![2.0]);
    }

    #[test]
    fn count_axis_starts_at_zero() {
        let ax = count_axis(&[5.0, 7.0, 9.0], 5);
        assert_eq!(ax.min, 0.0);
        assert!(ax.max >= 9.0);
        let empty = count_axis(&[0.0, 0.0], 5);
        assert_eq!((empty.min, empty.max), (0.0, 1.0));
    }

    fn draw(histtype: HistType) -> (Vec<f64>, String) {
        let mut canvas = Canvas::new(200.0, 200.0);
        let area = PlotArea::manual(0.0, 0.0, 100.0, 100.0);
        let points = WeightedPoints1D {
            positions: vec![0.5, 1.5, 2.5],
            weights: vec![5.0, 0.0, 9.0],
            edges: vec![0.0, 1.0, 2.0, 3.0],
        };
        let x = Axis::fixed(0.0, 3.0);
        let y = count_axis(&[5.0, 0.0, 9.0], 5);
        let style = Hist1dStyle { histtype, color: Color::rgb(255, 0, 0), ..Default::default() };
        let h = hist1d(&mut canvas, &area, &x, &y, &points, &style);
        (h, canvas.finish_svg())
    }

    #[test]
    fn bars_skip_empty_bins() {
        let (h, svg) = draw(HistType::Bar);
        assert_eq!(h, vec![5.0, 0.0, 9.0]);
        assert_eq!(svg.matches(r##"fill="#ff0000""##).count(), 2);
    }

    #[test]
    fn step_is_one_outline() {
        let (_, svg) = draw(HistType::Step);
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains(r##"stroke="#ff0000""##));
    }
}
