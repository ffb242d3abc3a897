use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// One point per bin at the bin midpoint, weighted by the bin count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoints1D {
    /// Sample positions (bin midpoints).
    pub positions: Vec<f64>,
    /// Per-sample weights (marginal counts).
    pub weights: Vec<f64>,
    /// Bin edges handed to the histogram primitive.
    pub edges: Vec<f64>,
}

impl WeightedPoints1D {
    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Flattened `x × y` midpoint grid with one weight per cell.
///
/// Points are ordered with `x` varying fastest, i.e. the flattening of a
/// meshgrid built from (x midpoints, y midpoints).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoints2D {
    /// Horizontal coordinates.
    pub x: Vec<f64>,
    /// Vertical coordinates.
    pub y: Vec<f64>,
    /// Per-point weights.
    pub weights: Vec<f64>,
    /// Horizontal bin edges.
    pub x_edges: Vec<f64>,
    /// Vertical bin edges.
    pub y_edges: Vec<f64>,
}

impl WeightedPoints2D {
    /// Build from midpoints and a `[y_bin, x_bin]` weight grid.
    ///
    /// A midpoint missing for some grid cell (edges shorter than the
    /// histogram) becomes NaN, which histogram primitives drop.
    pub fn from_grid(
        x_mid: &[f64],
        y_mid: &[f64],
        grid: ArrayView2<'_, f64>,
        x_edges: Vec<f64>,
        y_edges: Vec<f64>,
    ) -> Self {
        let n = grid.len();
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);

        for ((iy, ix), &w) in grid.indexed_iter() {
            x.push(x_mid.get(ix).copied().unwrap_or(f64::NAN));
            y.push(y_mid.get(iy).copied().unwrap_or(f64::NAN));
            weights.push(w);
        }

        Self { x, y, weights, x_edges, y_edges }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Number of bins along x and y, as implied by the edges.
    pub fn bins(&self) -> (usize, usize) {
        (self.x_edges.len().saturating_sub(1), self.y_edges.len().saturating_sub(1))
    }

    /// Sum over x: one value per y bin.
    pub fn sum_over_x(&self) -> Vec<f64> {
        let (nx, ny) = self.bins();
        let mut out = vec![0.0; ny];
        if nx == 0 {
            return out;
        }
        for (i, w) in self.weights.iter().enumerate() {
            if let Some(slot) = out.get_mut(i / nx) {
                *slot += w;
            }
        }
        out
    }

    /// Sum over y: one value per x bin.
    pub fn sum_over_y(&self) -> Vec<f64> {
        let (nx, _) = self.bins();
        let mut out = vec![0.0; nx];
        if nx == 0 {
            return out;
        }
        for (i, w) in self.weights.iter().enumerate() {
            out[i % nx] += w;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn meshgrid_order_x_fastest() {
        let grid = arr2(&[[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]);
        let p = WeightedPoints2D::from_grid(
            &[0.5, 1.5],
            &[0.5, 1.5, 2.5],
            grid.view(),
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 2.0, 3.0],
        );
        assert_eq!(p.x, vec![0.5, 1.5, 0.5, 1.5, 0.5, 1.5]);
        assert_eq!(p.y, vec![0.5, 0.5, 1.5, 1.5, 2.5, 2.5]);
        assert_eq!(p.weights, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(p.sum_over_x(), vec![5.0, 7.0, 9.0]);
        assert_eq!(p.sum_over_y(), vec![6.0, 15.0]);
    }

    #[test]
    fn short_midpoints_become_nan() {
        let grid = arr2(&[[1.0, 2.0]]);
        let p = WeightedPoints2D::from_grid(
            &[0.5],
            &[0.5],
            grid.view(),
            vec![0.0, 1.0],
            vec![0.0, 1.0],
        );
        assert!(p.x[1].is_nan());
        assert_eq!(p.total(), 3.0);
    }
}
