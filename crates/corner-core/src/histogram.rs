use ndarray::{ArrayD, ArrayViewD, Dimension, IxDyn};

use crate::{Error, Result};

/// An N-dimensional count array paired with its per-dimension bin edges.
///
/// Construction only enforces `edges.len() == counts.ndim()`. Edge
/// monotonicity, edge lengths and count signs are left to [`Self::validate`]
/// so callers decide how strict they want to be.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedHistogram {
    counts: ArrayD<f64>,
    edges: Vec<Vec<f64>>,
}

impl BinnedHistogram {
    /// Pair a count array with its bin edges.
    ///
    /// A 0-dimensional array is promoted to a single bin along one axis.
    pub fn new(counts: ArrayD<f64>, edges: Vec<Vec<f64>>) -> Result<Self> {
        let counts = if counts.ndim() == 0 {
            let value = counts.iter().copied().next().unwrap_or(0.0);
            ArrayD::from_elem(IxDyn(&[1]), value)
        } else {
            counts
        };

        if edges.len() != counts.ndim() {
            return Err(Error::ShapeMismatch { ndim: counts.ndim(), edges: edges.len() });
        }

        Ok(Self { counts, edges })
    }

    /// Build from a flat row-major count vector and an explicit shape.
    pub fn from_shape_vec(
        shape: &[usize],
        counts: Vec<f64>,
        edges: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let array = ArrayD::from_shape_vec(IxDyn(shape), counts).map_err(|e| {
            Error::Validation(format!("counts do not fit shape {:?}: {}", shape, e))
        })?;
        Self::new(array, edges)
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.counts.ndim()
    }

    /// Bins per dimension.
    pub fn shape(&self) -> &[usize] {
        self.counts.shape()
    }

    /// Read-only view of the counts.
    pub fn counts(&self) -> ArrayViewD<'_, f64> {
        self.counts.view()
    }

    /// All bin-edge sequences.
    pub fn edges(&self) -> &[Vec<f64>] {
        &self.edges
    }

    /// Bin edges of one dimension (empty for an out-of-range dimension).
    pub fn edges_of(&self, dim: usize) -> &[f64] {
        self.edges.get(dim).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Outer range `[first edge, last edge]` of one dimension.
    pub fn range(&self, dim: usize) -> (f64, f64) {
        let e = self.edges_of(dim);
        let lo = e.first().copied().unwrap_or(0.0);
        let hi = e.last().copied().unwrap_or(1.0);
        (lo, hi)
    }

    /// Bin midpoints of one dimension.
    pub fn midpoints(&self, dim: usize) -> Vec<f64> {
        midpoints(self.edges_of(dim))
    }

    /// Grand total of all counts.
    pub fn total(&self) -> f64 {
        self.counts.sum()
    }

    /// Strict checks the renderer itself does not perform.
    ///
    /// Every edge sequence must hold `n_i + 1` finite, strictly increasing
    /// values, and every count must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (dim, (edges, &n)) in self.edges.iter().zip(self.counts.shape()).enumerate() {
            if edges.len() != n + 1 {
                return Err(Error::Validation(format!(
                    "dimension {dim}: expected {} bin edges for {n} bins, got {}",
                    n + 1,
                    edges.len()
                )));
            }
            if let Some(bad) = edges.iter().position(|e| !e.is_finite()) {
                return Err(Error::Validation(format!(
                    "dimension {dim}: edge {bad} is not finite"
                )));
            }
            if let Some(k) = edges.windows(2).position(|w| w[1] <= w[0]) {
                return Err(Error::Validation(format!(
                    "dimension {dim}: edges not strictly increasing at index {}",
                    k + 1
                )));
            }
        }

        if let Some((idx, v)) =
            self.counts.indexed_iter().find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(Error::Validation(format!(
                "count at {:?} must be finite and non-negative, got {}",
                idx.slice(),
                v
            )));
        }

        Ok(())
    }
}

/// Midpoints between consecutive edges: `0.5 * (e[k] + e[k + 1])`.
pub fn midpoints(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

/// Opt-in check that a label list has one entry per dimension.
pub fn validate_labels(labels: &[String], ndim: usize) -> Result<()> {
    if labels.len() != ndim {
        return Err(Error::Validation(format!(
            "expected {ndim} labels (one per dimension), got {}",
            labels.len()
        )));
    }
    Ok(())
}
