//! Marginalization: summing a histogram over the complement of a dimension subset.

use corner_core::{Error, Result};
use ndarray::{Array2, ArrayD, ArrayViewD, Axis, Ix2};

/// Sum `counts` over every axis not listed in `keep`.
///
/// The result keeps the surviving axes in ascending dimension order, whatever
/// order `keep` lists them in. Indices in `keep` that are out of range are
/// ignored; an empty `keep` collapses to a 0-dimensional grand total.
pub fn marginalize(counts: &ArrayViewD<'_, f64>, keep: &[usize]) -> ArrayD<f64> {
    // Highest axis first so lower indices stay valid while summing.
    let mut dropped = (0..counts.ndim()).rev().filter(|axis| !keep.contains(axis));

    let Some(first) = dropped.next() else {
        return counts.to_owned();
    };
    dropped.fold(counts.sum_axis(Axis(first)), |acc, axis| acc.sum_axis(Axis(axis)))
}

/// 1D marginal of dimension `dim`: one weight per bin of that dimension.
pub fn marginal_1d(counts: &ArrayViewD<'_, f64>, dim: usize) -> Vec<f64> {
    marginalize(counts, &[dim]).iter().copied().collect()
}

/// 2D marginal over `(row, col)`, indexed `[row_bin, col_bin]`.
///
/// The reduction itself orders axes by dimension index, so for a
/// lower-triangle pair (`col < row`) it yields `[col_bin, row_bin]` and is
/// transposed here. Flattening the result in logical order walks the
/// `row` dimension in the outer loop, matching a meshgrid of
/// `col midpoints × row midpoints`.
pub fn marginal_2d(counts: &ArrayViewD<'_, f64>, row: usize, col: usize) -> Result<Array2<f64>> {
    if row == col {
        return Err(Error::Validation(format!(
            "2D marginal needs two distinct dimensions, got ({row}, {col})"
        )));
    }

    let reduced = marginalize(counts, &[row, col]).into_dimensionality::<Ix2>().map_err(|e| {
        Error::Validation(format!("2D marginal over ({row}, {col}) is not two-dimensional: {e}"))
    })?;

    Ok(if col < row { reduced.reversed_axes() } else { reduced })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{ArrayD, IxDyn, arr2};

    fn cube() -> ArrayD<f64> {
        // shape (2, 3, 4), values 0..24 in row-major order
        ArrayD::from_shape_vec(IxDyn(&[2, 3, 4]), (0..24).map(f64::from).collect()).unwrap()
    }

    #[test]
    fn example_row_and_column_sums() {
        let h = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).into_dyn();
        assert_eq!(marginal_1d(&h.view(), 0), vec![6.0, 15.0]);
        assert_eq!(marginal_1d(&h.view(), 1), vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn example_lower_panel_is_transposed() {
        let h = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).into_dyn();
        let m = marginal_2d(&h.view(), 1, 0).unwrap();
        assert_eq!(m.dim(), (3, 2));
        let flat: Vec<f64> = m.iter().copied().collect();
        assert_eq!(flat, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn keep_order_does_not_matter() {
        let h = cube();
        let a = marginalize(&h.view(), &[2, 0]);
        let b = marginalize(&h.view(), &[0, 2]);
        assert_eq!(a, b);
        assert_eq!(a.shape(), &[2, 4]);
    }

    #[test]
    fn empty_keep_is_grand_total() {
        let h = cube();
        let total = marginalize(&h.view(), &[]);
        assert_eq!(total.ndim(), 0);
        assert_relative_eq!(total.sum(), 276.0);
    }

    #[test]
    fn keeping_everything_is_identity() {
        let h = cube();
        assert_eq!(marginalize(&h.view(), &[0, 1, 2]), h);
    }

    #[test]
    fn every_marginal_preserves_total() {
        let h = cube();
        for dim in 0..3 {
            assert_relative_eq!(marginal_1d(&h.view(), dim).iter().sum::<f64>(), 276.0);
        }
        for row in 0..3 {
            for col in 0..row {
                assert_relative_eq!(marginal_2d(&h.view(), row, col).unwrap().sum(), 276.0);
            }
        }
    }

    #[test]
    fn upper_pair_is_not_transposed() {
        let h = cube();
        let lower = marginal_2d(&h.view(), 2, 0).unwrap();
        let upper = marginal_2d(&h.view(), 0, 2).unwrap();
        assert_eq!(lower.dim(), (4, 2));
        assert_eq!(upper.dim(), (2, 4));
        assert_eq!(lower.t(), upper);
    }

    #[test]
    fn diagonal_pair_is_rejected() {
        let h = cube();
        assert!(marginal_2d(&h.view(), 1, 1).is_err());
    }
}
