//! # corner-viz
//!
//! Numbers-first half of a corner plot.
//!
//! Reduces a binned N-D histogram to its 1D and 2D marginals and lays them
//! out as an N×N [`PanelGrid`]: diagonal panels carry 1D marginals, the
//! strict lower triangle carries 2D marginals, the upper triangle is hidden.
//! Every marginal is expressed as a weighted point set (one point per bin at
//! the bin midpoint, weighted by its count) so a plain histogram primitive
//! reproduces the bin heights exactly.
//!
//! The grid is plain data and serializes to JSON; drawing lives in
//! `corner-viz-render`.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// N×N panel grid: marginals plus per-panel axis decoration.
pub mod grid;

/// Sum-over-complement reductions.
pub mod marginal;

/// Weighted point sets fed to histogram primitives.
pub mod points;

pub use grid::{AxisSpec, Panel, PanelGrid, PanelKind, TickSide, corner_grid};
pub use marginal::{marginal_1d, marginal_2d, marginalize};
pub use points::{WeightedPoints1D, WeightedPoints2D};
