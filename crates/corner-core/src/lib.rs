//! # corner-core
//!
//! Input model for cornerhist.
//!
//! A corner plot is drawn from an already binned N-dimensional histogram:
//! an N-D count array plus one bin-edge sequence per dimension. This crate
//! owns that pairing ([`BinnedHistogram`]), the JSON document used to move
//! histograms between processes ([`HistogramDocument`]) and the shared
//! [`Error`] type.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types.
pub mod error;

/// JSON histogram documents.
pub mod document;

/// Binned histogram model and opt-in validation.
pub mod histogram;

pub use document::HistogramDocument;
pub use error::{Error, Result};
pub use histogram::{BinnedHistogram, midpoints, validate_labels};

/// Crate version, recorded in emitted artifacts.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
