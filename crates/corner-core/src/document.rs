use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BinnedHistogram, Result};

/// JSON form of a binned histogram.
///
/// Counts are flattened in row-major (C) order; `shape` restores the axes.
///
/// ```json
/// { "shape": [2, 3],
///   "counts": [1, 2, 3, 4, 5, 6],
///   "edges": [[0, 1, 2], [0, 1, 2, 3]],
///   "labels": ["x", "y"] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramDocument {
    /// Bins per dimension.
    pub shape: Vec<usize>,
    /// Flat row-major counts.
    pub counts: Vec<f64>,
    /// One edge sequence per dimension.
    pub edges: Vec<Vec<f64>>,
    /// Optional axis labels, one per dimension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl HistogramDocument {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Snapshot an in-memory histogram.
    pub fn from_histogram(hist: &BinnedHistogram, labels: Option<Vec<String>>) -> Self {
        Self {
            shape: hist.shape().to_vec(),
            counts: hist.counts().iter().copied().collect(),
            edges: hist.edges().to_vec(),
            labels,
        }
    }

    /// Split into the histogram and its labels.
    ///
    /// Fails with `ShapeMismatch` when the edge count disagrees with `shape`.
    pub fn into_histogram(self) -> Result<(BinnedHistogram, Option<Vec<String>>)> {
        let hist = BinnedHistogram::from_shape_vec(&self.shape, self.counts, self.edges)?;
        Ok((hist, self.labels))
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const DOC: &str = r#"{
        "shape": [2, 3],
        "counts": [1, 2, 3, 4, 5, 6],
        "edges": [[0, 1, 2], [0, 1, 2, 3]],
        "labels": ["x", "y"]
    }"#;

    #[test]
    fn parse_and_convert() {
        let doc = HistogramDocument::from_json(DOC).unwrap();
        let (hist, labels) = doc.into_histogram().unwrap();
        assert_eq!(hist.shape(), &[2, 3]);
        assert_eq!(hist.counts().iter().nth(3), Some(&4.0));
        assert_eq!(labels.unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn labels_are_optional() {
        let doc = HistogramDocument::from_json(
            r#"{"shape": [2], "counts": [1, 2], "edges": [[0, 1, 2]]}"#,
        )
        .unwrap();
        assert!(doc.labels.is_none());
        assert!(!doc.to_json_pretty().unwrap().contains("labels"));
    }

    #[test]
    fn edge_count_mismatch_surfaces() {
        let doc = HistogramDocument::from_json(
            r#"{"shape": [2, 2], "counts": [1, 2, 3, 4], "edges": [[0, 1, 2]]}"#,
        )
        .unwrap();
        assert!(matches!(doc.into_histogram(), Err(Error::ShapeMismatch { ndim: 2, edges: 1 })));
    }

    #[test]
    fn snapshot_keeps_row_major_order() {
        let doc = HistogramDocument::from_json(DOC).unwrap();
        let (hist, labels) = doc.clone().into_histogram().unwrap();
        assert_eq!(HistogramDocument::from_histogram(&hist, labels), doc);
    }
}
