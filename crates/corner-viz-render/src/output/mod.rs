//! Figure serialization: SVG as drawn, PNG and PDF converted from it.

use std::path::Path;

use crate::{RenderError, Result};

#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "png")]
mod png;

/// File format of a rendered figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    #[cfg(feature = "png")]
    Png,
    #[cfg(feature = "pdf")]
    Pdf,
}

impl OutputFormat {
    /// Case-insensitive format name; formats whose feature is off are unknown.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            #[cfg(feature = "png")]
            "png" => Ok(Self::Png),
            #[cfg(feature = "pdf")]
            "pdf" => Ok(Self::Pdf),
            other => Err(RenderError::UnknownFormat(other.to_string())),
        }
    }

    /// Format named by the file extension; no extension means SVG.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension() {
            None => Ok(Self::Svg),
            Some(ext) => Self::from_name(&ext.to_string_lossy()),
        }
    }

    /// Encode an SVG document; `dpi` only matters for raster output.
    #[cfg_attr(not(feature = "png"), allow(unused_variables))]
    pub fn encode(self, svg: String, dpi: u32) -> Result<Vec<u8>> {
        match self {
            Self::Svg => Ok(svg.into_bytes()),
            #[cfg(feature = "png")]
            Self::Png => png::rasterize(&svg, dpi),
            #[cfg(feature = "pdf")]
            Self::Pdf => pdf::convert(&svg),
        }
    }
}

/// Write encoded figure bytes.
pub fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "figure written");
    Ok(())
}

/// Parse our own SVG output with system fonts available for text.
#[cfg(any(feature = "png", feature = "pdf"))]
fn parse_tree(svg: &str) -> std::result::Result<usvg::Tree, String> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    usvg::Tree::from_str(svg, &options).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_name_and_path() {
        assert_eq!(OutputFormat::from_name("SVG").unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("plot")).unwrap(), OutputFormat::Svg);
        let err = OutputFormat::from_path(Path::new("plot.bmp")).unwrap_err();
        assert!(matches!(err, RenderError::UnknownFormat(ref f) if f == "bmp"));
    }

    #[test]
    fn svg_encodes_verbatim() {
        let bytes = OutputFormat::Svg.encode("<svg/>".into(), 72).unwrap();
        assert_eq!(bytes, b"<svg/>");
    }
}
