use crate::RenderError;

/// Single-page vector PDF sized to the figure.
pub(super) fn convert(svg: &str) -> crate::Result<Vec<u8>> {
    let tree = super::parse_tree(svg).map_err(RenderError::Pdf)?;
    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), svg2pdf::PageOptions::default())
        .map_err(|e| RenderError::Pdf(e.to_string()))
}
