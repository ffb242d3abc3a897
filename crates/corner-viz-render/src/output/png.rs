use crate::RenderError;

/// Rasterize at `dpi`, one SVG point being 1/72 inch, onto a white page.
pub(super) fn rasterize(svg: &str, dpi: u32) -> crate::Result<Vec<u8>> {
    let tree = super::parse_tree(svg).map_err(RenderError::Png)?;
    let scale = dpi as f32 / 72.0;
    let px = |len: f32| ((len * scale).round() as u32).max(1);
    let size = tree.size();

    let mut pixmap = tiny_skia::Pixmap::new(px(size.width()), px(size.height()))
        .ok_or_else(|| RenderError::Png(format!("cannot allocate {dpi} dpi pixmap")))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(|e| RenderError::Png(e.to_string()))
}
