use crate::config::VizConfig;
use crate::layout::margins::{Margins, PlotArea};

/// Default tight-layout padding between panels, in font-size units.
const TIGHT_PAD: f64 = 1.08;

/// N×N grid of square panel cells.
///
/// Spacing follows a tight layout where `h_pad`/`w_pad` (font-size units)
/// are added to the default padding; negative pads collapse the gap so
/// neighbouring panels touch.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerLayout {
    pub n: usize,
    pub panel: f64,
    pub gap_x: f64,
    pub gap_y: f64,
    pub margins: Margins,
    pub width: f64,
    pub height: f64,
}

impl CornerLayout {
    pub fn new(n: usize, margins: Margins, config: &VizConfig) -> Self {
        let panel = config.corner.panel_size.max(10.0);
        let gap_x = ((TIGHT_PAD + config.corner.w_pad) * config.font.size).max(0.0);
        let gap_y = ((TIGHT_PAD + config.corner.h_pad) * config.font.size).max(0.0);
        let span = |gap: f64| n as f64 * panel + n.saturating_sub(1) as f64 * gap;

        Self {
            n,
            panel,
            gap_x,
            gap_y,
            margins,
            width: margins.left + span(gap_x) + margins.right,
            height: margins.top + span(gap_y) + margins.bottom,
        }
    }

    /// Plot area of cell `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> PlotArea {
        PlotArea::manual(
            self.margins.left + col as f64 * (self.panel + self.gap_x),
            self.margins.top + row as f64 * (self.panel + self.gap_y),
            self.panel,
            self.panel,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margins() -> Margins {
        Margins { left: 40.0, right: 30.0, top: 10.0, bottom: 50.0 }
    }

    #[test]
    fn negative_pads_touch_horizontally() {
        let config = VizConfig::default();
        let layout = CornerLayout::new(3, margins(), &config);
        assert_eq!(layout.gap_x, 0.0);
        let a = layout.cell(1, 0);
        let b = layout.cell(1, 1);
        assert!((b.left - a.right()).abs() < 1e-9);
        assert!(layout.gap_y < config.font.size * 0.2);
    }

    #[test]
    fn figure_size_covers_all_cells() {
        let config = VizConfig::default();
        let layout = CornerLayout::new(4, margins(), &config);
        let last = layout.cell(3, 3);
        assert!((layout.width - (last.right() + 30.0)).abs() < 1e-9);
        assert!((layout.height - (last.bottom() + 50.0)).abs() < 1e-9);
        assert_eq!(last.width, config.corner.panel_size);
    }

    #[test]
    fn single_panel() {
        let config = VizConfig::default();
        let layout = CornerLayout::new(1, margins(), &config);
        assert_eq!(layout.cell(0, 0), PlotArea::manual(40.0, 10.0, layout.panel, layout.panel));
        assert!((layout.width - (70.0 + layout.panel)).abs() < 1e-9);
    }
}
