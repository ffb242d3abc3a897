use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::primitives::Font;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Manual placement (grid cells).
    pub fn manual(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Largest centered square inside this area.
    pub fn square(&self) -> Self {
        let side = self.width.min(self.height);
        Self {
            left: self.left + (self.width - side) / 2.0,
            top: self.top + (self.height - side) / 2.0,
            width: side,
            height: side,
        }
    }
}

/// Outer figure margins around the panel grid, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    /// Margins for a corner grid from the widest tick labels on each side.
    ///
    /// `left_ticks` are the y tick labels of the first column, `right_ticks`
    /// the count-axis labels of the bottom-right diagonal panel and
    /// `bottom_ticks` the rotated x tick labels of the bottom row.
    pub fn corner(
        canvas: &Canvas,
        left_ticks: &[String],
        right_ticks: &[String],
        bottom_ticks: &[String],
        labeled: bool,
        config: &VizConfig,
    ) -> Self {
        let font = Font::new(config.font.tick_size);
        let widest = |labels: &[String]| {
            labels.iter().map(|l| canvas.measure_text(l, &font).width).fold(0.0_f64, f64::max)
        };
        let pad = config.corner.outer_pad;
        let tick_gap = config.axes.tick_length + 4.0;
        let label_room = if labeled { config.font.label_size + 8.0 } else { 0.0 };

        let left = pad + tick_gap + widest(left_ticks) + label_room;
        let right = pad + tick_gap + widest(right_ticks) + label_room;

        // Rotated labels occupy their projected height.
        let theta = config.corner.tick_rotation.to_radians();
        let rotated = widest(bottom_ticks) * theta.sin().abs()
            + config.font.tick_size * theta.cos().abs();
        let bottom = pad + tick_gap + rotated + label_room;

        Self { left, right, top: pad, bottom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_centered() {
        let a = PlotArea::manual(0.0, 0.0, 200.0, 100.0).square();
        assert_eq!(a, PlotArea::manual(50.0, 0.0, 100.0, 100.0));
        assert_eq!(a.right(), 150.0);
        assert_eq!(a.bottom(), 100.0);
    }

    #[test]
    fn labels_and_wide_ticks_grow_margins() {
        let canvas = Canvas::new(100.0, 100.0);
        let config = VizConfig::default();
        let short = vec!["0".to_string()];
        let long = vec!["10000.0".to_string()];

        let bare = Margins::corner(&canvas, &short, &short, &short, false, &config);
        let wide = Margins::corner(&canvas, &long, &short, &long, false, &config);
        let labeled = Margins::corner(&canvas, &short, &short, &short, true, &config);

        assert!(wide.left > bare.left);
        assert!(wide.bottom > bare.bottom);
        assert_eq!(wide.right, bare.right);
        assert!(labeled.left > bare.left && labeled.right > bare.right);
        assert_eq!(bare.top, config.corner.outer_pad);
    }
}
