use corner_viz::TickSide;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::{Font, HAlign, Stroke, VAlign};

/// Per-panel tick placement.
#[derive(Debug, Clone, Copy)]
pub struct TickPlacement {
    /// Side carrying the vertical ticks and label.
    pub y_side: TickSide,
    /// Counter-clockwise rotation of x tick labels, in degrees.
    pub x_rotation: f64,
}

/// Pens shared by both axes of one panel.
struct Pens {
    major: Stroke,
    minor: Stroke,
    grid: Option<Stroke>,
    /// +1 when ticks point out of the panel, -1 when they point in.
    out: f64,
    tick_len: f64,
    minor_len: f64,
    /// Distance from the frame to the near edge of tick labels.
    label_gap: f64,
    tick_font: Font,
}

impl Pens {
    fn new(config: &VizConfig) -> Self {
        let black = Color::rgb(0, 0, 0);
        let out = if config.axes.tick_direction == "in" { -1.0 } else { 1.0 };
        let tick_len = config.axes.tick_length;
        Self {
            major: Stroke::new(black, 0.6),
            minor: Stroke::new(black, 0.4),
            grid: config
                .grid
                .show
                .then(|| Stroke::new(config.grid.color.with_alpha(config.grid.alpha), 0.5).dashed()),
            out,
            tick_len,
            minor_len: config.axes.minor_tick_length,
            label_gap: tick_len.max(0.0) * out.max(0.0) + 3.0,
            tick_font: Font::new(config.font.tick_size),
        }
    }
}

fn inside(px: f64, lo: f64, hi: f64) -> bool {
    px >= lo - 0.5 && px <= hi + 0.5
}

/// Draw ticks, tick labels, optional grid lines, the frame and axis labels.
///
/// Axes whose `tick_labels` are empty keep their tick marks. Rotated x
/// labels end at their tick so they hang below the panel.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    placement: TickPlacement,
    config: &VizConfig,
) {
    let pens = Pens::new(config);
    let x_extent = draw_x_ticks(canvas, area, x_axis, placement.x_rotation, &pens, config);
    let y_extent = draw_y_ticks(canvas, area, y_axis, placement.y_side, &pens, config);
    draw_frame(canvas, area, config.axes.frame_width);

    let label_font = Font::new(config.font.label_size).aligned(HAlign::Center, VAlign::Top);
    if !x_axis.label.is_empty() {
        let y = area.bottom() + pens.label_gap + x_extent + 4.0;
        canvas.text(area.left + area.width / 2.0, y, &x_axis.label, &label_font);
    }
    if !y_axis.label.is_empty() {
        let offset = pens.label_gap + 1.0 + y_extent + 4.0;
        let x = match placement.y_side {
            TickSide::Left => area.left - offset - config.font.label_size,
            TickSide::Right => area.right() + offset,
        };
        canvas.text_rotated(x, area.top + area.height / 2.0, &y_axis.label, &label_font, -90.0);
    }
}

/// Bottom ticks and labels; returns how far the labels reach below the gap.
fn draw_x_ticks(
    canvas: &mut Canvas,
    area: &PlotArea,
    axis: &Axis,
    rotation: f64,
    pens: &Pens,
    config: &VizConfig,
) -> f64 {
    let rotated = rotation.abs() > 1e-9;
    let font = if rotated {
        pens.tick_font.aligned(HAlign::Right, VAlign::Middle)
    } else {
        pens.tick_font.aligned(HAlign::Center, VAlign::Top)
    };
    let theta = rotation.to_radians();
    let base = area.bottom();
    let mut extent: f64 = 0.0;

    for (i, &value) in axis.tick_positions.iter().enumerate() {
        let px = axis.data_to_pixel(value, area.left, area.right());
        if !inside(px, area.left, area.right()) {
            continue;
        }
        if let Some(grid) = &pens.grid {
            canvas.line(px, area.top, px, base, grid);
        }
        canvas.line(px, base, px, base + pens.out * pens.tick_len, &pens.major);

        let Some(label) = axis.tick_labels.get(i) else { continue };
        let y = base + pens.label_gap;
        if rotated {
            canvas.text_rotated(px, y, label, &font, -rotation);
            let w = canvas.measure_text(label, &font).width;
            extent = extent.max(w * theta.sin().abs() + font.size * theta.cos().abs());
        } else {
            canvas.text(px, y, label, &font);
            extent = extent.max(font.size);
        }
    }

    if config.axes.minor_ticks {
        for &value in &axis.minor_ticks {
            let px = axis.data_to_pixel(value, area.left, area.right());
            if inside(px, area.left, area.right()) {
                canvas.line(px, base, px, base + pens.out * pens.minor_len, &pens.minor);
            }
        }
    }
    extent
}

/// Side ticks and labels; returns the widest label.
fn draw_y_ticks(
    canvas: &mut Canvas,
    area: &PlotArea,
    axis: &Axis,
    side: TickSide,
    pens: &Pens,
    config: &VizConfig,
) -> f64 {
    let (edge, sign, halign) = match side {
        TickSide::Left => (area.left, -1.0, HAlign::Right),
        TickSide::Right => (area.right(), 1.0, HAlign::Left),
    };
    let font = pens.tick_font.aligned(halign, VAlign::Middle);
    let mut widest: f64 = 0.0;

    for (i, &value) in axis.tick_positions.iter().enumerate() {
        let py = axis.data_to_pixel(value, area.bottom(), area.top);
        if !inside(py, area.top, area.bottom()) {
            continue;
        }
        if let Some(grid) = &pens.grid {
            canvas.line(area.left, py, area.right(), py, grid);
        }
        canvas.line(edge, py, edge + sign * pens.out * pens.tick_len, py, &pens.major);

        if let Some(label) = axis.tick_labels.get(i) {
            canvas.text(edge + sign * (pens.label_gap + 1.0), py, label, &font);
            widest = widest.max(canvas.measure_text(label, &font).width);
        }
    }

    if config.axes.minor_ticks {
        for &value in &axis.minor_ticks {
            let py = axis.data_to_pixel(value, area.bottom(), area.top);
            if inside(py, area.top, area.bottom()) {
                canvas.line(edge, py, edge + sign * pens.out * pens.minor_len, py, &pens.minor);
            }
        }
    }
    widest
}

/// Frame outline of a panel.
pub fn draw_frame(canvas: &mut Canvas, area: &PlotArea, width: f64) {
    let stroke = Stroke::new(Color::rgb(0, 0, 0), width);
    canvas.frame(area.left, area.top, area.width, area.height, &stroke);
}
