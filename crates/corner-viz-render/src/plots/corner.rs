use corner_viz::{AxisSpec, Panel, PanelGrid, PanelKind, TickSide};

use crate::canvas::Canvas;
use crate::color::colormap;
use crate::config::{Hist1dStyle, Hist2dStyle, VizConfig};
use crate::figure::{AxesHandle, AxesKind, Figure, PanelValues};
use crate::layout::axes::Axis;
use crate::layout::grid::CornerLayout;
use crate::layout::margins::{Margins, PlotArea};
use crate::plots::axes_draw::{TickPlacement, draw_axes};
use crate::plots::hist1d::{bin_weighted, count_axis, hist1d};
use crate::plots::hist2d::hist2d;

/// Axes decided for a visible panel before the canvas is sized.
struct PanelAxes {
    x: Axis,
    y: Axis,
}

fn build_axis(spec: &AxisSpec, auto: impl FnOnce() -> Axis, target_ticks: usize) -> Axis {
    let mut axis = match spec.limits {
        Some([lo, hi]) => Axis::bounded(lo, hi, target_ticks),
        None => auto(),
    };
    if let Some(label) = &spec.label {
        axis = axis.with_label(label.as_str());
    }
    if !spec.tick_labels {
        axis = axis.without_tick_labels();
    }
    axis
}

fn plan_axes(panel: &Panel, config: &VizConfig) -> Option<PanelAxes> {
    let target = config.corner.target_ticks;
    let counts = || match &panel.kind {
        PanelKind::Marginal1d { points, .. } => {
            count_axis(&bin_weighted(&points.positions, &points.weights, &points.edges), target)
        }
        _ => Axis::fixed(0.0, 1.0),
    };
    match panel.kind {
        PanelKind::Hidden => None,
        _ => Some(PanelAxes {
            x: build_axis(&panel.x_axis, || Axis::fixed(0.0, 1.0), target),
            y: build_axis(&panel.y_axis, counts, target),
        }),
    }
}

fn tick_labels_where(
    grid: &PanelGrid,
    plans: &[Vec<Option<PanelAxes>>],
    keep: impl Fn(&Panel) -> bool,
    pick: impl Fn(&PanelAxes) -> &Vec<String>,
) -> Vec<String> {
    grid.iter()
        .filter(|p| keep(p))
        .filter_map(|p| plans.get(p.row)?.get(p.col)?.as_ref())
        .flat_map(|a| pick(a).iter().cloned())
        .collect()
}

/// Draw a full corner plot for a prepared panel grid.
///
/// Axes and tick labels are decided first so margins fit the widest labels;
/// each panel's content is clipped to its box, then its frame and ticks are
/// drawn on top.
pub fn render_grid(
    grid: &PanelGrid,
    style_1d: &Hist1dStyle,
    style_2d: &Hist2dStyle,
    config: &VizConfig,
) -> crate::Result<Figure> {
    if grid.lower_count() > 0 && colormap(&style_2d.cmap).is_none() {
        return Err(crate::RenderError::UnknownColormap(style_2d.cmap.clone()));
    }

    let n = grid.panels.len();
    if n == 0 || grid.panels.iter().any(|row| row.len() != n) {
        return Err(crate::RenderError::Layout(format!("panel grid is not square ({n} rows)")));
    }
    let plans: Vec<Vec<Option<PanelAxes>>> = grid
        .panels
        .iter()
        .map(|row| row.iter().map(|p| plan_axes(p, config)).collect())
        .collect();

    let left = tick_labels_where(grid, &plans, |p| p.col == 0 && p.y_side == TickSide::Left, |a| {
        &a.y.tick_labels
    });
    let right = tick_labels_where(grid, &plans, |p| p.row == n - 1 && p.col == n - 1, |a| {
        &a.y.tick_labels
    });
    let bottom = tick_labels_where(grid, &plans, |p| p.row == n - 1, |a| &a.x.tick_labels);

    let probe = Canvas::new(0.0, 0.0);
    let margins = Margins::corner(&probe, &left, &right, &bottom, grid.labels.is_some(), config);
    let layout = CornerLayout::new(n, margins, config);
    let mut canvas =
        Canvas::new(layout.width, layout.height).with_background(config.figure.background);

    let mut axes = Vec::with_capacity(n);
    for (row_panels, row_plans) in grid.panels.iter().zip(plans) {
        let mut handles = Vec::with_capacity(n);
        for (panel, plan) in row_panels.iter().zip(row_plans) {
            let cell = layout.cell(panel.row, panel.col);
            let handle = match plan {
                None => AxesHandle {
                    row: panel.row,
                    col: panel.col,
                    kind: AxesKind::Hidden,
                    area: PlotArea::manual(cell.left, cell.top, 0.0, 0.0),
                    x_axis: None,
                    y_axis: None,
                    y_side: panel.y_side,
                    values: PanelValues::Empty,
                },
                Some(PanelAxes { x, y }) => {
                    let area = if panel.square { cell.square() } else { cell };
                    draw_panel(&mut canvas, panel, area, x, y, style_1d, style_2d, config)?
                }
            };
            handles.push(handle);
        }
        axes.push(handles);
    }

    tracing::debug!(
        ndim = n,
        width = layout.width,
        height = layout.height,
        elements = canvas.element_count(),
        "corner figure rendered"
    );
    Ok(Figure::new(canvas, axes))
}

#[allow(clippy::too_many_arguments)]
fn draw_panel(
    canvas: &mut Canvas,
    panel: &Panel,
    area: PlotArea,
    x: Axis,
    y: Axis,
    style_1d: &Hist1dStyle,
    style_2d: &Hist2dStyle,
    config: &VizConfig,
) -> crate::Result<AxesHandle> {
    canvas.begin_clip(area.left, area.top, area.width, area.height);
    let drawn = match &panel.kind {
        PanelKind::Marginal1d { dim, points } => Ok((
            AxesKind::Hist1d { dim: *dim },
            PanelValues::Heights(hist1d(canvas, &area, &x, &y, points, style_1d)),
        )),
        PanelKind::Marginal2d { x_dim, y_dim, points } => {
            hist2d(canvas, &area, &x, &y, points, style_2d).map(|g| {
                (AxesKind::Hist2d { x_dim: *x_dim, y_dim: *y_dim }, PanelValues::Grid(g))
            })
        }
        PanelKind::Hidden => Ok((AxesKind::Hidden, PanelValues::Empty)),
    };
    canvas.end_clip();
    let (kind, values) = drawn?;

    let x_rotation =
        if panel.x_axis.tick_rotation != 0.0 { config.corner.tick_rotation } else { 0.0 };
    draw_axes(canvas, &area, &x, &y, TickPlacement { y_side: panel.y_side, x_rotation }, config);

    Ok(AxesHandle {
        row: panel.row,
        col: panel.col,
        kind,
        area,
        x_axis: Some(x),
        y_axis: Some(y),
        y_side: panel.y_side,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use corner_core::BinnedHistogram;
    use corner_viz::corner_grid;
    use ndarray::arr2;

    fn grid(labels: Option<&[String]>) -> PanelGrid {
        let hist = BinnedHistogram::new(
            arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).into_dyn(),
            vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0, 3.0]],
        )
        .unwrap();
        corner_grid(&hist, labels).unwrap()
    }

    #[test]
    fn counts_axis_covers_tallest_bar() {
        let g = grid(None);
        let plan = plan_axes(g.get(1, 1).unwrap(), &VizConfig::default()).unwrap();
        assert_eq!(plan.y.min, 0.0);
        assert!(plan.y.max >= 9.0);
        assert_eq!((plan.x.min, plan.x.max), (0.0, 3.0));
        assert!(plan_axes(g.get(0, 1).unwrap(), &VizConfig::default()).is_none());
    }

    #[test]
    fn stripped_tick_labels_follow_grid() {
        let g = grid(None);
        let plan = plan_axes(g.get(0, 0).unwrap(), &VizConfig::default()).unwrap();
        assert!(plan.x.tick_labels.is_empty());
        assert!(!plan.x.tick_positions.is_empty());
        assert!(!plan.y.tick_labels.is_empty());
    }

    #[test]
    fn unknown_colormap_fails_before_drawing() {
        let style = Hist2dStyle { cmap: "rainbowish".into(), ..Default::default() };
        let err = render_grid(&grid(None), &Hist1dStyle::default(), &style, &VizConfig::default());
        assert!(matches!(err, Err(crate::RenderError::UnknownColormap(_))));
    }

    #[test]
    fn labels_widen_the_figure() {
        let config = VizConfig::default();
        let labels = vec!["a".to_string(), "b".to_string()];
        let s1 = Hist1dStyle::default();
        let s2 = Hist2dStyle::default();
        let bare = render_grid(&grid(None), &s1, &s2, &config).unwrap();
        let labeled = render_grid(&grid(Some(&labels)), &s1, &s2, &config).unwrap();
        assert!(labeled.width() > bare.width());
        assert!(labeled.height() > bare.height());
    }
}
