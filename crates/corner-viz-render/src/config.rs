use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::theme::BuiltinTheme;

/// Top-level visualization configuration (YAML or programmatic).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub corner: CornerConfig,
    pub hist1d: Hist1dStyle,
    pub hist2d: Hist2dStyle,
    pub output: OutputConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        BuiltinTheme::Classic.base_config()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub background: Color,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self { background: Color::rgb(255, 255, 255) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10.0, label_size: 12.0, tick_size: 10.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub tick_direction: String,
    pub tick_length: f64,
    pub minor_tick_length: f64,
    pub minor_ticks: bool,
    pub frame_width: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            tick_direction: "out".into(),
            tick_length: 3.5,
            minor_tick_length: 2.0,
            minor_ticks: false,
            frame_width: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: false, color: Color::hex("#b0b0b0"), alpha: 0.6 }
    }
}

/// Corner-grid geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerConfig {
    /// Side of one square panel, in points (288pt = 4in).
    pub panel_size: f64,
    /// Vertical padding between panels, added to the tight-layout default (font-size units).
    pub h_pad: f64,
    /// Horizontal padding between panels, added to the tight-layout default (font-size units).
    pub w_pad: f64,
    /// Padding around the whole grid, in points.
    pub outer_pad: f64,
    /// Rotation of bottom-row x tick labels, in degrees.
    pub tick_rotation: f64,
    /// Target number of major ticks per axis.
    pub target_ticks: usize,
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self {
            panel_size: 288.0,
            h_pad: -1.0,
            w_pad: -3.0,
            outer_pad: 8.0,
            tick_rotation: 60.0,
            target_ticks: 5,
        }
    }
}

/// How 1D bars are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistType {
    /// Filled bars.
    Bar,
    /// Unfilled outline.
    Step,
}

/// Style forwarded to the 1D histogram primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hist1dStyle {
    pub color: Color,
    pub histtype: HistType,
    pub line_width: f64,
    pub alpha: f64,
}

impl Default for Hist1dStyle {
    fn default() -> Self {
        Self { color: Color::rgb(0, 0, 0), histtype: HistType::Bar, line_width: 1.0, alpha: 1.0 }
    }
}

/// Colour normalization of 2D cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    /// Linear between the smallest and largest cell.
    Linear,
    /// Logarithmic; empty cells are left unpainted.
    Log,
}

/// Style forwarded to the 2D histogram primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hist2dStyle {
    pub cmap: String,
    pub norm: Norm,
    pub alpha: f64,
}

impl Default for Hist2dStyle {
    fn default() -> Self {
        Self { cmap: "inferno".into(), norm: Norm::Linear, alpha: 1.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dpi: 200 }
    }
}

/// Resolve a VizConfig from optional YAML string.
///
/// The YAML may name a `theme`; keys it sets override that theme's base
/// values, everything else keeps the theme's defaults.
pub fn resolve_config(user_yaml: Option<&str>) -> crate::Result<VizConfig> {
    resolve_config_with_theme(user_yaml, None)
}

/// Like [`resolve_config`], with `theme` taking precedence over the YAML's `theme` key.
pub fn resolve_config_with_theme(
    user_yaml: Option<&str>,
    theme: Option<&str>,
) -> crate::Result<VizConfig> {
    let config_err = |e: serde_yaml_ng::Error| crate::RenderError::Config(e.to_string());

    let mut value: serde_yaml_ng::Value = match user_yaml {
        Some(yaml) => serde_yaml_ng::from_str(yaml).map_err(config_err)?,
        None => serde_yaml_ng::Value::Null,
    };
    if value.is_null() {
        value = serde_yaml_ng::Value::Mapping(Default::default());
    }
    if let (Some(theme), serde_yaml_ng::Value::Mapping(map)) = (theme, &mut value) {
        map.insert("theme".into(), theme.into());
    }

    let theme = value.get("theme").and_then(|t| t.as_str()).map(BuiltinTheme::parse);
    let base = theme.unwrap_or(BuiltinTheme::Classic).base_config();
    let mut merged = serde_yaml_ng::to_value(&base).map_err(config_err)?;
    merge_yaml(&mut merged, value);

    serde_yaml_ng::from_value(merged).map_err(config_err)
}

/// Recursive mapping merge: scalars and sequences in `overlay` replace `base`.
fn merge_yaml(base: &mut serde_yaml_ng::Value, overlay: serde_yaml_ng::Value) {
    use serde_yaml_ng::Value;
    match (base, overlay) {
        (Value::Mapping(b), Value::Mapping(o)) => {
            for (k, v) in o {
                match b.get_mut(&k) {
                    Some(slot) => merge_yaml(slot, v),
                    None => {
                        b.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_classic_theme() {
        let c = resolve_config(None).unwrap();
        assert_eq!(c.theme, "classic");
        assert_eq!(c.corner.panel_size, 288.0);
        assert_eq!(c.corner.tick_rotation, 60.0);
        assert_eq!(c.hist1d.color, Color::rgb(0, 0, 0));
        assert_eq!(c.hist2d.cmap, "inferno");
    }

    #[test]
    fn yaml_overrides_single_keys() {
        let c = resolve_config(Some(
            "hist1d:\n  color: r\nhist2d:\n  cmap: jet\n  norm: log\ncorner:\n  panel_size: 144\n",
        ))
        .unwrap();
        assert_eq!(c.hist1d.color, Color::rgb(255, 0, 0));
        assert_eq!(c.hist1d.histtype, HistType::Bar);
        assert_eq!(c.hist2d.cmap, "jet");
        assert_eq!(c.hist2d.norm, Norm::Log);
        assert_eq!(c.corner.panel_size, 144.0);
        assert_eq!(c.corner.h_pad, -1.0);
    }

    #[test]
    fn yaml_theme_sets_base() {
        let c = resolve_config(Some("theme: minimal\nfont:\n  size: 8\n")).unwrap();
        assert_eq!(c.theme, "minimal");
        assert_eq!(c.font.size, 8.0);
        assert_eq!(c.corner.panel_size, BuiltinTheme::Minimal.base_config().corner.panel_size);
    }

    #[test]
    fn empty_yaml_is_default() {
        let c = resolve_config(Some("")).unwrap();
        assert_eq!(c.theme, "classic");
    }

    #[test]
    fn explicit_theme_wins_over_yaml() {
        let c = resolve_config_with_theme(Some("theme: classic\nfont:\n  size: 7\n"), Some("minimal"))
            .unwrap();
        assert_eq!(c.theme, "minimal");
        assert_eq!(c.font.size, 7.0);
        assert_eq!(c.hist1d.histtype, HistType::Step);

        let c = resolve_config_with_theme(None, Some("minimal")).unwrap();
        assert_eq!(c.corner.panel_size, 144.0);
    }

    #[test]
    fn bad_yaml_is_config_error() {
        let err = resolve_config(Some("hist1d:\n  color: not-a-colour\n")).unwrap_err();
        assert!(matches!(err, crate::RenderError::Config(_)));
    }
}
