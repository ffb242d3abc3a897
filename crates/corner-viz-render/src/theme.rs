use crate::color::Color;
use crate::config::*;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    Classic,
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "minimal" => Self::Minimal,
            _ => Self::Classic,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::Classic => classic(),
            Self::Minimal => minimal(),
        }
    }
}

/// Black filled bars over an inferno heatmap, 4in panels, outward ticks.
fn classic() -> VizConfig {
    VizConfig {
        theme: "classic".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        corner: CornerConfig::default(),
        hist1d: Hist1dStyle::default(),
        hist2d: Hist2dStyle::default(),
        output: OutputConfig::default(),
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        font: FontConfig { size: 8.0, label_size: 9.0, tick_size: 7.0 },
        axes: AxesConfig {
            tick_direction: "in".into(),
            tick_length: 2.5,
            minor_tick_length: 1.5,
            minor_ticks: false,
            frame_width: 0.6,
        },
        corner: CornerConfig { panel_size: 144.0, outer_pad: 4.0, ..CornerConfig::default() },
        hist1d: Hist1dStyle {
            color: Color::hex("#334155"),
            histtype: HistType::Step,
            ..Hist1dStyle::default()
        },
        hist2d: Hist2dStyle { cmap: "greys".into(), ..Hist2dStyle::default() },
        ..classic()
    }
}
