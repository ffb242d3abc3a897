use crate::color::Color;

/// Stroke pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
}

impl Dash {
    pub(crate) fn dasharray(self) -> Option<&'static str> {
        match self {
            Dash::Solid => None,
            Dash::Dashed => Some("3 3"),
        }
    }
}

/// Outline of lines, polylines and shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dash: Dash,
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Color::rgb(0, 0, 0), 1.0)
    }
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width, dash: Dash::Solid }
    }

    pub fn dashed(mut self) -> Self {
        self.dash = Dash::Dashed;
        self
    }
}

/// How a rectangle is painted: optional fill, optional outline, overall opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub outline: Option<Stroke>,
    pub opacity: f64,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self { fill: Some(color), outline: None, opacity: 1.0 }
    }

    pub fn outline(stroke: Stroke) -> Self {
        Self { fill: None, outline: Some(stroke), opacity: 1.0 }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Horizontal placement of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical placement of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Baseline,
    Middle,
    Top,
}

impl HAlign {
    pub(crate) fn svg(self) -> &'static str {
        match self {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        }
    }
}

impl VAlign {
    pub(crate) fn svg(self) -> &'static str {
        match self {
            VAlign::Baseline => "auto",
            VAlign::Middle => "central",
            VAlign::Top => "hanging",
        }
    }
}

/// Font size, colour and alignment of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub color: Color,
    pub halign: HAlign,
    pub valign: VAlign,
}

impl Font {
    /// Black text of `size` points, left-aligned on the baseline.
    pub fn new(size: f64) -> Self {
        Self { size, color: Color::rgb(0, 0, 0), halign: HAlign::Left, valign: VAlign::Baseline }
    }

    pub fn aligned(mut self, halign: HAlign, valign: VAlign) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }
}
