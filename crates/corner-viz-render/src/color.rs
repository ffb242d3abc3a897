use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb` (leading `#` optional). Malformed channels read as 0.
    pub fn hex(s: &str) -> Self {
        let s = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| s.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
        Self::rgb(channel(0).unwrap_or(0), channel(2).unwrap_or(0), channel(4).unwrap_or(0))
    }

    /// Parse a hex string or a plotting colour name (`"k"`, `"red"`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            let digits = &s[1..];
            return (digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
                .then(|| Self::hex(s));
        }
        named(&s.to_lowercase())
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    pub fn to_svg_fill(&self) -> String {
        if (self.a - 1.0).abs() < 1e-6 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear interpolation between two colors (for colormaps).
    pub fn lerp(a: Color, b: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (x as f64 * (1.0 - t) + y as f64 * t).round() as u8;
        Color { r: mix(a.r, b.r), g: mix(a.g, b.g), b: mix(a.b, b.b), a: a.a * (1.0 - t) + b.a * t }
    }
}

fn named(name: &str) -> Option<Color> {
    let c = match name {
        "k" | "black" => Color::rgb(0, 0, 0),
        "w" | "white" => Color::rgb(255, 255, 255),
        "r" | "red" => Color::rgb(255, 0, 0),
        "g" | "green" => Color::rgb(0, 128, 0),
        "b" | "blue" => Color::rgb(0, 0, 255),
        "c" | "cyan" => Color::rgb(0, 191, 191),
        "m" | "magenta" => Color::rgb(191, 0, 191),
        "y" | "yellow" => Color::rgb(191, 191, 0),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "orange" => Color::rgb(255, 165, 0),
        "navy" => Color::rgb(0, 0, 128),
        _ => return None,
    };
    Some(c)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_fill())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown color: {s}")))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

// --- Sequential colormaps for 2D marginals ---

/// Evenly spaced colour stops sampled by linear interpolation.
#[derive(Debug, Clone)]
pub struct Colormap {
    pub name: &'static str,
    stops: Vec<Color>,
}

impl Colormap {
    fn from_hex(name: &'static str, stops: &[&str]) -> Self {
        Self { name, stops: stops.iter().map(|s| Color::hex(s)).collect() }
    }

    /// Colour at `t` in `[0, 1]` (clamped).
    pub fn sample(&self, t: f64) -> Color {
        match self.stops.len() {
            0 => Color::default(),
            1 => self.stops[0],
            n => {
                let pos = t.clamp(0.0, 1.0) * (n - 1) as f64;
                let i = (pos.floor() as usize).min(n - 2);
                Color::lerp(self.stops[i], self.stops[i + 1], pos - i as f64)
            }
        }
    }
}

pub const COLORMAP_NAMES: &[&str] =
    &["inferno", "viridis", "plasma", "magma", "jet", "greys", "coolwarm"];

/// Look up a built-in colormap by name (case-insensitive, `_r` reverses).
pub fn colormap(name: &str) -> Option<Colormap> {
    let lower = name.to_lowercase();
    let (base, reversed) = match lower.strip_suffix("_r") {
        Some(b) => (b, true),
        None => (lower.as_str(), false),
    };
    let mut cmap = match base {
        "inferno" => Colormap::from_hex(
            "inferno",
            &[
                "#000004", "#220c43", "#57106d", "#8c2981", "#bb3754", "#e06419", "#f98e09",
                "#fcc53f", "#fcffa4",
            ],
        ),
        "viridis" => Colormap::from_hex(
            "viridis",
            &[
                "#440154", "#482475", "#414487", "#355f8d", "#2a788e", "#21918c", "#22a884",
                "#44bf70", "#7ad151", "#bddf26", "#fde725",
            ],
        ),
        "plasma" => Colormap::from_hex(
            "plasma",
            &[
                "#0d0887", "#4b03a1", "#7e03a8", "#aa2395", "#cc4778", "#e56b5d", "#f89441",
                "#fdc328", "#f0f921",
            ],
        ),
        "magma" => Colormap::from_hex(
            "magma",
            &[
                "#000004", "#1d0b3b", "#451077", "#76187e", "#a92d82", "#d6486f", "#f4795f",
                "#febc82", "#fcfdbf",
            ],
        ),
        "jet" => Colormap::from_hex(
            "jet",
            &["#00007f", "#0000ff", "#007fff", "#00ffff", "#7fff7f", "#ffff00", "#ff7f00", "#ff0000", "#7f0000"],
        ),
        "greys" => Colormap::from_hex("greys", &["#ffffff", "#bdbdbd", "#737373", "#000000"]),
        "coolwarm" => Colormap::from_hex(
            "coolwarm",
            &["#3b4cc0", "#8db0fe", "#dddddd", "#f49a7b", "#b40426"],
        ),
        _ => return None,
    };
    if reversed {
        cmap.stops.reverse();
    }
    Some(cmap)
}
