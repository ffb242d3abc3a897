use crate::primitives::Font;

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// Advance width of one character, in ems, for a generic sans-serif face.
fn advance_em(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | ' ' => 0.36,
        'm' | 'w' | 'M' | 'W' => 0.86,
        '0'..='9' => 0.56,
        '-' | '\u{2212}' => 0.58,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii() => 0.52,
        _ => 0.62,
    }
}

/// Estimated extent of `text` set in `font`, in points.
///
/// Fonts are not embedded, so widths come from a per-character advance
/// table; layout only needs them to size margins.
pub fn measure(text: &str, font: &Font) -> TextMetrics {
    let ems: f64 = text.chars().map(advance_em).sum();
    TextMetrics { width: ems * font.size, height: 1.2 * font.size }
}
