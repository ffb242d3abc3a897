use std::fmt::Write as _;

use crate::color::Color;
use crate::primitives::{Font, Paint, Stroke};
use crate::text::{TextMetrics, measure};

/// A drawn item, kept until the document is serialized.
#[derive(Debug, Clone)]
enum Node {
    Rect { x: f64, y: f64, w: f64, h: f64, paint: Paint },
    Line { from: (f64, f64), to: (f64, f64), stroke: Stroke },
    Polyline { points: Vec<(f64, f64)>, stroke: Stroke },
    Text { at: (f64, f64), content: String, font: Font, angle: Option<f64> },
    Clipped { clip: usize, children: Vec<Node> },
}

/// SVG drawing surface in points (1pt = 1/72").
///
/// Drawing between [`Canvas::begin_clip`] and [`Canvas::end_clip`] lands in
/// a group clipped to the given rectangle.
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    background: Color,
    nodes: Vec<Node>,
    clip_rects: Vec<[f64; 4]>,
    open_clips: Vec<(usize, Vec<Node>)>,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: Color::rgb(255, 255, 255),
            nodes: Vec::new(),
            clip_rects: Vec::new(),
            open_clips: Vec::new(),
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Top-level items drawn so far; an open clip group is not counted yet.
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        self.add(Node::Rect { x, y, w, h, paint: *paint });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        self.add(Node::Line { from: (x1, y1), to: (x2, y2), stroke: *stroke });
    }

    /// Open path through `points`; fewer than two points draw nothing.
    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        if points.len() >= 2 {
            self.add(Node::Polyline { points: points.to_vec(), stroke: *stroke });
        }
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, font: &Font) {
        self.add(Node::Text { at: (x, y), content: content.into(), font: *font, angle: None });
    }

    /// Text turned `angle` degrees clockwise about its anchor point.
    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, font: &Font, angle: f64) {
        self.add(Node::Text { at: (x, y), content: content.into(), font: *font, angle: Some(angle) });
    }

    /// Unfilled rectangle outline.
    pub fn frame(&mut self, x: f64, y: f64, w: f64, h: f64, stroke: &Stroke) {
        self.rect(x, y, w, h, &Paint::outline(*stroke));
    }

    /// Start collecting drawing into a group clipped to the rectangle.
    pub fn begin_clip(&mut self, x: f64, y: f64, w: f64, h: f64) -> usize {
        let id = self.clip_rects.len();
        self.clip_rects.push([x, y, w, h]);
        self.open_clips.push((id, Vec::new()));
        id
    }

    /// Close the innermost clip group; an empty group is discarded.
    pub fn end_clip(&mut self) {
        if let Some((clip, children)) = self.open_clips.pop() {
            if !children.is_empty() {
                self.add(Node::Clipped { clip, children });
            }
        }
    }

    pub fn measure_text(&self, content: &str, font: &Font) -> TextMetrics {
        measure(content, font)
    }

    fn add(&mut self, node: Node) {
        match self.open_clips.last_mut() {
            Some((_, children)) => children.push(node),
            None => self.nodes.push(node),
        }
    }

    /// Serialize the SVG document; groups still open are appended at the end.
    pub fn finish_svg(&self) -> String {
        let mut out = String::with_capacity(64 * self.nodes.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );

        if !self.clip_rects.is_empty() {
            out.push_str("<defs>\n");
            for (id, [x, y, w, h]) in self.clip_rects.iter().enumerate() {
                let _ = writeln!(
                    out,
                    r#"<clipPath id="clip{id}"><rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" /></clipPath>"#
                );
            }
            out.push_str("</defs>\n");
        }

        let _ = writeln!(
            out,
            r#"<rect width="{}" height="{}" fill="{}" />"#,
            self.width,
            self.height,
            self.background.to_svg_fill()
        );
        for node in &self.nodes {
            node.write_svg(&mut out);
        }
        for (clip, children) in &self.open_clips {
            write_group(&mut out, *clip, children);
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Node {
    fn write_svg(&self, out: &mut String) {
        match self {
            Node::Rect { x, y, w, h, paint } => {
                let _ = write!(out, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#);
                match paint.fill {
                    Some(fill) => attr(out, "fill", fill.to_svg_fill()),
                    None => attr(out, "fill", "none"),
                }
                if let Some(stroke) = &paint.outline {
                    stroke_attrs(out, stroke);
                }
                if (paint.opacity - 1.0).abs() > 1e-4 {
                    attr(out, "opacity", format_args!("{:.3}", paint.opacity));
                }
                out.push_str(" />\n");
            }
            Node::Line { from: (x1, y1), to: (x2, y2), stroke } => {
                let _ = write!(out, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#);
                stroke_attrs(out, stroke);
                out.push_str(" />\n");
            }
            Node::Polyline { points, stroke } => {
                let coords: Vec<String> =
                    points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect();
                let _ = write!(out, r#"<polyline points="{}" fill="none""#, coords.join(" "));
                stroke_attrs(out, stroke);
                out.push_str(" />\n");
            }
            Node::Text { at: (x, y), content, font, angle } => {
                let _ = write!(out, r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif""#);
                attr(out, "font-size", format_args!("{:.1}", font.size));
                attr(out, "fill", font.color.to_svg_fill());
                attr(out, "text-anchor", font.halign.svg());
                attr(out, "dominant-baseline", font.valign.svg());
                if let Some(angle) = angle {
                    attr(out, "transform", format_args!("rotate({angle:.1},{x:.2},{y:.2})"));
                }
                out.push('>');
                escape_into(out, content);
                out.push_str("</text>\n");
            }
            Node::Clipped { clip, children } => write_group(out, *clip, children),
        }
    }
}

fn write_group(out: &mut String, clip: usize, children: &[Node]) {
    let _ = writeln!(out, r#"<g clip-path="url(#clip{clip})">"#);
    for child in children {
        child.write_svg(out);
    }
    out.push_str("</g>\n");
}

fn attr(out: &mut String, name: &str, value: impl std::fmt::Display) {
    let _ = write!(out, r#" {name}="{value}""#);
}

fn stroke_attrs(out: &mut String, stroke: &Stroke) {
    attr(out, "stroke", stroke.color.to_svg_fill());
    attr(out, "stroke-width", format_args!("{:.2}", stroke.width));
    if let Some(dash) = stroke.dash.dasharray() {
        attr(out, "stroke-dasharray", dash);
    }
}

fn escape_into(out: &mut String, content: &str) {
    for ch in content.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_canvas() {
        let svg = Canvas::new(100.0, 50.0).finish_svg();
        assert!(svg.contains("width=\"100\""));
        assert!(svg.contains("height=\"50\""));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(!svg.contains("<defs>"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn painted_rect() {
        let mut c = Canvas::new(200.0, 100.0);
        c.rect(10.0, 20.0, 50.0, 30.0, &Paint::solid(Color::hex("#ff0000")).with_opacity(0.5));
        let svg = c.finish_svg();
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains("width=\"50.00\""));
        assert!(svg.contains(r#"opacity="0.500""#));
    }

    #[test]
    fn frame_is_unfilled_outline() {
        let mut c = Canvas::new(20.0, 20.0);
        c.frame(1.0, 1.0, 10.0, 10.0, &Stroke::new(Color::rgb(0, 0, 0), 0.8).dashed());
        let svg = c.finish_svg();
        assert!(svg.contains(r##"fill="none" stroke="#000000" stroke-width="0.80""##));
        assert!(svg.contains(r#"stroke-dasharray="3 3""#));
    }

    #[test]
    fn text_is_escaped_and_rotated() {
        let mut c = Canvas::new(200.0, 100.0);
        c.text_rotated(10.0, 20.0, "a<b & c", &Font::new(10.0), -60.0);
        let svg = c.finish_svg();
        assert!(svg.contains("a&lt;b &amp; c"));
        assert!(svg.contains("rotate(-60.0,10.00,20.00)"));
    }

    #[test]
    fn clipped_drawing_is_grouped() {
        let mut c = Canvas::new(200.0, 100.0);
        let id = c.begin_clip(0.0, 0.0, 50.0, 50.0);
        c.rect(0.0, 0.0, 80.0, 80.0, &Paint::solid(Color::rgb(0, 0, 0)));
        assert_eq!(c.element_count(), 0);
        c.end_clip();
        assert_eq!(c.element_count(), 1);
        let svg = c.finish_svg();
        assert!(svg.contains(&format!(r#"<clipPath id="clip{id}">"#)));
        assert!(svg.contains(&format!(r#"<g clip-path="url(#clip{id})">"#)));
    }

    #[test]
    fn empty_clip_emits_no_group() {
        let mut c = Canvas::new(10.0, 10.0);
        c.begin_clip(0.0, 0.0, 5.0, 5.0);
        c.end_clip();
        assert!(!c.finish_svg().contains("<g "));
    }

    #[test]
    fn short_polyline_is_skipped() {
        let mut c = Canvas::new(10.0, 10.0);
        c.polyline(&[(1.0, 1.0)], &Stroke::default());
        assert_eq!(c.element_count(), 0);
        c.polyline(&[(1.0, 1.0), (2.0, 3.0)], &Stroke::default());
        assert!(c.finish_svg().contains(r#"points="1.00,1.00 2.00,3.00""#));
    }
}
