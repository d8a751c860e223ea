use std::fmt::Write as _;

use tracing::trace;

use crate::error::LensResult;
use crate::render::{
    Color, LineStrokeStyle, RenderFrame, Renderer, TextHAlign, TextPrimitive, TextVAlign,
};

/// Renders frames into standalone SVG documents.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// SVG text of the last rendered frame; empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> LensResult<()> {
        frame.validate()?;
        self.document = frame_to_svg(frame);
        trace!(bytes = self.document.len(), "rendered svg frame");
        Ok(())
    }
}

/// Serializes a frame without validating it.
#[must_use]
pub fn frame_to_svg(frame: &RenderFrame) -> String {
    let width = frame.viewport.width;
    let height = frame.viewport.height;
    let mut svg = String::with_capacity(1024 + 128 * (frame.lines.len() + frame.texts.len()));

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" role="img" aria-label="Forecast chart">"#
    );
    let _ = writeln!(svg, "  <title>{}</title>", escape_xml(&frame.title));

    for line in &frame.lines {
        let _ = write!(
            svg,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}"#,
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            css_rgb(line.color),
            line.stroke_width,
            opacity_attr("stroke-opacity", line.color),
        );
        if let LineStrokeStyle::Dashed { dash_px, gap_px } = line.stroke_style {
            let _ = write!(svg, r#" stroke-dasharray="{dash_px} {gap_px}""#);
        }
        svg.push_str(" />\n");
    }

    for text in &frame.texts {
        write_text(&mut svg, text);
    }

    for path in &frame.paths {
        let _ = writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}"{} />"#,
            path.data,
            css_rgb(path.color),
            path.stroke_width,
            opacity_attr("stroke-opacity", path.color),
        );
    }

    for circle in &frame.circles {
        let _ = writeln!(
            svg,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}" />"#,
            circle.cx,
            circle.cy,
            circle.radius,
            css_rgb(circle.fill),
            css_rgb(circle.stroke),
            circle.stroke_width,
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_text(svg: &mut String, text: &TextPrimitive) {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let dy = match text.v_align {
        TextVAlign::Baseline => "",
        TextVAlign::Middle => r#" dy="0.3em""#,
    };
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="{}"{dy} text-anchor="{anchor}" font-size="{}" fill="{}"{}>{}</text>"#,
        text.x,
        text.y,
        text.font_size_px,
        css_rgb(text.color),
        opacity_attr("fill-opacity", text.color),
        escape_xml(&text.text),
    );
}

fn css_rgb(color: Color) -> String {
    let (red, green, blue) = color.to_rgb8();
    format!("#{red:02x}{green:02x}{blue:02x}")
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.alpha >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, color.alpha)
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
