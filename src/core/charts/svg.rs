//! Minimal SVG document builder
//!
//! Coordinates are in points (1/72 inch) with the origin at the top left.

use std::fmt::Write;

/// Text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Text starts at the anchor
    #[default]
    Start,
    /// Text is centered on the anchor
    Middle,
    /// Text ends at the anchor
    End,
}

impl TextAnchor {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Font settings for a text element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f64,
    /// Horizontal alignment
    pub anchor: TextAnchor,
    /// Fill color
    pub color: &'static str,
}

impl TextStyle {
    /// Regular dark gray text of the given size
    #[must_use]
    pub const fn new(size: f64) -> Self {
        Self {
            size,
            anchor: TextAnchor::Start,
            color: "#333333",
        }
    }

    /// Set the fill color
    #[must_use]
    pub const fn color(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }

    /// Set the alignment
    #[must_use]
    pub const fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// SVG element types
#[derive(Debug, Clone, PartialEq)]
pub enum SvgElement {
    /// Filled rectangle
    Rect {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width
        width: f64,
        /// Height
        height: f64,
        /// Fill color
        fill: String,
    },
    /// Filled circle with an outline
    Circle {
        /// Center x
        cx: f64,
        /// Center y
        cy: f64,
        /// Radius
        r: f64,
        /// Fill color
        fill: String,
        /// Outline color
        stroke: String,
        /// Outline width
        stroke_width: f64,
    },
    /// Straight line
    Line {
        /// Start x
        x1: f64,
        /// Start y
        y1: f64,
        /// End x
        x2: f64,
        /// End y
        y2: f64,
        /// Stroke color
        stroke: String,
        /// Stroke width
        width: f64,
        /// Stroke opacity
        opacity: f64,
        /// Dash pattern, solid when `None`
        dash: Option<String>,
    },
    /// Single line of text
    Text {
        /// Anchor x
        x: f64,
        /// Baseline y
        y: f64,
        /// Content, unescaped
        content: String,
        /// Font settings
        style: TextStyle,
    },
}

impl SvgElement {
    /// Render to an SVG fragment
    #[must_use]
    pub fn to_svg(&self) -> String {
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\"/>",
                num(*x),
                num(*y),
                num(*width),
                num(*height)
            ),
            Self::Circle {
                cx,
                cy,
                r,
                fill,
                stroke,
                stroke_width,
            } => format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{}\"/>",
                num(*cx),
                num(*cy),
                num(*r),
                num(*stroke_width)
            ),
            Self::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                width,
                opacity,
                dash,
            } => {
                let dash = dash
                    .as_ref()
                    .map_or_else(String::new, |d| format!(" stroke-dasharray=\"{d}\""));
                format!(
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{stroke}\" stroke-width=\"{}\" stroke-opacity=\"{}\"{dash}/>",
                    num(*x1),
                    num(*y1),
                    num(*x2),
                    num(*y2),
                    num(*width),
                    num(*opacity)
                )
            }
            Self::Text {
                x,
                y,
                content,
                style,
            } => format!(
                "<text x=\"{}\" y=\"{}\" font-family=\"STIXGeneral, DejaVu Serif, Times New Roman, serif\" font-size=\"{}\" text-anchor=\"{}\" fill=\"{}\">{}</text>",
                num(*x),
                num(*y),
                num(style.size),
                style.anchor.as_str(),
                style.color,
                escape(content)
            ),
        }
    }
}

/// SVG document builder
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    elements: Vec<SvgElement>,
}

impl SvgDocument {
    /// Empty document of the given size in points
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Document width in points
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Document height in points
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Elements in paint order
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Add any element
    pub fn push(&mut self, element: SvgElement) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// Add a filled rectangle
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) -> &mut Self {
        self.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill: fill.to_string(),
        })
    }

    /// Add a filled circle with an outline
    pub fn outlined_circle(
        &mut self,
        (cx, cy): (f64, f64),
        r: f64,
        fill: &str,
        stroke: &str,
        stroke_width: f64,
    ) -> &mut Self {
        self.push(SvgElement::Circle {
            cx,
            cy,
            r,
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            stroke_width,
        })
    }

    /// Add a solid line
    pub fn line(
        &mut self,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
        stroke: &str,
        width: f64,
        opacity: f64,
    ) -> &mut Self {
        self.push(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: stroke.to_string(),
            width,
            opacity,
            dash: None,
        })
    }

    /// Add a dashed line
    pub fn dashed_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        stroke: &str,
        width: f64,
        opacity: f64,
    ) -> &mut Self {
        self.line(from, to, stroke, width, opacity);
        if let Some(SvgElement::Line { dash, width, .. }) = self.elements.last_mut() {
            *dash = Some(format!("{} {}", num(*width * 3.7), num(*width * 1.6)));
        }
        self
    }

    /// Add a line of text
    pub fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) -> &mut Self {
        self.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            style,
        })
    }

    /// Serialize the document
    #[must_use]
    pub fn build(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = num(self.width),
            h = num(self.height)
        );
        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element.to_svg());
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// Escape text for use in element content and attribute values
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Format a coordinate with at most two decimals
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{rounded}")
}

/// Rough rendered width of `text` in points
///
/// Uses an average glyph width of 0.55 em, close enough for laying out axis
/// labels without measuring the font.
#[must_use]
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.55
}
