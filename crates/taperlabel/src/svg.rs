//! SVG export for printable labels.
//!
//! The outline is emitted as a single `<path>` in millimetres. Labels for
//! objects that are wider at the top are mirrored with a transform so the
//! narrow edge always renders on the same side as the narrow end of the
//! object. Optional dimension text is placed in the top-left corner.

use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use taperlabel_kernel::{OutlineResult, OutlineSegment};
use taperlabel_math::{Point2, Transform2};

use crate::Label;

/// Presentation attributes for SVG output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgStyle {
    /// Fill colour of the label.
    pub fill: String,
    /// Stroke colour of the outline.
    pub stroke: String,
    /// Stroke width in mm.
    pub stroke_width: f64,
    /// Blank border around the outline in mm.
    pub margin: f64,
    /// Decimal places for path coordinates.
    pub precision: usize,
    /// Add dimension text to the label.
    pub annotate: bool,
    /// Font family for dimension text.
    pub font_family: String,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            fill: "#C4E9FB".into(),
            stroke: "#000000".into(),
            stroke_width: 0.15,
            margin: 0.5,
            precision: 3,
            annotate: true,
            font_family: "Arial, sans-serif".into(),
        }
    }
}

/// A line of annotation text.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgText {
    /// Baseline position.
    pub position: Point2,
    /// Font size in mm.
    pub font_size: f64,
    /// Text content (unescaped).
    pub content: String,
}

/// A rendered-on-demand SVG document for one label.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    title: String,
    width: f64,
    height: f64,
    path_data: String,
    transform: Option<Transform2>,
    texts: Vec<SvgText>,
    style: SvgStyle,
}

impl SvgDocument {
    /// Lay out the SVG document for `label`.
    pub fn new(label: &Label, style: &SvgStyle) -> Self {
        let outline = label.outline();
        let (width, height) = outline.bounds();
        let transform = outline
            .is_flipped()
            .then(|| Transform2::mirror_vertical(height));
        let texts = if style.annotate {
            dimension_text(label)
        } else {
            Vec::new()
        };

        Self {
            title: label.title(),
            width,
            height,
            path_data: path_data(outline, style.precision),
            transform,
            texts,
            style: style.clone(),
        }
    }

    /// The `d` attribute of the outline path.
    pub fn path_data(&self) -> &str {
        &self.path_data
    }

    /// Transform applied to the outline path, if mirrored.
    pub fn transform(&self) -> Option<&Transform2> {
        self.transform.as_ref()
    }

    /// Annotation lines.
    pub fn texts(&self) -> &[SvgText] {
        &self.texts
    }

    /// Document size `(width, height)` in mm, margins included.
    pub fn size(&self) -> (f64, f64) {
        let m = self.style.margin;
        (self.width + 2.0 * m, self.height + 2.0 * m)
    }

    /// Write the document to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write!(writer, "{}", self)?;
        writer.flush()
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = &self.style;
        let m = style.margin;
        let (doc_width, doc_height) = self.size();

        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}mm" height="{}mm" viewBox="{} {} {} {}">"#,
            doc_width, doc_height, -m, -m, doc_width, doc_height
        )?;
        writeln!(f, r#"  <g id="tapered-label">"#)?;
        writeln!(f, "    <title>{}</title>", escape(&self.title))?;

        write!(
            f,
            r#"    <path d="{}" fill="{}" stroke="{}" stroke-width="{}" stroke-linecap="round""#,
            self.path_data,
            escape(&style.fill),
            escape(&style.stroke),
            style.stroke_width
        )?;
        if let Some(t) = &self.transform {
            let [a, b, c, d, e, g] = t.affine_coefficients();
            write!(f, r#" transform="matrix({} {} {} {} {} {})""#, a, b, c, d, e, g)?;
        }
        writeln!(f, " />")?;

        if !self.texts.is_empty() {
            writeln!(f, r#"    <g id="dimensions">"#)?;
            for text in &self.texts {
                writeln!(
                    f,
                    r#"      <text x="{:.3}" y="{:.3}" font-family="{}" font-size="{:.3}" font-weight="bold" fill="black">{}</text>"#,
                    text.position.x,
                    text.position.y,
                    escape(&style.font_family),
                    text.font_size,
                    escape(&text.content)
                )?;
            }
            writeln!(f, "    </g>")?;
        }

        writeln!(f, "  </g>")?;
        writeln!(f, "</svg>")
    }
}

/// SVG path data for an outline, in outline coordinates.
///
/// Sector arcs become elliptical-arc commands with equal radii; the
/// large-arc and sweep flags come straight from the outline segments.
pub fn path_data(outline: &OutlineResult, precision: usize) -> String {
    let mut d = String::new();
    for (i, segment) in outline.segments().iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = match segment {
            OutlineSegment::MoveTo { to } => write!(d, "M {}", coord(to, precision)),
            OutlineSegment::LineTo { to } => write!(d, "L {}", coord(to, precision)),
            OutlineSegment::ArcTo {
                to,
                radius,
                large_arc,
                positive_sweep,
                ..
            } => {
                let r = number(*radius, precision);
                write!(
                    d,
                    "A {},{} 0 {},{} {}",
                    r,
                    r,
                    u8::from(*large_arc),
                    u8::from(*positive_sweep),
                    coord(to, precision)
                )
            }
            OutlineSegment::Close => write!(d, "Z"),
        };
    }
    d
}

fn coord(p: &Point2, precision: usize) -> String {
    format!("{},{}", number(p.x, precision), number(p.y, precision))
}

/// Fixed-point formatting without a `-0.000`.
fn number(value: f64, precision: usize) -> String {
    let half_unit = 0.5 * 10f64.powi(-(precision as i32));
    let value = if value.abs() < half_unit { 0.0 } else { value };
    format!("{:.*}", precision, value)
}

fn dimension_text(label: &Label) -> Vec<SvgText> {
    let spec = label.spec();
    let (width, height) = label.bounds();
    let extent = width.max(height);
    let margin = extent * 0.02;
    let font_size = extent * 0.03;
    let line_height = font_size * 1.2;

    let size_line = format!("Taper Label: {} x {}mm", spec.height, spec.width);
    let diameter_line = if label.is_cylindrical() {
        format!("Diameter: {}mm (cylindrical)", spec.top_diameter)
    } else {
        format!(
            "Diameters: {}mm - {}mm",
            spec.top_diameter, spec.bottom_diameter
        )
    };

    vec![
        SvgText {
            position: Point2::new(margin, margin + font_size),
            font_size,
            content: size_line,
        },
        SvgText {
            position: Point2::new(margin, margin + font_size + line_height),
            font_size,
            content: diameter_line,
        },
    ]
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabelSpec;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rectangle_path() {
        let outline = OutlineResult::Rectangle {
            width: 50.0,
            height: 100.0,
        };
        assert_eq!(
            path_data(&outline, 3),
            "M 0.000,0.000 L 50.000,0.000 L 50.000,100.000 L 0.000,100.000 Z"
        );
    }

    #[test]
    fn test_sector_path_commands() {
        let label = Label::new(LabelSpec::default()).unwrap();
        let d = path_data(label.outline(), 3);
        let commands: Vec<&str> = d
            .split_whitespace()
            .filter(|t| t.chars().all(|c| c.is_ascii_alphabetic()))
            .collect();
        assert_eq!(commands, ["M", "L", "A", "L", "A", "Z"]);
        // Outer arc sweeps negative, inner arc positive, both short
        assert!(d.contains("A 500.000,500.000 0 0,0 "));
        assert!(d.contains("A 400.000,400.000 0 0,1 "));
        assert!(!d.contains("-0.000"));
    }

    #[test]
    fn test_large_arc_flag() {
        let label = Label::new(LabelSpec::new(10.0, 60.0, 20.0, 40.0)).unwrap();
        let d = path_data(label.outline(), 3);
        assert!(d.contains("0 1,0 "));
        assert!(d.contains("0 1,1 "));
    }

    #[test]
    fn test_precision() {
        let outline = OutlineResult::Rectangle {
            width: 1.23456,
            height: 2.0,
        };
        assert!(path_data(&outline, 1).contains("L 1.2,0.0"));
        assert_eq!(number(-0.0001, 3), "0.000");
        assert_eq!(number(-0.01, 3), "-0.010");
    }

    #[test]
    fn test_document_layout() {
        let label = Label::new(LabelSpec::new(80.0, 200.0, 70.0, 70.0)).unwrap();
        let doc = label.to_svg(&SvgStyle::default());
        let (w, h) = doc.size();
        assert_abs_diff_eq!(w, 201.0, epsilon = 1e-12);
        assert_abs_diff_eq!(h, 81.0, epsilon = 1e-12);
        assert!(doc.transform().is_none());

        let svg = doc.to_string();
        assert!(svg.contains(r#"width="201mm" height="81mm" viewBox="-0.5 -0.5 201 81""#));
        assert!(svg.contains(r##"fill="#C4E9FB""##));
        assert!(svg.contains(r#"stroke-width="0.15""#));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains("<title>Tapered Label 80x200mm</title>"));
        assert!(svg.contains("Diameter: 70mm (cylindrical)"));
        assert!(!svg.contains("transform="));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_flipped_label_is_mirrored() {
        let label = Label::new(LabelSpec::new(100.0, 50.0, 100.0, 80.0)).unwrap();
        let doc = label.to_svg(&SvgStyle::default());
        let (_, height) = label.bounds();
        let t = doc.transform().expect("flipped label should be mirrored");
        assert!(t.is_reflection());
        assert_eq!(t.affine_coefficients()[5], height);
        assert!(doc.to_string().contains("transform=\"matrix(1 0 0 -1 0 "));
    }

    #[test]
    fn test_annotations() {
        let label = Label::new(LabelSpec::default()).unwrap();
        let doc = label.to_svg(&SvgStyle::default());
        let texts = doc.texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].content, "Taper Label: 100 x 50mm");
        assert_eq!(texts[1].content, "Diameters: 80mm - 100mm");

        let (w, h) = label.bounds();
        let extent = w.max(h);
        assert_abs_diff_eq!(texts[0].font_size, extent * 0.03, epsilon = 1e-12);
        assert_abs_diff_eq!(texts[0].position.x, extent * 0.02, epsilon = 1e-12);
        assert_abs_diff_eq!(
            texts[1].position.y - texts[0].position.y,
            extent * 0.03 * 1.2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_without_annotations() {
        let label = Label::new(LabelSpec::default()).unwrap();
        let style = SvgStyle {
            annotate: false,
            ..SvgStyle::default()
        };
        let svg = label.to_svg(&style).to_string();
        assert!(!svg.contains("<text"));
        assert!(!svg.contains("dimensions"));
    }

    #[test]
    fn test_attribute_escaping() {
        let label = Label::new(LabelSpec::default()).unwrap();
        let style = SvgStyle {
            fill: "red\" onload=\"x".into(),
            ..SvgStyle::default()
        };
        let svg = label.to_svg(&style).to_string();
        assert!(svg.contains(r#"fill="red&quot; onload=&quot;x""#));
    }
}
