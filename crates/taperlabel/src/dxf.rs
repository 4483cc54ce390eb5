//! DXF export for cutting label outlines.
//!
//! Exports the outline as DXF R12 for vinyl and laser cutters. DXF is y-up
//! while the outline is laid out y-down like the SVG, so unflipped outlines
//! are mirrored on the way out and flipped ones are written as-is. Either
//! way the drawing matches the printed SVG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use taperlabel_kernel::{OutlineResult, OutlineSegment};
use taperlabel_math::{polar_angle, Point2, Transform2};

/// A 2D entity for DXF export.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape2D {
    /// Line segment.
    Line {
        /// Start point.
        start: Point2,
        /// End point.
        end: Point2,
    },
    /// Circular arc, counter-clockwise from `start_angle` to `end_angle`.
    Arc {
        /// Arc center.
        center: Point2,
        /// Arc radius.
        radius: f64,
        /// Start angle in degrees.
        start_angle: f64,
        /// End angle in degrees.
        end_angle: f64,
    },
    /// Closed polyline.
    Polyline {
        /// Ordered list of vertices.
        points: Vec<Point2>,
    },
}

/// DXF document builder.
#[derive(Debug, Clone, Default)]
pub struct DxfDocument {
    shapes: Vec<Shape2D>,
}

impl DxfDocument {
    /// Create a new empty DXF document.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Build a document holding `outline` as it appears when printed.
    pub fn from_outline(outline: &OutlineResult) -> Self {
        let (_, height) = outline.bounds();
        let transform = if outline.is_flipped() {
            Transform2::identity()
        } else {
            Transform2::mirror_vertical(height)
        };

        let mut doc = Self::new();
        match outline {
            OutlineResult::Rectangle { .. } => {
                let points = outline
                    .segments()
                    .iter()
                    .filter_map(OutlineSegment::end)
                    .map(|p| transform.apply_point(&p))
                    .collect();
                doc.add_shape(Shape2D::Polyline { points });
            }
            OutlineResult::AnnularSector(_) => doc.add_segments(&outline.segments(), &transform),
        }
        doc
    }

    /// Add an arbitrary [`Shape2D`] to the document.
    pub fn add_shape(&mut self, shape: Shape2D) {
        self.shapes.push(shape);
    }

    /// Add a path as individual LINE and ARC entities.
    ///
    /// An arc's direction flips when `transform` is a reflection.
    pub fn add_segments(&mut self, segments: &[OutlineSegment], transform: &Transform2) {
        let mut start: Option<Point2> = None;
        let mut current: Option<Point2> = None;

        for segment in segments {
            match *segment {
                OutlineSegment::MoveTo { to } => {
                    let p = transform.apply_point(&to);
                    start = Some(p);
                    current = Some(p);
                }
                OutlineSegment::LineTo { to } => {
                    let p = transform.apply_point(&to);
                    if let Some(from) = current {
                        self.add_line(from, p);
                    }
                    current = Some(p);
                }
                OutlineSegment::ArcTo {
                    to,
                    center,
                    radius,
                    positive_sweep,
                    ..
                } => {
                    let p = transform.apply_point(&to);
                    if let Some(from) = current {
                        let center = transform.apply_point(&center);
                        let ccw = positive_sweep != transform.is_reflection();
                        self.add_arc_between(center, radius, from, p, ccw);
                    }
                    current = Some(p);
                }
                OutlineSegment::Close => {
                    if let (Some(from), Some(to)) = (current, start) {
                        if from != to {
                            self.add_line(from, to);
                        }
                    }
                    current = start;
                }
            }
        }
    }

    /// Add a line segment.
    pub fn add_line(&mut self, start: Point2, end: Point2) {
        self.shapes.push(Shape2D::Line { start, end });
    }

    /// Add an arc from `from` to `to` around `center`, travelling
    /// counter-clockwise when `ccw` is set and clockwise otherwise.
    pub fn add_arc_between(&mut self, center: Point2, radius: f64, from: Point2, to: Point2, ccw: bool) {
        let (a, b) = if ccw { (from, to) } else { (to, from) };
        self.shapes.push(Shape2D::Arc {
            center,
            radius,
            start_angle: degrees(polar_angle(&center, &a)),
            end_angle: degrees(polar_angle(&center, &b)),
        });
    }

    /// The shapes in the document.
    pub fn shapes(&self) -> &[Shape2D] {
        &self.shapes
    }

    /// Number of LINE entities.
    pub fn num_lines(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape2D::Line { .. }))
            .count()
    }

    /// Number of ARC entities.
    pub fn num_arcs(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape2D::Arc { .. }))
            .count()
    }

    /// Export to DXF file
    pub fn export(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()
    }

    /// Write the DXF document to any writer.
    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        // DXF Header
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "HEADER")?;
        writeln!(writer, "9")?;
        writeln!(writer, "$ACADVER")?;
        writeln!(writer, "1")?;
        writeln!(writer, "AC1009")?; // DXF R12
        writeln!(writer, "9")?;
        writeln!(writer, "$INSUNITS")?;
        writeln!(writer, "70")?;
        writeln!(writer, "4")?; // Millimeters
        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        // Tables section (minimal)
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "TABLES")?;
        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        // Entities section
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "ENTITIES")?;

        for shape in &self.shapes {
            match shape {
                Shape2D::Line { start, end } => write_line(writer, start, end)?,
                Shape2D::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => write_arc(writer, center, *radius, *start_angle, *end_angle)?,
                Shape2D::Polyline { points } => write_polyline(writer, points)?,
            }
        }

        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        // End of file
        writeln!(writer, "0")?;
        writeln!(writer, "EOF")?;

        Ok(())
    }
}

fn write_line(writer: &mut impl Write, start: &Point2, end: &Point2) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "LINE")?;
    writeln!(writer, "8")?;
    writeln!(writer, "0")?; // Layer 0
    writeln!(writer, "10")?;
    writeln!(writer, "{:.6}", start.x)?;
    writeln!(writer, "20")?;
    writeln!(writer, "{:.6}", start.y)?;
    writeln!(writer, "11")?;
    writeln!(writer, "{:.6}", end.x)?;
    writeln!(writer, "21")?;
    writeln!(writer, "{:.6}", end.y)?;
    Ok(())
}

fn write_arc(
    writer: &mut impl Write,
    center: &Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "ARC")?;
    writeln!(writer, "8")?;
    writeln!(writer, "0")?;
    writeln!(writer, "10")?;
    writeln!(writer, "{:.6}", center.x)?;
    writeln!(writer, "20")?;
    writeln!(writer, "{:.6}", center.y)?;
    writeln!(writer, "40")?;
    writeln!(writer, "{:.6}", radius)?;
    writeln!(writer, "50")?;
    writeln!(writer, "{:.6}", start_angle)?;
    writeln!(writer, "51")?;
    writeln!(writer, "{:.6}", end_angle)?;
    Ok(())
}

fn write_polyline(writer: &mut impl Write, points: &[Point2]) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "LWPOLYLINE")?;
    writeln!(writer, "8")?;
    writeln!(writer, "0")?;
    writeln!(writer, "90")?;
    writeln!(writer, "{}", points.len())?;
    writeln!(writer, "70")?;
    writeln!(writer, "1")?; // Closed polyline

    for p in points {
        writeln!(writer, "10")?;
        writeln!(writer, "{:.6}", p.x)?;
        writeln!(writer, "20")?;
        writeln!(writer, "{:.6}", p.y)?;
    }
    Ok(())
}

/// Radians to degrees in `[0, 360)`.
fn degrees(radians: f64) -> f64 {
    radians.to_degrees().rem_euclid(360.0)
}
