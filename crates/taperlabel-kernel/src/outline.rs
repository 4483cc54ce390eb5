//! Outline descriptors produced by the unroll kernel.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use taperlabel_math::Point2;

/// The developed outline of a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum OutlineResult {
    /// Cylindrical case: the developed surface is a true rectangle.
    Rectangle {
        /// Width, equal to the requested label width.
        width: f64,
        /// Height, equal to the label height.
        height: f64,
    },
    /// Conical case: a sector of an annulus.
    AnnularSector(AnnularSector),
}

impl OutlineResult {
    /// Bounding box size `(width, height)` of the outline.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            OutlineResult::Rectangle { width, height } => (*width, *height),
            OutlineResult::AnnularSector(sector) => {
                (sector.bounding_width, sector.bounding_height)
            }
        }
    }

    /// Whether renderers should mirror the outline vertically.
    ///
    /// Rectangles are never flipped.
    pub fn is_flipped(&self) -> bool {
        match self {
            OutlineResult::Rectangle { .. } => false,
            OutlineResult::AnnularSector(sector) => sector.flipped,
        }
    }

    /// The sector, if this is the conical case.
    pub fn as_sector(&self) -> Option<&AnnularSector> {
        match self {
            OutlineResult::AnnularSector(sector) => Some(sector),
            OutlineResult::Rectangle { .. } => None,
        }
    }

    /// The closed path describing the outline, in outline coordinates
    /// (bounding box starting at the origin, before any flip).
    pub fn segments(&self) -> Vec<OutlineSegment> {
        match self {
            OutlineResult::Rectangle { width, height } => vec![
                OutlineSegment::MoveTo {
                    to: Point2::new(0.0, 0.0),
                },
                OutlineSegment::LineTo {
                    to: Point2::new(*width, 0.0),
                },
                OutlineSegment::LineTo {
                    to: Point2::new(*width, *height),
                },
                OutlineSegment::LineTo {
                    to: Point2::new(0.0, *height),
                },
                OutlineSegment::Close,
            ],
            OutlineResult::AnnularSector(sector) => sector.segments(),
        }
    }
}

/// Flattened lateral surface of a frustum.
///
/// Radii are measured from the apex of the virtual cone in the flattened
/// plane, not from the object's axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnularSector {
    /// Apex distance of the narrow edge.
    pub inner_radius: f64,
    /// Apex distance of the wide edge.
    pub outer_radius: f64,
    /// Angular extent of the sector, in radians.
    pub sweep_angle: f64,
    /// True when `sweep_angle > π`; arcs must be drawn the long way around.
    pub large_arc: bool,
    /// Width of the bounding box.
    pub bounding_width: f64,
    /// Height of the bounding box.
    pub bounding_height: f64,
    /// True when the object's top edge is at least as wide as its bottom.
    pub flipped: bool,
}

/// Corner points of an [`AnnularSector`] in outline coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorCorners {
    /// Centre of both arcs (the virtual cone apex).
    pub apex: Point2,
    /// Inner edge at `-sweep/2`; the path starts here.
    pub inner_start: Point2,
    /// Outer edge at `-sweep/2`.
    pub outer_start: Point2,
    /// Outer edge at `+sweep/2`.
    pub outer_end: Point2,
    /// Inner edge at `+sweep/2`.
    pub inner_end: Point2,
}

impl AnnularSector {
    /// Position of the apex such that the bounding box starts at `(0, 0)`.
    pub fn apex(&self) -> Point2 {
        Point2::new(
            self.bounding_width / 2.0,
            self.bounding_height - self.outer_radius,
        )
    }

    /// Point at `radius` from the apex, rotated by `angle` from the
    /// sector's axis of symmetry.
    pub fn point_at(&self, radius: f64, angle: f64) -> Point2 {
        let apex = self.apex();
        let (sin, cos) = angle.sin_cos();
        Point2::new(apex.x + sin * radius, apex.y + cos * radius)
    }

    /// The four corners and the apex.
    pub fn corners(&self) -> SectorCorners {
        let half_sweep = self.sweep_angle / 2.0;
        SectorCorners {
            apex: self.apex(),
            inner_start: self.point_at(self.inner_radius, -half_sweep),
            outer_start: self.point_at(self.outer_radius, -half_sweep),
            outer_end: self.point_at(self.outer_radius, half_sweep),
            inner_end: self.point_at(self.inner_radius, half_sweep),
        }
    }

    /// Length of the wide edge.
    pub fn outer_arc_length(&self) -> f64 {
        self.sweep_angle * self.outer_radius
    }

    /// Length of the narrow edge.
    pub fn inner_arc_length(&self) -> f64 {
        self.sweep_angle * self.inner_radius
    }

    /// Sweep angle in degrees.
    pub fn sweep_degrees(&self) -> f64 {
        self.sweep_angle * 180.0 / PI
    }

    /// The closed path: inner start, line out, outer arc, line in,
    /// inner arc back.
    pub fn segments(&self) -> Vec<OutlineSegment> {
        let c = self.corners();
        vec![
            OutlineSegment::MoveTo { to: c.inner_start },
            OutlineSegment::LineTo { to: c.outer_start },
            OutlineSegment::ArcTo {
                to: c.outer_end,
                center: c.apex,
                radius: self.outer_radius,
                large_arc: self.large_arc,
                positive_sweep: false,
            },
            OutlineSegment::LineTo { to: c.inner_end },
            OutlineSegment::ArcTo {
                to: c.inner_start,
                center: c.apex,
                radius: self.inner_radius,
                large_arc: self.large_arc,
                positive_sweep: true,
            },
            OutlineSegment::Close,
        ]
    }
}

/// A drawing primitive of an outline path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineSegment {
    /// Start a new subpath.
    MoveTo {
        /// Target point.
        to: Point2,
    },
    /// Straight line from the current point.
    LineTo {
        /// Target point.
        to: Point2,
    },
    /// Circular arc from the current point.
    ArcTo {
        /// Target point.
        to: Point2,
        /// Arc centre.
        center: Point2,
        /// Arc radius.
        radius: f64,
        /// Take the longer of the two possible arcs.
        large_arc: bool,
        /// Travel in the direction of increasing polar angle
        /// (SVG sweep-flag 1).
        positive_sweep: bool,
    },
    /// Close the subpath back to its start.
    Close,
}

impl OutlineSegment {
    /// End point of the segment, if it moves the pen.
    pub fn end(&self) -> Option<Point2> {
        match self {
            OutlineSegment::MoveTo { to }
            | OutlineSegment::LineTo { to }
            | OutlineSegment::ArcTo { to, .. } => Some(*to),
            OutlineSegment::Close => None,
        }
    }
}
