//! Frustum unrolling.
//!
//! The lateral surface of a frustum develops into a sector of an annulus
//! whose centre is the apex of the virtual cone the frustum was cut from.
//! `height` is taken as the in-plane distance between the two edge circles,
//! so the cone's half angle satisfies `sin(half_angle) = radius_diff / height`
//! and every edge radius `r` maps to an apex distance `r / sin(half_angle)`.

use std::f64::consts::PI;

use taperlabel_math::Tolerance;
use tracing::{debug, instrument};

use crate::error::{GeometryError, Result};
use crate::outline::{AnnularSector, OutlineResult};
use crate::spec::{validate, LabelSpec};

/// Diameter difference below which the object is treated as a cylinder.
pub const CYLINDER_EPSILON: f64 = Tolerance::DEFAULT.cylinder;

/// Compute the developed outline of a label.
///
/// Returns a [`OutlineResult::Rectangle`] for cylinders (diameters within
/// [`CYLINDER_EPSILON`]) and an [`OutlineResult::AnnularSector`] otherwise.
///
/// # Errors
///
/// - [`GeometryError::Invalid`] if any dimension is non-positive or non-finite.
/// - [`GeometryError::DiametersExceedHeight`] if the radius difference is
///   greater than the height.
/// - [`GeometryError::ExceedsFullRevolution`] if either edge would wrap the
///   object more than once.
/// - [`GeometryError::NonFinite`] if a derived quantity degenerates despite
///   the guards above.
#[instrument(
    level = "debug",
    skip_all,
    fields(
        height = spec.height,
        width = spec.width,
        top = spec.top_diameter,
        bottom = spec.bottom_diameter
    )
)]
pub fn unroll(spec: &LabelSpec) -> Result<OutlineResult> {
    validate(spec)?;

    if Tolerance::DEFAULT.is_cylindrical(spec.top_diameter, spec.bottom_diameter) {
        debug!("diameters match, unrolling as cylinder");
        return Ok(OutlineResult::Rectangle {
            width: spec.width,
            height: spec.height,
        });
    }

    let outer_physical_radius = spec.outer_radius();
    let inner_physical_radius = spec.inner_radius();
    let radius_diff = spec.radius_diff();
    let flipped = spec.is_top_wider();

    if radius_diff > spec.height {
        debug!(radius_diff, "radius difference exceeds label height");
        return Err(GeometryError::DiametersExceedHeight {
            radius_diff,
            height: spec.height,
        });
    }

    // Clamped to absorb overshoot when radius_diff == height.
    let sin_half_angle = (radius_diff / spec.height).clamp(-1.0, 1.0);
    let apex_to_outer_radius = outer_physical_radius / sin_half_angle;
    let apex_to_inner_radius = inner_physical_radius / sin_half_angle;

    let sweep_angle = 2.0 * spec.width / (apex_to_outer_radius + apex_to_inner_radius);

    let outer_arc_len = sweep_angle * apex_to_outer_radius;
    let inner_arc_len = sweep_angle * apex_to_inner_radius;
    let outer_circumference = 2.0 * PI * outer_physical_radius;
    let inner_circumference = 2.0 * PI * inner_physical_radius;
    if outer_arc_len > outer_circumference || inner_arc_len > inner_circumference {
        debug!(
            sweep_angle,
            outer_arc_len, inner_arc_len, "label wraps more than one revolution"
        );
        return Err(GeometryError::ExceedsFullRevolution {
            outer_arc: outer_arc_len,
            outer_circumference,
            inner_arc: inner_arc_len,
            inner_circumference,
        });
    }

    let large_arc = sweep_angle > PI;
    let half_sweep = sweep_angle / 2.0;
    // Past a half turn the outer endpoints cannot spread wider than the radius.
    let chord_half_width = apex_to_outer_radius * (if large_arc { 1.0 } else { half_sweep.sin() });
    let outer_projection = apex_to_outer_radius * half_sweep.cos();
    let inner_projection = apex_to_inner_radius * half_sweep.cos();
    let sector_depth = apex_to_outer_radius - outer_projection.min(inner_projection);

    let sector = AnnularSector {
        inner_radius: apex_to_inner_radius,
        outer_radius: apex_to_outer_radius,
        sweep_angle,
        large_arc,
        bounding_width: 2.0 * chord_half_width,
        bounding_height: sector_depth,
        flipped,
    };
    check_sector(&sector)?;

    debug!(
        inner_radius = sector.inner_radius,
        outer_radius = sector.outer_radius,
        sweep_angle,
        large_arc,
        flipped,
        "unrolled as annular sector"
    );
    Ok(OutlineResult::AnnularSector(sector))
}

/// Every derived quantity must be finite and strictly positive, with the
/// inner radius strictly inside the outer one.
fn check_sector(sector: &AnnularSector) -> Result<()> {
    let quantities = [
        ("inner radius", sector.inner_radius),
        ("outer radius", sector.outer_radius),
        ("sweep angle", sector.sweep_angle),
        ("bounding width", sector.bounding_width),
        ("bounding height", sector.bounding_height),
    ];
    for (quantity, value) in quantities {
        if !value.is_finite() || value <= 0.0 {
            return Err(GeometryError::NonFinite { quantity, value });
        }
    }
    if sector.inner_radius >= sector.outer_radius {
        return Err(GeometryError::NonFinite {
            quantity: "radius gap",
            value: sector.outer_radius - sector.inner_radius,
        });
    }
    Ok(())
}
