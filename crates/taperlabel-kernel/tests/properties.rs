//! Property-based tests for the unroll kernel using the `proptest` crate.

use std::f64::consts::PI;

use proptest::prelude::*;

use taperlabel_kernel::{
    unroll, AnnularSector, Dimension, GeometryError, LabelSpec, OutlineResult, OutlineSegment,
    ValidationError,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary positive dimension in a realistic millimetre range.
fn arb_positive_dim() -> impl Strategy<Value = f64> {
    0.1f64..1000.0
}

/// A pair of distinct diameters, `(top, bottom)`, in either order.
fn arb_diameters() -> impl Strategy<Value = (f64, f64)> {
    (5.0f64..400.0, 0.01f64..200.0, any::<bool>()).prop_map(|(narrow, gap, top_wider)| {
        let wide = narrow + gap;
        if top_wider {
            (wide, narrow)
        } else {
            (narrow, wide)
        }
    })
}

/// A cone spec that passes every guard, with a sweep below a half turn.
///
/// `sin_half_angle` picks the height from the radius difference and
/// `width_fraction` picks the width as a fraction of the largest width that
/// keeps the sweep under π.
fn arb_cone_spec() -> impl Strategy<Value = LabelSpec> {
    (arb_diameters(), 0.05f64..0.99, 0.01f64..0.9).prop_map(
        |((top, bottom), sin_half_angle, width_fraction)| {
            let radius_diff = (top - bottom).abs() / 2.0;
            let height = radius_diff / sin_half_angle;
            let max_width = PI * (top + bottom) / 4.0;
            LabelSpec::new(height, width_fraction * max_width, top, bottom)
        },
    )
}

fn expect_sector(spec: &LabelSpec) -> AnnularSector {
    match unroll(spec) {
        Ok(OutlineResult::AnnularSector(sector)) => sector,
        other => panic!("expected a sector for {:?}, got {:?}", spec, other),
    }
}

// ---------------------------------------------------------------------------
// 1. Cylinders unroll to the exact input rectangle
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn cylinder_is_exact_rectangle(
        height in arb_positive_dim(),
        width in arb_positive_dim(),
        diameter in 1.0f64..500.0,
        offset in -0.0009f64..0.0009,
    ) {
        let spec = LabelSpec::new(height, width, diameter, diameter + offset);
        let result = unroll(&spec).unwrap();
        prop_assert_eq!(result, OutlineResult::Rectangle { width, height });
    }
}

// ---------------------------------------------------------------------------
// 2. Valid cones give ordered radii and a positive sweep
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn cone_radii_are_ordered(spec in arb_cone_spec()) {
        let sector = expect_sector(&spec);
        prop_assert!(sector.inner_radius < sector.outer_radius);
        prop_assert!(sector.sweep_angle > 0.0 && sector.sweep_angle.is_finite());
        prop_assert!(sector.bounding_width > 0.0);
        prop_assert!(sector.bounding_height > 0.0);
        prop_assert_eq!(sector.flipped, spec.top_diameter >= spec.bottom_diameter);
    }
}

// ---------------------------------------------------------------------------
// 3. Neither edge wraps more than once
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn arcs_stay_within_one_revolution(spec in arb_cone_spec()) {
        let sector = expect_sector(&spec);
        let outer_circumference = PI * spec.top_diameter.max(spec.bottom_diameter);
        let inner_circumference = PI * spec.top_diameter.min(spec.bottom_diameter);
        prop_assert!(sector.outer_arc_length() <= outer_circumference * (1.0 + 1e-12));
        prop_assert!(sector.inner_arc_length() <= inner_circumference * (1.0 + 1e-12));
    }
}

// ---------------------------------------------------------------------------
// 4. Swapping the diameters only toggles the flip
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn swap_symmetry(spec in arb_cone_spec()) {
        let a = expect_sector(&spec);
        let b = expect_sector(&spec.swapped());
        prop_assert_eq!(a.inner_radius, b.inner_radius);
        prop_assert_eq!(a.outer_radius, b.outer_radius);
        prop_assert_eq!(a.sweep_angle, b.sweep_angle);
        prop_assert_eq!(a.bounding_width, b.bounding_width);
        prop_assert_eq!(a.bounding_height, b.bounding_height);
        prop_assert_ne!(a.flipped, b.flipped);
    }
}

// ---------------------------------------------------------------------------
// 5. Wider labels sweep further
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn width_is_monotonic(spec in arb_cone_spec(), growth in 1.01f64..1.1) {
        let wider = LabelSpec { width: spec.width * growth, ..spec };
        let a = expect_sector(&spec);
        let b = expect_sector(&wider);
        prop_assert!(b.sweep_angle > a.sweep_angle);
        prop_assert!(b.bounding_width > a.bounding_width);
    }
}

// ---------------------------------------------------------------------------
// 6. The path is closed and its arc endpoints lie on their circles
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn path_is_closed(spec in arb_cone_spec()) {
        let sector = expect_sector(&spec);
        let segments = sector.segments();
        let start = segments[0].end().unwrap();
        let mut last = start;
        for seg in &segments {
            if let OutlineSegment::ArcTo { to, center, radius, .. } = seg {
                let distance = (to - center).norm();
                prop_assert!((distance - radius).abs() <= 1e-9 * radius.max(1.0));
            }
            if let Some(p) = seg.end() {
                last = p;
            }
        }
        prop_assert_eq!(last, start);
    }
}

// ---------------------------------------------------------------------------
// 7. Rejections
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn non_positive_height_is_rejected(
        height in -1000.0f64..=0.0,
        width in arb_positive_dim(),
        (top, bottom) in arb_diameters(),
    ) {
        let err = unroll(&LabelSpec::new(height, width, top, bottom)).unwrap_err();
        prop_assert!(matches!(
            err,
            GeometryError::Invalid(ValidationError::NonPositiveDimension {
                dimension: Dimension::Height,
                ..
            })
        ), "unexpected error: {:?}", err);
    }

    #[test]
    fn steep_taper_is_rejected(
        (top, bottom) in arb_diameters(),
        ratio in 0.01f64..0.99,
        width in arb_positive_dim(),
    ) {
        let radius_diff = (top - bottom).abs() / 2.0;
        let spec = LabelSpec::new(radius_diff * ratio, width, top, bottom);
        let is_steep = matches!(
            unroll(&spec),
            Err(GeometryError::DiametersExceedHeight { .. })
        );
        prop_assert!(is_steep);
    }
}

#[test]
fn boundary_is_inclusive() {
    // radius diff == height succeeds, radius diff == height + 1e-9 does not
    assert!(unroll(&LabelSpec::new(25.0, 10.0, 50.0, 100.0)).is_ok());
    assert!(matches!(
        unroll(&LabelSpec::new(25.0 - 1e-9, 10.0, 50.0, 100.0)),
        Err(GeometryError::DiametersExceedHeight { .. })
    ));
}
