//! Label input parameters and their validation.

use serde::{Deserialize, Serialize};

use crate::error::{Dimension, ValidationError};

/// The four scalar inputs describing a label on a tapered object.
///
/// All values share one linear unit (the adapters use millimetres).
/// `height` is the in-plane slant distance between the two label edges,
/// not the object's vertical height; see [`LabelSpec::from_vertical_height`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    /// Label height, measured along the slanted surface.
    pub height: f64,
    /// Requested flat width of the label.
    pub width: f64,
    /// Diameter of the object's top edge.
    pub top_diameter: f64,
    /// Diameter of the object's bottom edge.
    pub bottom_diameter: f64,
}

impl LabelSpec {
    /// Create a new label spec. No validation happens here; see [`validate`].
    pub fn new(height: f64, width: f64, top_diameter: f64, bottom_diameter: f64) -> Self {
        Self {
            height,
            width,
            top_diameter,
            bottom_diameter,
        }
    }

    /// Build a spec from the object's vertical height instead of the slant
    /// distance.
    ///
    /// The slant distance is `sqrt(vertical_height² + radius_diff²)`. The
    /// kernel never applies this conversion on its own.
    pub fn from_vertical_height(
        vertical_height: f64,
        width: f64,
        top_diameter: f64,
        bottom_diameter: f64,
    ) -> Self {
        let spec = Self::new(vertical_height, width, top_diameter, bottom_diameter);
        Self {
            height: vertical_height.hypot(spec.radius_diff()),
            ..spec
        }
    }

    /// The same label on the object turned upside down.
    pub fn swapped(&self) -> Self {
        Self {
            top_diameter: self.bottom_diameter,
            bottom_diameter: self.top_diameter,
            ..*self
        }
    }

    /// Radius of the wider edge.
    pub fn outer_radius(&self) -> f64 {
        self.top_diameter.max(self.bottom_diameter) / 2.0
    }

    /// Radius of the narrower edge.
    pub fn inner_radius(&self) -> f64 {
        self.top_diameter.min(self.bottom_diameter) / 2.0
    }

    /// Difference between the two edge radii.
    pub fn radius_diff(&self) -> f64 {
        self.outer_radius() - self.inner_radius()
    }

    /// Whether the top edge is at least as wide as the bottom edge.
    pub fn is_top_wider(&self) -> bool {
        self.top_diameter >= self.bottom_diameter
    }

    fn dimensions(&self) -> [(Dimension, f64); 4] {
        [
            (Dimension::Height, self.height),
            (Dimension::Width, self.width),
            (Dimension::TopDiameter, self.top_diameter),
            (Dimension::BottomDiameter, self.bottom_diameter),
        ]
    }
}

/// Default parameters of the original label generator: a 100 x 50 mm label
/// on a cup tapering from 100 mm at the bottom to 80 mm at the top.
impl Default for LabelSpec {
    fn default() -> Self {
        Self::new(100.0, 50.0, 80.0, 100.0)
    }
}

/// Check that every dimension is a finite, strictly positive number.
///
/// Any value `<= 0`, negative infinity included, is non-positive; NaN and
/// positive infinity are non-finite. Diameter ordering is unconstrained.
pub fn validate(spec: &LabelSpec) -> Result<(), ValidationError> {
    for (dimension, value) in spec.dimensions() {
        if value <= 0.0 {
            return Err(ValidationError::NonPositiveDimension { dimension, value });
        }
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteDimension { dimension, value });
        }
    }
    Ok(())
}
