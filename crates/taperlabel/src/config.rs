//! TOML configuration for label defaults and SVG styling.
//!
//! ```toml
//! [label]
//! height = 90.0
//! top_diameter = 82.0
//! bottom_diameter = 60.0
//!
//! [style]
//! fill = "#FFFFFF"
//! stroke_width = 0.2
//! annotate = false
//! ```
//!
//! Keys left out fall back to the built-in defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{LabelError, LabelSpec, SvgStyle};

/// Optional label dimensions. Unset fields fall through to the next layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelDefaults {
    /// Label height in mm.
    pub height: Option<f64>,
    /// Label width in mm.
    pub width: Option<f64>,
    /// Diameter of the object's top edge in mm.
    pub top_diameter: Option<f64>,
    /// Diameter of the object's bottom edge in mm.
    pub bottom_diameter: Option<f64>,
    /// Treat `height` as the object's vertical height rather than the
    /// slant distance along its side.
    pub vertical: Option<bool>,
}

impl LabelDefaults {
    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: LabelDefaults) -> Self {
        Self {
            height: self.height.or(fallback.height),
            width: self.width.or(fallback.width),
            top_diameter: self.top_diameter.or(fallback.top_diameter),
            bottom_diameter: self.bottom_diameter.or(fallback.bottom_diameter),
            vertical: self.vertical.or(fallback.vertical),
        }
    }

    /// Build a spec, taking missing dimensions from [`LabelSpec::default`].
    pub fn to_spec(&self) -> LabelSpec {
        let base = LabelSpec::default();
        let height = self.height.unwrap_or(base.height);
        let width = self.width.unwrap_or(base.width);
        let top = self.top_diameter.unwrap_or(base.top_diameter);
        let bottom = self.bottom_diameter.unwrap_or(base.bottom_diameter);
        if self.vertical.unwrap_or(false) {
            LabelSpec::from_vertical_height(height, width, top, bottom)
        } else {
            LabelSpec::new(height, width, top, bottom)
        }
    }
}

/// Contents of a `taperlabel.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// The `[label]` table.
    pub label: LabelDefaults,
    /// The `[style]` table.
    pub style: SvgStyle,
}

impl LabelConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, LabelError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Resolve the label spec: `overrides` first, then this config, then
    /// the built-in defaults.
    pub fn resolve(&self, overrides: LabelDefaults) -> LabelSpec {
        overrides.or(self.label).to_spec()
    }
}
