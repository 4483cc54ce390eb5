#![warn(missing_docs)]

//! taperlabel - printable labels for tapered objects
//!
//! Unrolls the side of a cup, cone or lamp shade into a flat outline and
//! exports it as SVG (for printing) or DXF (for cutters).
//!
//! # Example
//!
//! ```rust,no_run
//! use taperlabel::{Label, LabelSpec, SvgStyle};
//!
//! let label = Label::new(LabelSpec::new(100.0, 50.0, 80.0, 100.0)).unwrap();
//! label.write_svg("cup.svg", &SvgStyle::default()).unwrap();
//! label.write_dxf("cup.dxf").unwrap();
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::info;

pub mod config;
pub mod dxf;
pub mod svg;

pub use config::{LabelConfig, LabelDefaults};
pub use dxf::DxfDocument;
pub use svg::{SvgDocument, SvgStyle};
pub use taperlabel_kernel::{
    unroll, validate, AnnularSector, Dimension, GeometryError, LabelSpec, OutlineResult,
    OutlineSegment, ValidationError,
};

/// Errors returned when building or writing labels.
#[derive(Error, Debug)]
pub enum LabelError {
    /// The spec could not be unrolled.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A config file is not valid TOML or has mistyped keys.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A label spec together with its unrolled outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    spec: LabelSpec,
    outline: OutlineResult,
}

impl Label {
    /// Unroll `spec` into a label.
    pub fn new(spec: LabelSpec) -> Result<Self, LabelError> {
        let outline = unroll(&spec)?;
        Ok(Self { spec, outline })
    }

    /// The input parameters.
    pub fn spec(&self) -> &LabelSpec {
        &self.spec
    }

    /// The unrolled outline.
    pub fn outline(&self) -> &OutlineResult {
        &self.outline
    }

    /// Bounding box size `(width, height)` of the outline.
    pub fn bounds(&self) -> (f64, f64) {
        self.outline.bounds()
    }

    /// Whether the object was treated as a cylinder.
    pub fn is_cylindrical(&self) -> bool {
        matches!(self.outline, OutlineResult::Rectangle { .. })
    }

    /// Human-readable title, e.g. `Tapered Label 100x50mm`.
    pub fn title(&self) -> String {
        format!("Tapered Label {}x{}mm", self.spec.height, self.spec.width)
    }

    /// Suggested file name, e.g. `TaperLabel 100x50.svg`.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "TaperLabel {}x{}.{}",
            self.spec.height, self.spec.width, extension
        )
    }

    /// Build the SVG document for this label.
    pub fn to_svg(&self, style: &SvgStyle) -> SvgDocument {
        SvgDocument::new(self, style)
    }

    /// Build the DXF document for this label.
    pub fn to_dxf(&self) -> DxfDocument {
        DxfDocument::from_outline(&self.outline)
    }

    /// Serialize the outline as pretty JSON.
    pub fn to_json(&self) -> Result<String, LabelError> {
        Ok(serde_json::to_string_pretty(&self.outline)?)
    }

    /// Write the label as an SVG file.
    pub fn write_svg(&self, path: impl AsRef<Path>, style: &SvgStyle) -> Result<(), LabelError> {
        let path = path.as_ref();
        self.to_svg(style).write(path)?;
        let (width, height) = self.bounds();
        info!(path = %path.display(), width, height, "wrote SVG label");
        Ok(())
    }

    /// Write the label outline as a DXF R12 file.
    pub fn write_dxf(&self, path: impl AsRef<Path>) -> Result<(), LabelError> {
        let path = path.as_ref();
        self.to_dxf().export(path)?;
        let (width, height) = self.bounds();
        info!(path = %path.display(), width, height, "wrote DXF label");
        Ok(())
    }
}
