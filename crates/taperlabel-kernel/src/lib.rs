#![warn(missing_docs)]

//! Frustum unroll kernel for taperlabel.
//!
//! Computes the flat outline of a label wrapped around a tapered object
//! (a cup, a cone, a lamp shade). The lateral surface of a frustum develops
//! into a sector of an annulus; a cylinder develops into a rectangle.
//!
//! The kernel is a pure function of four numbers and holds no state.
//!
//! # Example
//!
//! ```
//! use taperlabel_kernel::{unroll, LabelSpec, OutlineResult};
//!
//! // 100 mm tall, 50 mm wide label on a cup tapering from 100 to 80 mm
//! let spec = LabelSpec::new(100.0, 50.0, 80.0, 100.0);
//! let outline = unroll(&spec).unwrap();
//!
//! match outline {
//!     OutlineResult::AnnularSector(sector) => {
//!         assert!(sector.inner_radius < sector.outer_radius);
//!         assert!(!sector.flipped);
//!     }
//!     OutlineResult::Rectangle { .. } => unreachable!(),
//! }
//! ```

pub mod error;
pub mod outline;
pub mod spec;
pub mod unroll;

pub use error::{Dimension, GeometryError, Result, ValidationError};
pub use outline::{AnnularSector, OutlineResult, OutlineSegment, SectorCorners};
pub use spec::{validate, LabelSpec};
pub use unroll::{unroll, CYLINDER_EPSILON};
