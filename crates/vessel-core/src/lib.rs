//! Core abstractions for vessel-rs.
//!
//! This crate provides the fundamental types used throughout vessel-rs:
//! - [`Morphology`], [`Section`] and [`Sample`]: the read-only vascular skeleton
//! - [`Polyline`]: the color-tagged primitive handed to geometry creation
//! - [`Options`]: the immutable reconstruction configuration
//! - [`GeometryBackend`]: the seam to whatever creates scene objects
//! - Color maps and palettes

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod color_map;
pub mod error;
pub mod morphology;
pub mod options;
pub mod polyline;
pub mod registry;

pub use backend::{GeometryBackend, ObjectDescriptor, ObjectHandle, ProfileHandle};
pub use color_map::{interpolate_colors, interpolate_three_colors, ColorMap, ColorMapRegistry};
pub use error::{Result, VesselError};
pub use morphology::{Morphology, Sample, Section};
pub use options::{
    ColorCoding, ColorMode, DegenerateRangePolicy, Material, Options, RadiusPolicy,
    RadiusPolicyKind, ReconstructionMethod,
};
pub use polyline::Polyline;
pub use registry::Registry;

// Re-export glam types for convenience
pub use glam::Vec3;
