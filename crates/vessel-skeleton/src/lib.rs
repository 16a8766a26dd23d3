//! Skeleton processing for vessel-rs.
//!
//! This crate turns a read-only [`Morphology`](vessel_core::Morphology) into
//! color-tagged polylines:
//! - Segment attributes (radius, length, surface area, volume)
//! - Color coding against global metric ranges
//! - Polyline assembly per segment, section or connected path
//! - Radius post-processing, adaptive resampling and centering

// Geometry code intentionally uses casts for indices and bucket math
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod assembler;
pub mod color_coding;
pub mod radii;
pub mod resample;
pub mod segment;
pub mod transform;

pub use assembler::{
    connected_paths, global_range, metric_values, morphology_polylines, path_polyline,
    path_samples, section_polyline, segment_polylines, Grouping, SectionPath,
};
pub use color_coding::{bucket_index, metric_for, ColorCoder, MetricRange};
pub use radii::apply_radius_policy;
pub use resample::{resample_adaptively, resample_morphology};
pub use segment::SegmentMetric;
pub use transform::{center_at_origin, translate};
