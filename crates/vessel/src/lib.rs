//! vessel-rs: reconstruction of vascular morphologies into tube geometry.
//!
//! A morphology is a tree of sections, each an ordered run of
//! `(position, radius)` samples. A builder turns it into color-coded
//! polylines and hands them to a [`GeometryBackend`], which sweeps a circular
//! profile along every polyline.
//!
//! # Quick Start
//!
//! ```
//! use vessel_rs::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let section = Section::new(
//!         0,
//!         vec![
//!             Sample::new(Vec3::ZERO, 1.0),
//!             Sample::new(Vec3::new(0.0, 0.0, 5.0), 0.5),
//!         ],
//!     );
//!     let morphology = Morphology::new("vessel", vec![section])?;
//!
//!     let mut scene = SceneBackend::new();
//!     let objects = reconstruct(&morphology, &Options::default(), &mut scene)?;
//!     assert_eq!(objects.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! # Strategies
//!
//! - [`DisconnectedSegmentsBuilder`] - one tube per segment
//! - [`DisconnectedSectionsBuilder`] - one tube per section
//! - [`ConnectedSectionsBuilder`] - sections joined within each arbor
//! - [`ConnectedSkeletonBuilder`] - the whole morphology as one skeleton
//!
//! Any builder can also be driven one component per host tick with
//! [`ProgressiveReconstruction`].

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod builders;
pub mod progressive;
pub mod scene;

// Re-export core types
pub use vessel_core::{
    ColorCoding, ColorMap, ColorMapRegistry, ColorMode, DegenerateRangePolicy, GeometryBackend,
    Material, Morphology, ObjectDescriptor, ObjectHandle, Options, Polyline, ProfileHandle,
    RadiusPolicy, RadiusPolicyKind, ReconstructionMethod, Result, Sample, Section, Vec3,
    VesselError,
};

// Re-export skeleton processing
pub use vessel_skeleton::{bucket_index, ColorCoder, Grouping, MetricRange, SegmentMetric};

pub use builders::{
    ConnectedSectionsBuilder, ConnectedSkeletonBuilder, DisconnectedSectionsBuilder,
    DisconnectedSegmentsBuilder, SkeletonBuilder,
};
pub use progressive::{HostEvent, ProgressiveReconstruction, ReconstructionState};
pub use scene::{SceneBackend, SceneObject, SceneProfile};

/// Installs `env_logger` as the `log` backend.
///
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Creates the builder selected by `options.reconstruction_method`.
pub fn create_builder(morphology: Morphology, options: Options) -> Box<dyn SkeletonBuilder> {
    match options.reconstruction_method {
        ReconstructionMethod::DisconnectedSegments => {
            Box::new(DisconnectedSegmentsBuilder::new(morphology, options))
        }
        ReconstructionMethod::DisconnectedSections => {
            Box::new(DisconnectedSectionsBuilder::new(morphology, options))
        }
        ReconstructionMethod::ConnectedSections => {
            Box::new(ConnectedSectionsBuilder::new(morphology, options))
        }
        ReconstructionMethod::ConnectedSkeleton => {
            Box::new(ConnectedSkeletonBuilder::new(morphology, options))
        }
    }
}

/// Runs a one-shot reconstruction and returns the created objects.
pub fn reconstruct(
    morphology: &Morphology,
    options: &Options,
    backend: &mut dyn GeometryBackend,
) -> Result<Vec<ObjectHandle>> {
    let mut builder = create_builder(morphology.clone(), options.clone());
    builder.build_skeleton(backend)?;
    log::info!(
        "{} created {} objects",
        builder.name(),
        builder.morphology_objects().len()
    );
    Ok(builder.morphology_objects().to_vec())
}

/// Starts a progressive reconstruction with the builder `options` select.
pub fn reconstruct_progressively(
    morphology: Morphology,
    options: Options,
) -> ProgressiveReconstruction {
    ProgressiveReconstruction::new(create_builder(morphology, options))
}
