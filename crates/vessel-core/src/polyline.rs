//! Polylines: the color-tagged primitives handed to the geometry backend.

use glam::Vec3;

use crate::morphology::Sample;

/// A color-tagged sequence of `(point, radius)` pairs.
///
/// Polylines live for a single reconstruction pass and are consumed by the
/// geometry backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    samples: Vec<Sample>,
    color_index: usize,
}

impl Polyline {
    /// Creates a polyline from samples and a palette index.
    pub fn new(samples: Vec<Sample>, color_index: usize) -> Self {
        Self {
            samples,
            color_index,
        }
    }

    /// Returns the samples of this polyline.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns mutable access to the samples.
    pub fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    /// Returns the palette index.
    #[must_use]
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the polyline has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the sample positions.
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.samples.iter().map(|s| s.point)
    }

    /// Returns the sample radii.
    pub fn radii(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(|s| s.radius)
    }
}
