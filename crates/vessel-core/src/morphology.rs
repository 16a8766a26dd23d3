//! Vascular morphology skeleton: samples, sections and the morphology aggregate.
//!
//! A [`Morphology`] is read-only once constructed. Every derived quantity the
//! reconstruction pipeline needs (segment attributes, color indices) is computed
//! on demand and never cached on these types.

use glam::Vec3;

use crate::error::{Result, VesselError};

/// A single `(position, radius)` measurement along a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in morphology coordinates.
    pub point: Vec3,
    /// Cross-sectional radius, never negative.
    pub radius: f32,
}

impl Sample {
    /// Creates a new sample.
    pub fn new(point: Vec3, radius: f32) -> Self {
        Self { point, radius }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if !self.point.is_finite() {
            return Err(format!("non-finite position {}", self.point));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(format!("radius {} must be finite and non-negative", self.radius));
        }
        Ok(())
    }
}

/// An ordered run of samples between two branch or end points.
///
/// A section with `n` samples describes `n - 1` segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    index: usize,
    samples: Vec<Sample>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Section {
    /// Creates a root section without children.
    pub fn new(index: usize, samples: Vec<Sample>) -> Self {
        Self {
            index,
            samples,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Sets the parent section index.
    #[must_use]
    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the child section indices.
    #[must_use]
    pub fn with_children(mut self, children: Vec<usize>) -> Self {
        self.children = children;
        self
    }

    /// Returns the index of this section within its morphology.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the samples of this section.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the parent section index, if any.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Returns the child section indices.
    #[must_use]
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Returns true if this section has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the number of segments, zero for degenerate sections.
    #[must_use]
    pub fn number_of_segments(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }

    /// Returns a copy of this section with its samples replaced.
    #[must_use]
    pub fn with_samples(&self, samples: Vec<Sample>) -> Self {
        Self {
            index: self.index,
            samples,
            parent: self.parent,
            children: self.children.clone(),
        }
    }
}

/// A vascular morphology: a named collection of sections.
#[derive(Debug, Clone, PartialEq)]
pub struct Morphology {
    name: String,
    sections: Vec<Section>,
    radii: Vec<f32>,
}

impl Morphology {
    /// Creates a morphology after validating samples and topology.
    pub fn new(name: impl Into<String>, sections: Vec<Section>) -> Result<Self> {
        let count = sections.len();
        for (i, section) in sections.iter().enumerate() {
            if section.index != i {
                return Err(VesselError::InvalidMorphology(format!(
                    "section at position {i} carries index {}",
                    section.index
                )));
            }
            for (j, sample) in section.samples.iter().enumerate() {
                sample.validate().map_err(|reason| {
                    VesselError::InvalidMorphology(format!("section {i}, sample {j}: {reason}"))
                })?;
            }
            let dangling = section
                .parent
                .into_iter()
                .chain(section.children.iter().copied())
                .find(|&k| k >= count || k == i);
            if let Some(k) = dangling {
                return Err(VesselError::InvalidMorphology(format!(
                    "section {i} references invalid section {k}"
                )));
            }
        }

        let radii: Vec<f32> = sections
            .iter()
            .flat_map(|s| s.samples.iter().map(|sample| sample.radius))
            .collect();

        let name = name.into();
        log::debug!(
            "morphology '{name}': {count} sections, {} samples",
            radii.len()
        );

        Ok(Self {
            name,
            sections,
            radii,
        })
    }

    /// Returns the morphology name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sections in insertion order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns a section by index.
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Returns the radii of every sample of every section.
    #[must_use]
    pub fn radii_list(&self) -> &[f32] {
        &self.radii
    }

    /// Returns the root sections.
    pub fn roots(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.is_root())
    }

    /// Returns all samples, section by section.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.sections.iter().flat_map(|s| s.samples.iter())
    }

    /// Returns all segments as consecutive sample pairs, section by section.
    pub fn segments(&self) -> impl Iterator<Item = (&Sample, &Sample)> {
        self.sections
            .iter()
            .flat_map(|s| s.samples.windows(2).map(|w| (&w[0], &w[1])))
    }

    /// Returns the total number of samples.
    #[must_use]
    pub fn number_of_samples(&self) -> usize {
        self.radii.len()
    }

    /// Returns the total number of segments.
    #[must_use]
    pub fn number_of_segments(&self) -> usize {
        self.sections.iter().map(Section::number_of_segments).sum()
    }

    /// Returns the axis-aligned bounding box of all sample positions.
    ///
    /// Returns `None` if the morphology has no samples.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let mut samples = self.samples().peekable();
        samples.peek()?;
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for sample in samples {
            min = min.min(sample.point);
            max = max.max(sample.point);
        }
        Some((min, max))
    }

    /// Returns the center of the bounding box, or the origin when empty.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.bounding_box()
            .map_or(Vec3::ZERO, |(min, max)| (min + max) * 0.5)
    }

    /// Returns a copy of this morphology with every section mapped through `f`.
    ///
    /// Topology is preserved; radii are recollected from the new samples.
    #[must_use]
    pub fn map_sections<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Section) -> Vec<Sample>,
    {
        let sections: Vec<Section> = self
            .sections
            .iter()
            .map(|s| s.with_samples(f(s)))
            .collect();
        let radii = sections
            .iter()
            .flat_map(|s| s.samples.iter().map(|sample| sample.radius))
            .collect();
        Self {
            name: self.name.clone(),
            sections,
            radii,
        }
    }
}
