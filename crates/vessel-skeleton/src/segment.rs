//! Segment attributes.
//!
//! A segment is the frustum spanned by two consecutive samples. Every
//! attribute is a pure function of the two `(point, radius)` pairs; coincident
//! points give a zero-length segment, not an error.

use std::f32::consts::PI;

use vessel_core::Sample;

/// Average of the two sample radii.
#[must_use]
pub fn average_radius(first: &Sample, second: &Sample) -> f32 {
    (first.radius + second.radius) * 0.5
}

/// Euclidean distance between the two sample positions.
#[must_use]
pub fn length(first: &Sample, second: &Sample) -> f32 {
    first.point.distance(second.point)
}

/// Lateral surface area of the frustum between the two samples.
///
/// `π (r1 + r2) √((r1 - r2)² + h²)`
#[must_use]
pub fn surface_area(first: &Sample, second: &Sample) -> f32 {
    let h = length(first, second);
    let dr = first.radius - second.radius;
    PI * (first.radius + second.radius) * dr.hypot(h)
}

/// Volume of the frustum between the two samples.
///
/// `π h (r1² + r1 r2 + r2²) / 3`
#[must_use]
pub fn volume(first: &Sample, second: &Sample) -> f32 {
    let h = length(first, second);
    let (r1, r2) = (first.radius, second.radius);
    PI * h * (r1 * r1 + r1 * r2 + r2 * r2) / 3.0
}

/// A scalar segment attribute usable for color coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentMetric {
    AverageRadius,
    Length,
    SurfaceArea,
    Volume,
}

impl SegmentMetric {
    /// Evaluates the metric on one segment.
    #[must_use]
    pub fn evaluate(self, first: &Sample, second: &Sample) -> f32 {
        match self {
            Self::AverageRadius => average_radius(first, second),
            Self::Length => length(first, second),
            Self::SurfaceArea => surface_area(first, second),
            Self::Volume => volume(first, second),
        }
    }

    /// Aggregates the metric over every segment of a sample run.
    ///
    /// Radius is averaged over the segments, the extensive metrics are summed.
    /// Runs with fewer than two samples aggregate to zero.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn aggregate(self, samples: &[Sample]) -> f32 {
        let values = samples.windows(2).map(|w| self.evaluate(&w[0], &w[1]));
        match self {
            Self::AverageRadius => {
                let count = samples.len().saturating_sub(1);
                if count == 0 {
                    0.0
                } else {
                    values.sum::<f32>() / count as f32
                }
            }
            Self::Length | Self::SurfaceArea | Self::Volume => values.sum(),
        }
    }
}
