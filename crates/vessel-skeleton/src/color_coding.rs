//! Color coding: mapping primitives to palette slots.
//!
//! Metric-based coding needs the global range of the metric over the whole
//! morphology. The range is scanned once per pass and shared by every
//! polyline; per-section ranges would make colors incomparable across
//! sections.

use vessel_core::{ColorCoding, Result, Sample, VesselError};

use crate::segment::SegmentMetric;

/// Maps `value` into one of `resolution` buckets.
///
/// Computes `ceil(resolution * value / (maximum - minimum)) - 1` and clamps
/// it into `[0, resolution - 1]`, so values at or past the maximum land in the
/// last bucket and small values in the first.
///
/// Fails with [`VesselError::DegenerateRange`] unless `maximum > minimum`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn bucket_index(value: f32, minimum: f32, maximum: f32, resolution: usize) -> Result<usize> {
    if minimum.is_nan() || maximum.is_nan() || maximum <= minimum {
        return Err(VesselError::DegenerateRange { minimum, maximum });
    }
    let last = resolution.saturating_sub(1);
    let raw = (resolution as f32 * value / (maximum - minimum)).ceil() - 1.0;
    if raw.is_nan() || raw <= 0.0 {
        return Ok(0);
    }
    Ok((raw as usize).min(last))
}

/// Global `[minimum, maximum]` of a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub minimum: f32,
    pub maximum: f32,
}

impl MetricRange {
    /// Scans values for their extrema. Returns `None` for an empty input.
    pub fn scan(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        values.into_iter().fold(None, |range, v| {
            Some(match range {
                None => Self {
                    minimum: v,
                    maximum: v,
                },
                Some(r) => Self {
                    minimum: r.minimum.min(v),
                    maximum: r.maximum.max(v),
                },
            })
        })
    }

    /// Returns true if the range cannot be bucketed.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.minimum.is_nan() || self.maximum.is_nan() || self.maximum <= self.minimum
    }
}

/// Returns the segment metric behind a metric-based coding.
#[must_use]
pub fn metric_for(coding: ColorCoding) -> Option<SegmentMetric> {
    match coding {
        ColorCoding::SingleColor | ColorCoding::Alternating => None,
        ColorCoding::Radius => Some(SegmentMetric::AverageRadius),
        ColorCoding::Length => Some(SegmentMetric::Length),
        ColorCoding::SurfaceArea => Some(SegmentMetric::SurfaceArea),
        ColorCoding::Volume => Some(SegmentMetric::Volume),
    }
}

/// A resolved coloring strategy, ready to tag polylines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorCoder {
    /// Every polyline gets slot 0.
    Single,
    /// Slot is the primitive's ordinal modulo 2.
    Alternating,
    /// Slot is the bucket of the aggregated metric within the global range.
    Metric {
        metric: SegmentMetric,
        range: MetricRange,
        resolution: usize,
    },
}

impl ColorCoder {
    /// Returns the palette slot of a primitive.
    ///
    /// `ordinal` is the primitive's position within its enumeration and
    /// `samples` the run of samples it covers.
    pub fn color_index(&self, ordinal: usize, samples: &[Sample]) -> Result<usize> {
        match *self {
            Self::Single => Ok(0),
            Self::Alternating => Ok(ordinal % 2),
            Self::Metric {
                metric,
                range,
                resolution,
            } => bucket_index(
                metric.aggregate(samples),
                range.minimum,
                range.maximum,
                resolution,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(bucket_index(0.0, 0.0, 10.0, 10).unwrap(), 0);
        assert_eq!(bucket_index(10.0, 0.0, 10.0, 10).unwrap(), 9);
        assert_eq!(bucket_index(25.0, 0.0, 10.0, 10).unwrap(), 9);
        assert_eq!(bucket_index(1.0, 0.0, 10.0, 10).unwrap(), 0);
        assert_eq!(bucket_index(1.5, 0.0, 10.0, 10).unwrap(), 1);
        assert_eq!(bucket_index(5.0, 0.0, 10.0, 10).unwrap(), 4);
    }

    #[test]
    fn test_negative_raw_index_clamps_to_zero() {
        assert_eq!(bucket_index(-3.0, 0.0, 10.0, 10).unwrap(), 0);
        assert_eq!(bucket_index(0.001, 0.0, 10.0, 1000).unwrap(), 0);
    }

    #[test]
    fn test_degenerate_range() {
        assert!(matches!(
            bucket_index(1.0, 2.0, 2.0, 10),
            Err(VesselError::DegenerateRange { .. })
        ));
        assert!(bucket_index(1.0, 3.0, 2.0, 10).is_err());
        assert!(bucket_index(1.0, f32::NAN, 2.0, 10).is_err());
    }

    #[test]
    fn test_scan() {
        let range = MetricRange::scan([3.0, 1.0, 6.0, 2.0]).unwrap();
        assert_eq!(range.minimum, 1.0);
        assert_eq!(range.maximum, 6.0);
        assert!(!range.is_degenerate());
        assert!(MetricRange::scan(std::iter::empty()).is_none());
        assert!(MetricRange::scan([4.0]).unwrap().is_degenerate());
    }

    #[test]
    fn test_metric_for() {
        assert_eq!(metric_for(ColorCoding::SingleColor), None);
        assert_eq!(metric_for(ColorCoding::Alternating), None);
        assert_eq!(
            metric_for(ColorCoding::Radius),
            Some(SegmentMetric::AverageRadius)
        );
        assert_eq!(metric_for(ColorCoding::Volume), Some(SegmentMetric::Volume));
    }

    #[test]
    fn test_alternating_coder() {
        let coder = ColorCoder::Alternating;
        let slots: Vec<usize> = (0..4).map(|i| coder.color_index(i, &[]).unwrap()).collect();
        assert_eq!(slots, vec![0, 1, 0, 1]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bucket_stays_in_range(
            value in -100.0f32..1000.0,
            minimum in 0.0f32..50.0,
            span in 0.01f32..100.0,
            resolution in 1usize..64,
        ) {
            let index = bucket_index(value, minimum, minimum + span, resolution).unwrap();
            prop_assert!(index < resolution);
        }

        #[test]
        fn bucket_is_monotonic(
            a in 0.0f32..100.0,
            b in 0.0f32..100.0,
            span in 0.01f32..100.0,
            resolution in 1usize..64,
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low_index = bucket_index(low, 0.0, span, resolution).unwrap();
            let high_index = bucket_index(high, 0.0, span, resolution).unwrap();
            prop_assert!(low_index <= high_index);
        }
    }
}
