//! Adaptive resampling of section samples.
//!
//! Densely sampled vessels produce overlapping tube segments. Resampling drops
//! every interior sample that lies closer to the last kept sample than the sum
//! of both radii. The first and last sample of a section are always kept, so
//! junctions between sections stay intact.

use vessel_core::{Morphology, Sample};

/// Resamples one run of samples.
pub fn resample_adaptively(samples: &[Sample]) -> Vec<Sample> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Vec::new();
    };
    if samples.len() <= 2 {
        return samples.to_vec();
    }

    let mut kept = vec![*first];
    let mut anchor = *first;
    for sample in &samples[1..samples.len() - 1] {
        if anchor.point.distance(sample.point) >= anchor.radius + sample.radius {
            kept.push(*sample);
            anchor = *sample;
        }
    }
    kept.push(*last);
    kept
}

/// Returns a copy of the morphology with every section resampled.
pub fn resample_morphology(morphology: &Morphology) -> Morphology {
    let resampled = morphology.map_sections(|section| resample_adaptively(section.samples()));
    log::info!(
        "resampled '{}': {} -> {} samples",
        morphology.name(),
        morphology.number_of_samples(),
        resampled.number_of_samples()
    );
    resampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use vessel_core::{Section, Vec3};

    fn along_x(xs: &[f32], radius: f32) -> Vec<Sample> {
        xs.iter()
            .map(|&x| Sample::new(Vec3::new(x, 0.0, 0.0), radius))
            .collect()
    }

    #[test]
    fn test_overlapping_samples_dropped() {
        let samples = along_x(&[0.0, 0.5, 1.0, 2.5, 3.0, 4.0], 0.5);
        let kept: Vec<f32> = resample_adaptively(&samples)
            .iter()
            .map(|s| s.point.x)
            .collect();
        assert_eq!(kept, vec![0.0, 1.0, 2.5, 4.0]);
    }

    #[test]
    fn test_endpoints_always_kept() {
        let samples = along_x(&[0.0, 0.1, 0.2], 10.0);
        let kept = resample_adaptively(&samples);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], samples[0]);
        assert_eq!(kept[1], samples[2]);
    }

    #[test]
    fn test_short_runs_unchanged() {
        assert!(resample_adaptively(&[]).is_empty());
        let one = along_x(&[1.0], 1.0);
        assert_eq!(resample_adaptively(&one), one);
        let two = along_x(&[0.0, 0.01], 1.0);
        assert_eq!(resample_adaptively(&two), two);
    }

    #[test]
    fn test_morphology_topology_preserved() {
        let root = Section::new(0, along_x(&[0.0, 0.1, 0.2, 5.0], 1.0)).with_children(vec![1]);
        let child = Section::new(1, along_x(&[5.0, 9.0], 1.0)).with_parent(0);
        let morphology = Morphology::new("m", vec![root, child]).unwrap();

        let resampled = resample_morphology(&morphology);
        assert_eq!(resampled.number_of_samples(), 4);
        assert_eq!(resampled.sections()[0].children(), &[1]);
        assert_eq!(resampled.sections()[1].parent(), Some(0));
    }
}
