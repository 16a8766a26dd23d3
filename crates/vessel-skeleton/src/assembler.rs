//! Polyline assembly.
//!
//! Walks the sections of a morphology and groups their samples into color-tagged
//! polylines. Output order is deterministic: section order, then sample order
//! within a section (paths follow the order in which [`connected_paths`] finds
//! them).
//!
//! Sections with fewer than two samples produce no polylines; they are skipped
//! with an informational log entry, not an error.

use std::collections::VecDeque;

use vessel_core::{Morphology, Polyline, Result, Sample, Section};

use crate::color_coding::{ColorCoder, MetricRange};
use crate::segment::SegmentMetric;

/// Distance under which two junction samples count as the same point.
pub const JUNCTION_EPSILON: f32 = 1e-6;

/// How samples are grouped into polylines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    /// One two-sample polyline per segment.
    Segments,
    /// One polyline per section.
    Sections,
    /// One polyline per connected path of sections.
    ///
    /// With `attach_to_parent`, a path that starts at a branch also starts at
    /// its parent's last sample.
    Paths { attach_to_parent: bool },
}

/// A chain of sections joined end to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPath {
    /// Index of the section the arbor containing this path starts from.
    pub arbor: usize,
    /// Section indices in walking order.
    pub sections: Vec<usize>,
}

/// Builds one polyline per segment of a section.
pub fn segment_polylines(section: &Section, coder: &ColorCoder) -> Result<Vec<Polyline>> {
    if section.samples().len() < 2 {
        log::info!(
            "skipping section {}: {} sample(s)",
            section.index(),
            section.samples().len()
        );
        return Ok(Vec::new());
    }

    section
        .samples()
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let color_index = coder.color_index(i, pair)?;
            Ok(Polyline::new(pair.to_vec(), color_index))
        })
        .collect()
}

/// Builds a single polyline covering every sample of a section.
///
/// `ordinal` is the section's position in its enumeration and drives
/// alternating colors.
pub fn section_polyline(
    section: &Section,
    ordinal: usize,
    coder: &ColorCoder,
) -> Result<Option<Polyline>> {
    let samples = section.samples();
    if samples.len() < 2 {
        log::info!(
            "skipping section {}: {} sample(s)",
            section.index(),
            samples.len()
        );
        return Ok(None);
    }
    let color_index = coder.color_index(ordinal, samples)?;
    Ok(Some(Polyline::new(samples.to_vec(), color_index)))
}

/// Splits the section graph into paths.
///
/// Each root starts an arbor. A path continues through the first unvisited
/// child of its last section; every other child starts a new path. Sections
/// not reachable from any root start arbors of their own. Every section
/// belongs to exactly one path, so cycles terminate.
pub fn connected_paths(morphology: &Morphology) -> Vec<SectionPath> {
    let sections = morphology.sections();
    let mut visited = vec![false; sections.len()];
    let mut paths = Vec::new();

    let starts = morphology
        .roots()
        .map(Section::index)
        .chain(0..sections.len());

    for arbor in starts {
        if visited[arbor] {
            continue;
        }
        let mut pending = VecDeque::from([arbor]);
        while let Some(start) = pending.pop_front() {
            if visited[start] {
                continue;
            }
            let mut path = Vec::new();
            let mut current = Some(start);
            while let Some(index) = current.take() {
                visited[index] = true;
                path.push(index);
                for &child in sections[index].children() {
                    if visited[child] {
                        continue;
                    }
                    if current.is_none() {
                        current = Some(child);
                    } else {
                        pending.push_back(child);
                    }
                }
            }
            paths.push(SectionPath {
                arbor,
                sections: path,
            });
        }
    }

    paths
}

/// Concatenates the samples of a path, merging coincident junction samples.
pub fn path_samples(
    morphology: &Morphology,
    path: &SectionPath,
    attach_to_parent: bool,
) -> Vec<Sample> {
    let mut samples: Vec<Sample> = Vec::new();

    if attach_to_parent {
        let anchor = path
            .sections
            .first()
            .and_then(|&i| morphology.section(i))
            .and_then(Section::parent)
            .and_then(|p| morphology.section(p))
            .and_then(|parent| parent.samples().last());
        if let Some(anchor) = anchor {
            samples.push(*anchor);
        }
    }

    for section in path.sections.iter().filter_map(|&i| morphology.section(i)) {
        for sample in section.samples() {
            let duplicate = samples
                .last()
                .is_some_and(|last| last.point.distance(sample.point) < JUNCTION_EPSILON);
            if !duplicate {
                samples.push(*sample);
            }
        }
    }

    samples
}

/// Builds the polyline of one path.
pub fn path_polyline(
    morphology: &Morphology,
    path: &SectionPath,
    ordinal: usize,
    attach_to_parent: bool,
    coder: &ColorCoder,
) -> Result<Option<Polyline>> {
    let samples = path_samples(morphology, path, attach_to_parent);
    if samples.len() < 2 {
        log::info!(
            "skipping path starting at section {:?}: {} sample(s)",
            path.sections.first(),
            samples.len()
        );
        return Ok(None);
    }
    let color_index = coder.color_index(ordinal, &samples)?;
    Ok(Some(Polyline::new(samples, color_index)))
}

/// Builds every polyline of a morphology.
pub fn morphology_polylines(
    morphology: &Morphology,
    grouping: Grouping,
    coder: &ColorCoder,
) -> Result<Vec<Polyline>> {
    let mut polylines = Vec::new();
    match grouping {
        Grouping::Segments => {
            for section in morphology.sections() {
                polylines.extend(segment_polylines(section, coder)?);
            }
        }
        Grouping::Sections => {
            for (i, section) in morphology.sections().iter().enumerate() {
                polylines.extend(section_polyline(section, i, coder)?);
            }
        }
        Grouping::Paths { attach_to_parent } => {
            for (i, path) in connected_paths(morphology).iter().enumerate() {
                polylines.extend(path_polyline(morphology, path, i, attach_to_parent, coder)?);
            }
        }
    }
    Ok(polylines)
}

/// Values of a metric for every primitive the grouping produces.
pub fn metric_values(morphology: &Morphology, grouping: Grouping, metric: SegmentMetric) -> Vec<f32> {
    match grouping {
        Grouping::Segments => morphology
            .segments()
            .map(|(a, b)| metric.evaluate(a, b))
            .collect(),
        Grouping::Sections => morphology
            .sections()
            .iter()
            .filter(|s| s.samples().len() >= 2)
            .map(|s| metric.aggregate(s.samples()))
            .collect(),
        Grouping::Paths { attach_to_parent } => connected_paths(morphology)
            .iter()
            .map(|path| path_samples(morphology, path, attach_to_parent))
            .filter(|samples| samples.len() >= 2)
            .map(|samples| metric.aggregate(&samples))
            .collect(),
    }
}

/// Global range of a metric over the whole morphology.
///
/// Radius ranges come from every sample radius; the other metrics are
/// scanned over the primitives of the grouping. Returns `None` when there is
/// nothing to scan.
pub fn global_range(
    morphology: &Morphology,
    grouping: Grouping,
    metric: SegmentMetric,
) -> Option<MetricRange> {
    match metric {
        SegmentMetric::AverageRadius => MetricRange::scan(morphology.radii_list().iter().copied()),
        _ => MetricRange::scan(metric_values(morphology, grouping, metric)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vessel_core::Vec3;

    fn straight(index: usize, start: Vec3, radii: &[f32]) -> Section {
        let samples = radii
            .iter()
            .enumerate()
            .map(|(i, &r)| Sample::new(start + Vec3::new(i as f32, 0.0, 0.0), r))
            .collect();
        Section::new(index, samples)
    }

    fn metric_coder(range: MetricRange) -> ColorCoder {
        ColorCoder::Metric {
            metric: SegmentMetric::AverageRadius,
            range,
            resolution: 10,
        }
    }

    /// 0 -> (1, 2), 1 -> 3
    fn tree() -> Morphology {
        let root = straight(0, Vec3::ZERO, &[1.0, 1.0, 1.0]).with_children(vec![1, 2]);
        let a = straight(1, Vec3::new(2.0, 0.0, 0.0), &[1.0, 1.0])
            .with_parent(0)
            .with_children(vec![3]);
        let b = Section::new(
            2,
            vec![
                Sample::new(Vec3::new(2.0, 1.0, 0.0), 0.5),
                Sample::new(Vec3::new(2.0, 2.0, 0.0), 0.5),
            ],
        )
        .with_parent(0);
        let c = straight(3, Vec3::new(3.0, 0.0, 0.0), &[1.0, 1.0, 1.0]).with_parent(1);
        Morphology::new("tree", vec![root, a, b, c]).unwrap()
    }

    #[test]
    fn test_segments_per_section() {
        let section = straight(0, Vec3::ZERO, &[1.0; 5]);
        let polylines = segment_polylines(&section, &ColorCoder::Single).unwrap();
        assert_eq!(polylines.len(), 4);
        assert!(polylines.iter().all(|p| p.len() == 2 && p.color_index() == 0));
        assert_eq!(polylines[1].samples()[0], section.samples()[1]);
    }

    #[test]
    fn test_alternating_segments() {
        let section = straight(0, Vec3::ZERO, &[1.0; 5]);
        let polylines = segment_polylines(&section, &ColorCoder::Alternating).unwrap();
        let slots: Vec<usize> = polylines.iter().map(Polyline::color_index).collect();
        assert_eq!(slots, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_section_polyline_keeps_all_samples() {
        let section = straight(0, Vec3::ZERO, &[1.0; 6]);
        let polyline = section_polyline(&section, 0, &ColorCoder::Single)
            .unwrap()
            .unwrap();
        assert_eq!(polyline.len(), 6);
    }

    #[test]
    fn test_degenerate_sections_skipped() {
        let single = straight(0, Vec3::ZERO, &[1.0]);
        let empty = straight(0, Vec3::ZERO, &[]);
        for section in [&single, &empty] {
            assert!(segment_polylines(section, &ColorCoder::Single)
                .unwrap()
                .is_empty());
            assert!(section_polyline(section, 0, &ColorCoder::Single)
                .unwrap()
                .is_none());
        }
    }

    #[test]
    fn test_global_radius_range_across_sections() {
        let first = straight(0, Vec3::ZERO, &[1.0, 2.0]);
        let second = straight(1, Vec3::new(0.0, 5.0, 0.0), &[5.0, 6.0]);
        let morphology = Morphology::new("m", vec![first, second]).unwrap();

        let range = global_range(&morphology, Grouping::Segments, SegmentMetric::AverageRadius)
            .unwrap();
        assert_eq!(range, MetricRange { minimum: 1.0, maximum: 6.0 });

        let polylines =
            morphology_polylines(&morphology, Grouping::Segments, &metric_coder(range)).unwrap();
        // ceil(10 * 1.5 / 5) - 1 = 2 and ceil(10 * 5.5 / 5) - 1 = 10 -> 9
        let slots: Vec<usize> = polylines.iter().map(Polyline::color_index).collect();
        assert_eq!(slots, vec![2, 9]);
    }

    #[test]
    fn test_morphology_order_and_counts() {
        let morphology = tree();
        let segments =
            morphology_polylines(&morphology, Grouping::Segments, &ColorCoder::Single).unwrap();
        assert_eq!(segments.len(), morphology.number_of_segments());
        assert_eq!(segments[0].samples()[0], morphology.sections()[0].samples()[0]);

        let sections =
            morphology_polylines(&morphology, Grouping::Sections, &ColorCoder::Alternating)
                .unwrap();
        assert_eq!(sections.len(), 4);
        let slots: Vec<usize> = sections.iter().map(Polyline::color_index).collect();
        assert_eq!(slots, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_connected_paths() {
        let paths = connected_paths(&tree());
        assert_eq!(
            paths,
            vec![
                SectionPath { arbor: 0, sections: vec![0, 1, 3] },
                SectionPath { arbor: 0, sections: vec![2] },
            ]
        );
    }

    #[test]
    fn test_path_samples_merge_junctions() {
        let morphology = tree();
        let paths = connected_paths(&morphology);
        // 3 + 2 + 3 samples with two coincident junctions
        assert_eq!(path_samples(&morphology, &paths[0], false).len(), 6);
        assert_eq!(path_samples(&morphology, &paths[1], false).len(), 2);

        let attached = path_samples(&morphology, &paths[1], true);
        assert_eq!(attached.len(), 3);
        assert_eq!(attached[0].point, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_cycle_terminates() {
        let a = straight(0, Vec3::ZERO, &[1.0, 1.0]).with_parent(1).with_children(vec![1]);
        let b = straight(1, Vec3::X, &[1.0, 1.0]).with_parent(0).with_children(vec![0]);
        let morphology = Morphology::new("loop", vec![a, b]).unwrap();
        let paths = connected_paths(&morphology);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].sections, vec![0, 1]);
    }

    #[test]
    fn test_section_metric_values() {
        let morphology = tree();
        let lengths = metric_values(&morphology, Grouping::Sections, SegmentMetric::Length);
        assert_eq!(lengths, vec![2.0, 1.0, 1.0, 2.0]);

        let path_lengths = metric_values(
            &morphology,
            Grouping::Paths { attach_to_parent: false },
            SegmentMetric::Length,
        );
        assert_eq!(path_lengths, vec![5.0, 1.0]);
    }
}
