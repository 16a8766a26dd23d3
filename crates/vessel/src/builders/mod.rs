//! Reconstruction builders.
//!
//! Every strategy runs the same pass:
//!
//! 1. validate the options (no collaborator call happens before this)
//! 2. reset the scene
//! 3. resample / center the working copy of the morphology
//! 4. scan the global metric range and resolve the color coder
//! 5. create the profile curve
//! 6. assemble polylines, adjust their radii and submit them as objects
//!
//! Strategies differ only in how samples are grouped into polylines and how
//! polylines are grouped into objects and progressive components.

mod connected_sections;
mod connected_skeleton;
mod disconnected_sections;
mod disconnected_segments;

pub use connected_sections::ConnectedSectionsBuilder;
pub use connected_skeleton::ConnectedSkeletonBuilder;
pub use disconnected_sections::DisconnectedSectionsBuilder;
pub use disconnected_segments::DisconnectedSegmentsBuilder;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vessel_core::{
    ColorCoding, ColorMapRegistry, ColorMode, DegenerateRangePolicy, GeometryBackend, Morphology,
    ObjectDescriptor, ObjectHandle, Options, Polyline, ProfileHandle, Result, Vec3, VesselError,
};
use vessel_skeleton::{
    apply_radius_policy, center_at_origin, global_range, metric_for, resample_morphology,
    ColorCoder, Grouping,
};

/// Name of the profile curve every object is swept along.
pub const PROFILE_NAME: &str = "bevel";

/// A reconstruction strategy.
///
/// A builder either runs the whole pass at once with
/// [`build_skeleton`](Self::build_skeleton), or one component at a time with
/// [`build_component`](Self::build_component), called once per index in
/// increasing order.
pub trait SkeletonBuilder {
    /// Returns the strategy name.
    fn name(&self) -> &'static str;

    /// Returns the options the builder was created with.
    fn options(&self) -> &Options;

    /// Runs the one-shot pass and stores the created objects.
    fn build_skeleton(&mut self, backend: &mut dyn GeometryBackend) -> Result<()>;

    /// Returns the number of components of a progressive pass.
    fn get_number_components(&self) -> usize;

    /// Builds one component of a progressive pass.
    ///
    /// Component 0 starts the pass and resets the scene.
    fn build_component(&mut self, backend: &mut dyn GeometryBackend, index: usize) -> Result<()>;

    /// Returns the objects created by the current pass.
    fn morphology_objects(&self) -> &[ObjectHandle];
}

/// Resolves the base color of one component.
pub fn component_color(mode: ColorMode, seed: u64, component: usize) -> Vec3 {
    match mode {
        ColorMode::Fixed(color) => color,
        ColorMode::RandomPerComponent => {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(component as u64));
            Vec3::new(rng.gen(), rng.gen(), rng.gen())
        }
        ColorMode::BlackAndWhitePerComponent => {
            if component % 2 == 0 {
                Vec3::ZERO
            } else {
                Vec3::ONE
            }
        }
    }
}

/// Resolves the color coder for one pass.
///
/// The metric range is scanned over the whole morphology. An empty range
/// either falls back to a single color or aborts the pass, as configured.
pub fn resolve_coder(
    morphology: &Morphology,
    grouping: Grouping,
    options: &Options,
) -> Result<ColorCoder> {
    let Some(metric) = metric_for(options.color_coding) else {
        return Ok(match options.color_coding {
            ColorCoding::Alternating => ColorCoder::Alternating,
            _ => ColorCoder::Single,
        });
    };

    match global_range(morphology, grouping, metric) {
        Some(range) if !range.is_degenerate() => {
            log::debug!(
                "{metric:?} range [{}, {}] over '{}'",
                range.minimum,
                range.maximum,
                morphology.name()
            );
            Ok(ColorCoder::Metric {
                metric,
                range,
                resolution: options.color_map_resolution,
            })
        }
        range => {
            let (minimum, maximum) = range.map_or((0.0, 0.0), |r| (r.minimum, r.maximum));
            match options.degenerate_range {
                DegenerateRangePolicy::Abort => {
                    Err(VesselError::DegenerateRange { minimum, maximum })
                }
                DegenerateRangePolicy::FallBackToSingleColor => {
                    log::warn!(
                        "{metric:?} range [{minimum}, {maximum}] is degenerate, using a single color"
                    );
                    Ok(ColorCoder::Single)
                }
            }
        }
    }
}

/// Per-pass state, computed once when a pass starts.
#[derive(Debug)]
pub(crate) struct Pass {
    pub morphology: Morphology,
    pub coder: ColorCoder,
    pub palette: Vec<Vec3>,
    pub profile: ProfileHandle,
}

/// State shared by every builder.
#[derive(Debug)]
pub(crate) struct BuildContext {
    pub morphology: Morphology,
    pub options: Options,
    pub objects: Vec<ObjectHandle>,
    pass: Option<Pass>,
    next_component: usize,
}

impl BuildContext {
    pub fn new(morphology: Morphology, options: Options) -> Self {
        Self {
            morphology,
            options,
            objects: Vec::new(),
            pass: None,
            next_component: 0,
        }
    }

    /// Starts a pass: validation, scene reset, preprocessing, coder, profile.
    pub fn prepare(
        &mut self,
        backend: &mut dyn GeometryBackend,
        builder: &str,
        grouping: Grouping,
    ) -> Result<Pass> {
        log::info!("Building skeleton: {builder}");

        self.options.validate()?;
        let palette = ColorMapRegistry::new()
            .palette(&self.options.color_map, self.options.color_map_resolution)?;

        log::info!("Clearing scene");
        backend.clear_scene();
        backend.clear_scene_materials();
        self.objects.clear();
        self.pass = None;
        self.next_component = 0;

        let mut morphology = if self.options.adaptive_resampling {
            resample_morphology(&self.morphology)
        } else {
            self.morphology.clone()
        };
        if !self.options.global_coordinates {
            morphology = center_at_origin(&morphology);
        }

        let coder = resolve_coder(&morphology, grouping, &self.options)?;

        let profile = backend.create_profile_curve(1.0, self.options.bevel_sides, PROFILE_NAME)?;

        Ok(Pass {
            morphology,
            coder,
            palette,
            profile,
        })
    }

    /// Adjusts radii and creates one object from `polylines`.
    ///
    /// Empty batches create nothing.
    pub fn submit(
        &mut self,
        backend: &mut dyn GeometryBackend,
        pass: &Pass,
        name: &str,
        component: usize,
        mut polylines: Vec<Polyline>,
    ) -> Result<()> {
        if polylines.is_empty() {
            log::info!("Skipping object '{name}': no poly-lines");
            return Ok(());
        }

        log::info!("Adjusting radii");
        apply_radius_policy(&mut polylines, self.options.radius_policy);

        log::info!("Drawing object '{name}'");
        let descriptor = ObjectDescriptor {
            name,
            polylines: &polylines,
            color: component_color(self.options.color_mode, self.options.random_seed, component),
            material: self.options.material,
            profile: &pass.profile,
            palette: &pass.palette,
        };
        let handle = backend.create_geometry_object(&descriptor)?;
        self.objects.push(handle);
        Ok(())
    }

    /// Checks the component cursor and starts the pass on the first component.
    ///
    /// Returns the pass state the component is built against.
    pub fn begin_component(
        &mut self,
        backend: &mut dyn GeometryBackend,
        builder: &str,
        grouping: Grouping,
        index: usize,
        total: usize,
    ) -> Result<Pass> {
        if index >= total {
            return Err(VesselError::ComponentOutOfRange { index, total });
        }
        // Without a pass in flight, only component 0 may start a new one.
        let expected = if self.pass.is_some() {
            self.next_component
        } else {
            0
        };
        if index != expected {
            return Err(VesselError::ComponentOutOfOrder {
                expected,
                actual: index,
            });
        }
        match self.pass.take() {
            Some(pass) => Ok(pass),
            None => self.prepare(backend, builder, grouping),
        }
    }

    /// Stores the pass back after a component was built.
    pub fn end_component(&mut self, pass: Pass, total: usize) {
        self.next_component += 1;
        if self.next_component < total {
            self.pass = Some(pass);
        } else {
            log::info!("All {total} components built");
        }
    }
}

/// Object name for one component of a morphology.
pub(crate) fn component_name(morphology: &Morphology, kind: &str, index: usize) -> String {
    format!("{}_{kind}_{index}", morphology.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vessel_core::{Sample, Section};

    fn morphology(radii: &[&[f32]]) -> Morphology {
        let sections = radii
            .iter()
            .enumerate()
            .map(|(i, rs)| {
                let samples = rs
                    .iter()
                    .enumerate()
                    .map(|(j, &r)| Sample::new(Vec3::new(j as f32, i as f32, 0.0), r))
                    .collect();
                Section::new(i, samples)
            })
            .collect();
        Morphology::new("m", sections).unwrap()
    }

    #[test]
    fn test_component_colors() {
        let gray = Vec3::splat(0.5);
        assert_eq!(component_color(ColorMode::Fixed(gray), 0, 3), gray);
        assert_eq!(
            component_color(ColorMode::BlackAndWhitePerComponent, 0, 0),
            Vec3::ZERO
        );
        assert_eq!(
            component_color(ColorMode::BlackAndWhitePerComponent, 0, 1),
            Vec3::ONE
        );
    }

    #[test]
    fn test_random_colors_are_seeded() {
        let a = component_color(ColorMode::RandomPerComponent, 7, 2);
        let b = component_color(ColorMode::RandomPerComponent, 7, 2);
        assert_eq!(a, b);
        assert!(a.min_element() >= 0.0 && a.max_element() < 1.0);
    }

    #[test]
    fn test_resolve_non_metric_coders() {
        let m = morphology(&[&[1.0, 1.0]]);
        let mut options = Options::default();
        assert_eq!(
            resolve_coder(&m, Grouping::Segments, &options).unwrap(),
            ColorCoder::Single
        );
        options.color_coding = ColorCoding::Alternating;
        assert_eq!(
            resolve_coder(&m, Grouping::Segments, &options).unwrap(),
            ColorCoder::Alternating
        );
    }

    #[test]
    fn test_resolve_degenerate_range() {
        let m = morphology(&[&[2.0, 2.0], &[2.0, 2.0]]);
        let mut options = Options {
            color_coding: ColorCoding::Radius,
            ..Options::default()
        };
        assert_eq!(
            resolve_coder(&m, Grouping::Sections, &options).unwrap(),
            ColorCoder::Single
        );

        options.degenerate_range = DegenerateRangePolicy::Abort;
        assert!(matches!(
            resolve_coder(&m, Grouping::Sections, &options),
            Err(VesselError::DegenerateRange { .. })
        ));
    }

    #[test]
    fn test_resolve_metric_uses_global_range() {
        let m = morphology(&[&[1.0, 2.0], &[5.0, 6.0]]);
        let options = Options {
            color_coding: ColorCoding::Radius,
            ..Options::default()
        };
        match resolve_coder(&m, Grouping::Sections, &options).unwrap() {
            ColorCoder::Metric { range, resolution, .. } => {
                assert_eq!((range.minimum, range.maximum), (1.0, 6.0));
                assert_eq!(resolution, 10);
            }
            other => panic!("unexpected coder {other:?}"),
        }
    }
}
