//! Coordinate transforms applied before assembly.

use vessel_core::{Morphology, Sample, Vec3};

/// Returns a copy of the morphology translated by `offset`.
pub fn translate(morphology: &Morphology, offset: Vec3) -> Morphology {
    morphology.map_sections(|section| {
        section
            .samples()
            .iter()
            .map(|s| Sample::new(s.point + offset, s.radius))
            .collect()
    })
}

/// Returns a copy of the morphology with its bounding box centered at the origin.
pub fn center_at_origin(morphology: &Morphology) -> Morphology {
    let center = morphology.center();
    log::debug!("centering '{}' around {center}", morphology.name());
    translate(morphology, -center)
}
