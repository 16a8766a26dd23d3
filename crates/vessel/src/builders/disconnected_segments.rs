use vessel_core::{GeometryBackend, Morphology, ObjectHandle, Options, Polyline, Result};
use vessel_skeleton::{segment_polylines, Grouping};

use super::{component_name, BuildContext, SkeletonBuilder};

/// Every segment is an independent tube.
///
/// The one-shot pass draws all segments as a single object. Progressive
/// passes draw the segments of one section per component.
#[derive(Debug)]
pub struct DisconnectedSegmentsBuilder {
    context: BuildContext,
}

impl DisconnectedSegmentsBuilder {
    pub fn new(morphology: Morphology, options: Options) -> Self {
        Self {
            context: BuildContext::new(morphology, options),
        }
    }
}

impl SkeletonBuilder for DisconnectedSegmentsBuilder {
    fn name(&self) -> &'static str {
        "DisconnectedSegmentsBuilder"
    }

    fn options(&self) -> &Options {
        &self.context.options
    }

    fn build_skeleton(&mut self, backend: &mut dyn GeometryBackend) -> Result<()> {
        let builder = self.name();
        let pass = self.context.prepare(backend, builder, Grouping::Segments)?;

        log::info!("Constructing poly-lines");
        let mut polylines: Vec<Polyline> = Vec::new();
        for section in pass.morphology.sections() {
            polylines.extend(segment_polylines(section, &pass.coder)?);
        }

        let name = pass.morphology.name().to_string();
        self.context.submit(backend, &pass, &name, 0, polylines)
    }

    fn get_number_components(&self) -> usize {
        self.context.morphology.sections().len()
    }

    fn build_component(&mut self, backend: &mut dyn GeometryBackend, index: usize) -> Result<()> {
        let total = self.get_number_components();
        let builder = self.name();
        let pass = self
            .context
            .begin_component(backend, builder, Grouping::Segments, index, total)?;

        if let Some(section) = pass.morphology.section(index) {
            let polylines = segment_polylines(section, &pass.coder)?;
            let name = component_name(&pass.morphology, "section", index);
            self.context.submit(backend, &pass, &name, index, polylines)?;
        }

        self.context.end_component(pass, total);
        Ok(())
    }

    fn morphology_objects(&self) -> &[ObjectHandle] {
        &self.context.objects
    }
}
