use vessel_core::{GeometryBackend, Morphology, ObjectHandle, Options, Result};
use vessel_skeleton::{morphology_polylines, Grouping};

use super::{BuildContext, Pass, SkeletonBuilder};

// Branches start at their parent's last sample so the tubes touch.
const GROUPING: Grouping = Grouping::Paths {
    attach_to_parent: true,
};

/// The whole morphology as one continuous object.
#[derive(Debug)]
pub struct ConnectedSkeletonBuilder {
    context: BuildContext,
}

impl ConnectedSkeletonBuilder {
    pub fn new(morphology: Morphology, options: Options) -> Self {
        Self {
            context: BuildContext::new(morphology, options),
        }
    }

    fn draw(&mut self, backend: &mut dyn GeometryBackend, pass: &Pass) -> Result<()> {
        log::info!("Constructing poly-lines");
        let polylines = morphology_polylines(&pass.morphology, GROUPING, &pass.coder)?;
        let name = pass.morphology.name().to_string();
        self.context.submit(backend, pass, &name, 0, polylines)
    }
}

impl SkeletonBuilder for ConnectedSkeletonBuilder {
    fn name(&self) -> &'static str {
        "ConnectedSkeletonBuilder"
    }

    fn options(&self) -> &Options {
        &self.context.options
    }

    fn build_skeleton(&mut self, backend: &mut dyn GeometryBackend) -> Result<()> {
        let builder = self.name();
        let pass = self.context.prepare(backend, builder, GROUPING)?;
        self.draw(backend, &pass)
    }

    fn get_number_components(&self) -> usize {
        1
    }

    fn build_component(&mut self, backend: &mut dyn GeometryBackend, index: usize) -> Result<()> {
        let builder = self.name();
        let pass = self
            .context
            .begin_component(backend, builder, GROUPING, index, 1)?;
        self.draw(backend, &pass)?;
        self.context.end_component(pass, 1);
        Ok(())
    }

    fn morphology_objects(&self) -> &[ObjectHandle] {
        &self.context.objects
    }
}
