use vessel_core::{GeometryBackend, Morphology, ObjectHandle, Options, Result};
use vessel_skeleton::{morphology_polylines, section_polyline, Grouping};

use super::{component_name, BuildContext, SkeletonBuilder};

/// Every section is one tube.
///
/// This is the default strategy, and the progressive one the host drives: one
/// component per section.
#[derive(Debug)]
pub struct DisconnectedSectionsBuilder {
    context: BuildContext,
}

impl DisconnectedSectionsBuilder {
    pub fn new(morphology: Morphology, options: Options) -> Self {
        Self {
            context: BuildContext::new(morphology, options),
        }
    }
}

impl SkeletonBuilder for DisconnectedSectionsBuilder {
    fn name(&self) -> &'static str {
        "DisconnectedSectionsBuilder"
    }

    fn options(&self) -> &Options {
        &self.context.options
    }

    fn build_skeleton(&mut self, backend: &mut dyn GeometryBackend) -> Result<()> {
        let builder = self.name();
        let pass = self.context.prepare(backend, builder, Grouping::Sections)?;

        log::info!("Constructing poly-lines");
        let polylines = morphology_polylines(&pass.morphology, Grouping::Sections, &pass.coder)?;

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
            .begin_component(backend, builder, Grouping::Sections, index, total)?;

        if let Some(section) = pass.morphology.section(index) {
            let polylines: Vec<_> = section_polyline(section, index, &pass.coder)?
                .into_iter()
                .collect();
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
