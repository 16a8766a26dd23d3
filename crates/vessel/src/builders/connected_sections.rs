use vessel_core::{GeometryBackend, Morphology, ObjectHandle, Options, Polyline, Result};
use vessel_skeleton::{connected_paths, path_polyline, Grouping, SectionPath};

use super::{component_name, BuildContext, Pass, SkeletonBuilder};

const GROUPING: Grouping = Grouping::Paths {
    attach_to_parent: false,
};

/// Paths grouped by arbor, each path paired with its global ordinal.
fn arbors(morphology: &Morphology) -> Vec<Vec<(usize, SectionPath)>> {
    let mut arbors: Vec<Vec<(usize, SectionPath)>> = Vec::new();
    for (ordinal, path) in connected_paths(morphology).into_iter().enumerate() {
        match arbors.last_mut() {
            Some(arbor) if arbor.first().is_some_and(|(_, p)| p.arbor == path.arbor) => {
                arbor.push((ordinal, path));
            }
            _ => arbors.push(vec![(ordinal, path)]),
        }
    }
    arbors
}

/// Sections stay joined within an arbor; one object per arbor.
#[derive(Debug)]
pub struct ConnectedSectionsBuilder {
    context: BuildContext,
}

impl ConnectedSectionsBuilder {
    pub fn new(morphology: Morphology, options: Options) -> Self {
        Self {
            context: BuildContext::new(morphology, options),
        }
    }

    fn build_arbor(
        &mut self,
        backend: &mut dyn GeometryBackend,
        pass: &Pass,
        index: usize,
        arbor: &[(usize, SectionPath)],
    ) -> Result<()> {
        let mut polylines: Vec<Polyline> = Vec::with_capacity(arbor.len());
        for (ordinal, path) in arbor {
            polylines.extend(path_polyline(
                &pass.morphology,
                path,
                *ordinal,
                false,
                &pass.coder,
            )?);
        }
        let name = component_name(&pass.morphology, "arbor", index);
        self.context.submit(backend, pass, &name, index, polylines)
    }
}

impl SkeletonBuilder for ConnectedSectionsBuilder {
    fn name(&self) -> &'static str {
        "ConnectedSectionsBuilder"
    }

    fn options(&self) -> &Options {
        &self.context.options
    }

    fn build_skeleton(&mut self, backend: &mut dyn GeometryBackend) -> Result<()> {
        let builder = self.name();
        let pass = self.context.prepare(backend, builder, GROUPING)?;

        log::info!("Constructing poly-lines");
        for (index, arbor) in arbors(&pass.morphology).iter().enumerate() {
            self.build_arbor(backend, &pass, index, arbor)?;
        }
        Ok(())
    }

    fn get_number_components(&self) -> usize {
        arbors(&self.context.morphology).len()
    }

    fn build_component(&mut self, backend: &mut dyn GeometryBackend, index: usize) -> Result<()> {
        let total = self.get_number_components();
        let builder = self.name();
        let pass = self
            .context
            .begin_component(backend, builder, GROUPING, index, total)?;

        if let Some(arbor) = arbors(&pass.morphology).get(index) {
            self.build_arbor(backend, &pass, index, arbor)?;
        }

        self.context.end_component(pass, total);
        Ok(())
    }

    fn morphology_objects(&self) -> &[ObjectHandle] {
        &self.context.objects
    }
}
