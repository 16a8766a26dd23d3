//! Progressive reconstruction driven by host ticks.
//!
//! ```text
//! Idle -> Running { i_component } -> Completed
//!                                 -> Cancelled { i_component }
//!                                 -> Failed { i_component }
//! ```
//!
//! Each tick builds exactly one component and advances the cursor. Nothing
//! built before a cancel or a failure is rolled back.

use vessel_core::{GeometryBackend, ObjectHandle, Result};

use crate::builders::SkeletonBuilder;

/// State of a progressive pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionState {
    /// Not started.
    Idle,
    /// `i_component` is the next component to build.
    Running { i_component: usize },
    /// Stopped by the host; components before `i_component` were built.
    Cancelled { i_component: usize },
    /// Every component was built.
    Completed,
    /// Building component `i_component` failed.
    Failed { i_component: usize },
}

impl ReconstructionState {
    /// Returns true if no further tick has any effect.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Cancelled { .. } | Self::Completed | Self::Failed { .. }
        )
    }
}

/// Events delivered by the host's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Tick,
    Cancel,
}

/// Drives a builder one component per tick.
pub struct ProgressiveReconstruction {
    builder: Box<dyn SkeletonBuilder>,
    state: ReconstructionState,
    total_components: usize,
}

impl ProgressiveReconstruction {
    pub fn new(builder: Box<dyn SkeletonBuilder>) -> Self {
        let total_components = builder.get_number_components();
        Self {
            builder,
            state: ReconstructionState::Idle,
            total_components,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> ReconstructionState {
        self.state
    }

    /// Returns the number of components of the pass.
    pub fn total_components(&self) -> usize {
        self.total_components
    }

    /// Returns the builder being driven.
    pub fn builder(&self) -> &dyn SkeletonBuilder {
        self.builder.as_ref()
    }

    /// Returns the objects created so far.
    pub fn morphology_objects(&self) -> &[ObjectHandle] {
        self.builder.morphology_objects()
    }

    /// Leaves `Idle`. A builder without components completes immediately.
    pub fn start(&mut self) -> ReconstructionState {
        if self.state == ReconstructionState::Idle {
            log::info!(
                "{}: progressive reconstruction of {} components",
                self.builder.name(),
                self.total_components
            );
            self.state = if self.total_components == 0 {
                ReconstructionState::Completed
            } else {
                ReconstructionState::Running { i_component: 0 }
            };
        }
        self.state
    }

    /// Handles one tick: builds the current component and advances.
    ///
    /// Starts the pass when idle. Terminal states are returned unchanged. A
    /// build failure moves to `Failed` and returns the error.
    pub fn step(&mut self, backend: &mut dyn GeometryBackend) -> Result<ReconstructionState> {
        if self.state == ReconstructionState::Idle {
            self.start();
        }
        let ReconstructionState::Running { i_component } = self.state else {
            return Ok(self.state);
        };

        if let Err(error) = self.builder.build_component(backend, i_component) {
            log::error!("component {i_component} failed: {error}");
            self.state = ReconstructionState::Failed { i_component };
            return Err(error);
        }

        let next = i_component + 1;
        log::debug!("progress {next}/{}", self.total_components);
        self.state = if next >= self.total_components {
            ReconstructionState::Completed
        } else {
            ReconstructionState::Running { i_component: next }
        };
        Ok(self.state)
    }

    /// Stops the pass before the next tick.
    pub fn cancel(&mut self) -> ReconstructionState {
        self.state = match self.state {
            ReconstructionState::Idle => ReconstructionState::Cancelled { i_component: 0 },
            ReconstructionState::Running { i_component } => {
                log::info!("reconstruction cancelled at component {i_component}");
                ReconstructionState::Cancelled { i_component }
            }
            terminal => terminal,
        };
        self.state
    }

    /// Completion in percent, as shown by the host's progress bar.
    pub fn progress(&self) -> u32 {
        let built = match self.state {
            ReconstructionState::Idle => 0,
            ReconstructionState::Completed => return 100,
            ReconstructionState::Running { i_component }
            | ReconstructionState::Cancelled { i_component }
            | ReconstructionState::Failed { i_component } => i_component,
        };
        if self.total_components == 0 {
            return 100;
        }
        u32::try_from(100 * built / self.total_components).unwrap_or(100)
    }

    /// Consumes host events until the pass reaches a terminal state.
    pub fn drive(
        &mut self,
        backend: &mut dyn GeometryBackend,
        events: impl IntoIterator<Item = HostEvent>,
    ) -> Result<ReconstructionState> {
        for event in events {
            if self.state.is_terminal() {
                break;
            }
            match event {
                HostEvent::Tick => {
                    self.step(backend)?;
                }
                HostEvent::Cancel => {
                    self.cancel();
                }
            }
        }
        Ok(self.state)
    }

    /// Ticks until the pass completes.
    pub fn run_to_completion(
        &mut self,
        backend: &mut dyn GeometryBackend,
    ) -> Result<ReconstructionState> {
        while !self.state.is_terminal() {
            self.step(backend)?;
        }
        Ok(self.state)
    }
}

impl std::fmt::Debug for ProgressiveReconstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressiveReconstruction")
            .field("builder", &self.builder.name())
            .field("state", &self.state)
            .field("total_components", &self.total_components)
            .finish()
    }
}
