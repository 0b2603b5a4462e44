// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Staged processor scheduler
//!
//! Processors are grouped into stages. Stages run in ascending order and
//! processors inside a stage run in the order they were added, so a frame
//! always executes the same pipeline in the same sequence.

use crate::ecs::{Frame, Processor, World};
use log::trace;

/// Stage identifier for grouping processors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(pub usize);

impl StageId {
    /// Create a new stage ID
    pub fn new(id: usize) -> Self {
        StageId(id)
    }
}

/// Pre-defined stages of the rain pipeline
pub mod stages {
    use super::StageId;

    /// Integrate positions from velocities
    pub const MOVEMENT: StageId = StageId(0);

    /// Create new drops
    pub const SPAWN: StageId = StageId(1);

    /// Remove drops that left the viewport
    pub const DESTROY: StageId = StageId(2);

    /// Project the world onto the backend
    pub const RENDER: StageId = StageId(3);
}

/// A processor with metadata for scheduling
struct ScheduledProcessor {
    processor: Box<dyn Processor>,
    stage: StageId,
}

/// Processor scheduler with deterministic staged execution
///
/// # Examples
///
/// ```
/// use purple_rain::ecs::scheduler::{Scheduler, stages};
/// use purple_rain::ecs::{Frame, Processor, World};
///
/// struct MyProcessor;
/// impl Processor for MyProcessor {
///     fn run(&mut self, _world: &mut World, _frame: &mut Frame<'_>) {}
/// }
///
/// let mut scheduler = Scheduler::new();
/// scheduler.add_processor(MyProcessor, stages::MOVEMENT);
/// assert_eq!(scheduler.processor_count(), 1);
/// ```
pub struct Scheduler {
    processors: Vec<ScheduledProcessor>,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Scheduler {
            processors: Vec::new(),
        }
    }

    /// Add a processor to a specific stage
    pub fn add_processor<P: Processor + 'static>(&mut self, processor: P, stage: StageId) {
        self.processors.push(ScheduledProcessor {
            processor: Box::new(processor),
            stage,
        });
        // Stable sort keeps registration order inside a stage
        self.processors.sort_by_key(|s| s.stage);
    }

    /// Get the number of registered processors
    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Get the number of stages in use
    pub fn stage_count(&self) -> usize {
        self.processors
            .iter()
            .map(|s| s.stage.0 + 1)
            .max()
            .unwrap_or(0)
    }

    /// Names of the processors in execution order
    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|s| s.processor.name()).collect()
    }

    /// Run every processor once, in stage order
    pub fn run(&mut self, world: &mut World, frame: &mut Frame<'_>) {
        for scheduled in &mut self.processors {
            trace!(
                "frame {}: running {} (stage {})",
                frame.index(),
                scheduled.processor.name(),
                scheduled.stage.0
            );
            scheduled.processor.run(world, frame);
        }
    }

    /// Clear all processors from the scheduler
    pub fn clear(&mut self) {
        self.processors.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
