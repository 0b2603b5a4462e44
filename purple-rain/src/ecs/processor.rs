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
//! Processor execution framework
//!
//! Processors contain the logic that operates on entities and components.
//! Each one handles a single concern and is run once per frame by the
//! [`Scheduler`](crate::ecs::scheduler::Scheduler).

use crate::ecs::World;
use crate::platform::Renderer;

/// Per-frame inputs handed to every processor
pub struct Frame<'a> {
    dt: f64,
    index: u64,
    renderer: &'a mut dyn Renderer,
}

impl<'a> Frame<'a> {
    /// Create the context for frame number `index` lasting `dt` seconds
    pub fn new(dt: f64, index: u64, renderer: &'a mut dyn Renderer) -> Self {
        Frame {
            dt,
            index,
            renderer,
        }
    }

    /// Elapsed seconds since the previous frame, already clamped
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Zero-based frame number
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Backend to draw into
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }
}

/// Trait for processors that operate on the ECS world
///
/// A processor documents which components it writes; the world itself does
/// not enforce it.
pub trait Processor {
    /// Execute the processor for one frame
    fn run(&mut self, world: &mut World, frame: &mut Frame<'_>);

    /// Get the name of this processor for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
