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
//! Linear motion
//!
//! Writes: [`Position`]. Reads: [`Velocity`].

use crate::ecs::components::{Position, Velocity};
use crate::ecs::{Frame, Processor, World};

/// Below this many positions the sequential loop is faster than rayon
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 1024;

/// Advances every entity with a position and a velocity by `velocity * dt`
#[derive(Debug, Default, Clone, Copy)]
pub struct MovementProcessor;

impl MovementProcessor {
    /// Create the processor
    pub fn new() -> Self {
        MovementProcessor
    }
}

impl Processor for MovementProcessor {
    fn run(&mut self, world: &mut World, frame: &mut Frame<'_>) {
        integrate(world, frame.dt());
    }

    fn name(&self) -> &str {
        "MovementProcessor"
    }
}

/// Integrate all positions over `dt` seconds
///
/// Entities with a position but no velocity are left alone.
pub fn integrate(world: &mut World, dt: f64) {
    let stores = world.stores_mut();
    let velocities = &stores.velocities;
    let (entities, positions) = stores.positions.split_mut();

    #[cfg(feature = "parallel")]
    if positions.len() >= PARALLEL_THRESHOLD {
        use rayon::prelude::*;

        positions
            .par_iter_mut()
            .zip(entities.par_iter())
            .for_each(|(position, entity)| {
                if let Some(velocity) = velocities.get(*entity) {
                    step(position, velocity, dt);
                }
            });
        return;
    }

    for (position, entity) in positions.iter_mut().zip(entities) {
        if let Some(velocity) = velocities.get(*entity) {
            step(position, velocity, dt);
        }
    }
}

#[inline]
fn step(position: &mut Position, velocity: &Velocity, dt: f64) {
    position.x += velocity.dx * dt;
    position.y += velocity.dy * dt;
}
