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
//! Off-screen cleanup
//!
//! Destroys: raindrop entities. Reads: [`Raindrop`] and [`Position`].
//! This is the only processor allowed to remove drops.

use crate::config::Viewport;
use crate::ecs::components::{Position, Raindrop};
use crate::ecs::{Frame, Processor, World};
use log::trace;

/// Removes raindrops whose position left the viewport
#[derive(Debug, Clone, Copy)]
pub struct DestroyProcessor {
    width: f64,
    height: f64,
    destroyed: u64,
}

impl DestroyProcessor {
    /// Build the processor for a viewport
    pub fn new(viewport: Viewport) -> Self {
        DestroyProcessor {
            width: f64::from(viewport.width),
            height: f64::from(viewport.height),
            destroyed: 0,
        }
    }

    /// Whether a position lies outside the viewport
    ///
    /// Points exactly on an edge still count as inside.
    pub fn is_outside(&self, position: &Position) -> bool {
        position.y > self.height || position.y < 0.0 || position.x < 0.0 || position.x > self.width
    }

    /// Drops removed so far
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    /// Destroy every drop outside the viewport, returning how many went
    pub fn sweep(&mut self, world: &mut World) -> usize {
        let expired: Vec<_> = world
            .query::<(Raindrop, Position)>()
            .filter(|(_, (_, position))| self.is_outside(position))
            .map(|(entity, _)| entity)
            .collect();

        for &entity in &expired {
            trace!("raindrop {} left the viewport", entity);
            world.destroy_entity(entity);
        }

        self.destroyed += expired.len() as u64;
        expired.len()
    }
}

impl Processor for DestroyProcessor {
    fn run(&mut self, world: &mut World, _frame: &mut Frame<'_>) {
        self.sweep(world);
    }

    fn name(&self) -> &str {
        "DestroyProcessor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DropConfig;
    use crate::processors::spawn_raindrop;

    fn processor() -> DestroyProcessor {
        DestroyProcessor::new(Viewport {
            width: 1280,
            height: 480,
        })
    }

    #[test]
    fn test_bounds() {
        let p = processor();
        assert!(!p.is_outside(&Position::new(0.0, 0.0)));
        assert!(!p.is_outside(&Position::new(1280.0, 480.0)));
        assert!(p.is_outside(&Position::new(15.0, 480.5)));
        assert!(p.is_outside(&Position::new(15.0, -0.1)));
        assert!(p.is_outside(&Position::new(-1.0, 10.0)));
        assert!(p.is_outside(&Position::new(1281.0, 10.0)));
    }

    #[test]
    fn test_sweep_removes_only_outside_drops() {
        let mut world = World::new();
        let drop = DropConfig::default();
        let inside = spawn_raindrop(&mut world, 15.0, 100.0, &drop);
        let below = spawn_raindrop(&mut world, 20.0, 700.0, &drop);
        let left = spawn_raindrop(&mut world, -5.0, 10.0, &drop);
        let right = spawn_raindrop(&mut world, 1290.0, 10.0, &drop);

        let mut p = processor();
        assert_eq!(p.sweep(&mut world), 3);

        assert!(world.is_entity_alive(inside));
        assert!(!world.is_entity_alive(below));
        assert!(!world.is_entity_alive(left));
        assert!(!world.is_entity_alive(right));
        assert_eq!(p.destroyed(), 3);
    }

    #[test]
    fn test_non_raindrops_are_ignored() {
        let mut world = World::new();
        let marker = world.create_entity();
        world.add(marker, Position::new(-100.0, -100.0));

        assert_eq!(processor().sweep(&mut world), 0);
        assert!(world.is_entity_alive(marker));
    }

    #[test]
    fn test_no_survivor_outside_bounds() {
        let mut world = World::new();
        let drop = DropConfig::default();
        for i in 0..200 {
            let x = (i as f64) * 7.0 - 50.0;
            let y = (i as f64) * 3.0 - 60.0;
            spawn_raindrop(&mut world, x, y, &drop);
        }

        let mut p = processor();
        p.sweep(&mut world);

        for (_, (_, position)) in world.query::<(Raindrop, Position)>() {
            assert!(!p.is_outside(position));
        }
    }
}
