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
//! Raindrop spawning
//!
//! Writes: new entities with [`Position`], [`Velocity`] and [`Raindrop`].
//! Reads: [`Raindrop`] and [`Position`] of live drops for the column check.
//!
//! The viewport is split into drop-wide columns numbered from 1. Each frame
//! the processor flips a coin; on success it picks one column and drops a
//! raindrop at its left edge, unless a live drop already sits on exactly
//! that x coordinate. A rejected attempt is not retried in the same frame.

use crate::config::{DropConfig, RainConfig};
use crate::ecs::components::{Position, Raindrop, Velocity};
use crate::ecs::{Entity, Frame, Processor, World};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of the spawn decisions
///
/// Production code uses [`RandomSpawnSource`]; tests plug in
/// [`FixedSpawnSource`] or [`ScriptedSpawnSource`] to make runs exact.
pub trait SpawnSource {
    /// Decide whether this frame attempts a spawn
    fn should_spawn(&mut self, probability: f64) -> bool;

    /// Pick a column in `1..=total_columns`
    fn pick_column(&mut self, total_columns: u32) -> u32;
}

/// Spawn decisions drawn from a random number generator
#[derive(Debug, Clone)]
pub struct RandomSpawnSource<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> RandomSpawnSource<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        RandomSpawnSource { rng }
    }
}

impl RandomSpawnSource<StdRng> {
    /// Reproducible source from a seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SpawnSource for RandomSpawnSource<R> {
    fn should_spawn(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn pick_column(&mut self, total_columns: u32) -> u32 {
        self.rng.gen_range(1..=total_columns)
    }
}

/// Always makes the same decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSpawnSource {
    spawn: bool,
    column: u32,
}

impl FixedSpawnSource {
    /// Spawn in `column` on every frame
    pub fn always(column: u32) -> Self {
        FixedSpawnSource {
            spawn: true,
            column,
        }
    }

    /// Never spawn
    pub fn never() -> Self {
        FixedSpawnSource {
            spawn: false,
            column: 1,
        }
    }
}

impl SpawnSource for FixedSpawnSource {
    fn should_spawn(&mut self, _probability: f64) -> bool {
        self.spawn
    }

    fn pick_column(&mut self, total_columns: u32) -> u32 {
        self.column.min(total_columns)
    }
}

/// Replays a list of per-frame decisions
///
/// `Some(column)` spawns in that column, `None` skips the frame. Once the
/// script runs out no further spawns happen.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpawnSource {
    script: VecDeque<Option<u32>>,
    next_column: Option<u32>,
}

impl ScriptedSpawnSource {
    /// Create a source from per-frame decisions
    pub fn new(script: impl IntoIterator<Item = Option<u32>>) -> Self {
        ScriptedSpawnSource {
            script: script.into_iter().collect(),
            next_column: None,
        }
    }

    /// Decisions not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SpawnSource for ScriptedSpawnSource {
    fn should_spawn(&mut self, _probability: f64) -> bool {
        self.next_column = self.script.pop_front().flatten();
        self.next_column.is_some()
    }

    fn pick_column(&mut self, total_columns: u32) -> u32 {
        self.next_column.take().unwrap_or(1).min(total_columns)
    }
}

/// Create a complete raindrop entity at `(x, y)`
///
/// This is the only place raindrops are assembled, so every drop always
/// has its position, velocity and tag together.
pub fn spawn_raindrop(world: &mut World, x: f64, y: f64, drop: &DropConfig) -> Entity {
    let entity = world.create_entity();
    world.add(entity, Position::new(x, y));
    world.add(entity, Velocity::falling(drop.speed));
    world.add(entity, Raindrop::new(drop.color));
    trace!("spawned raindrop {} at ({}, {})", entity, x, y);
    entity
}

/// Creates at most one raindrop per frame
pub struct SpawnProcessor<S: SpawnSource> {
    source: S,
    drop: DropConfig,
    probability: f64,
    total_columns: u32,
    spawned: u64,
    rejected: u64,
}

impl<S: SpawnSource> SpawnProcessor<S> {
    /// Build the processor for a configuration and a decision source
    pub fn new(config: &RainConfig, source: S) -> Self {
        let total_columns = config.total_columns();
        debug!(
            "spawn processor: {} columns of {}px",
            total_columns, config.drop.width
        );
        SpawnProcessor {
            source,
            drop: config.drop,
            probability: config.spawn_probability,
            total_columns,
            spawned: 0,
            rejected: 0,
        }
    }

    /// Number of columns drops can fall in
    pub fn total_columns(&self) -> u32 {
        self.total_columns
    }

    /// Drops created so far
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Attempts dropped by the column check so far
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Run one spawn attempt, returning the new drop if one was created
    ///
    /// A column outside `1..=total_columns` from the source is clamped into it.
    pub fn try_spawn(&mut self, world: &mut World) -> Option<Entity> {
        if self.total_columns == 0 || !self.source.should_spawn(self.probability) {
            return None;
        }

        let column = self
            .source
            .pick_column(self.total_columns)
            .clamp(1, self.total_columns);
        let x = f64::from(column) * self.drop.width;
        let occupied = world
            .query::<(Raindrop, Position)>()
            .any(|(_, (_, position))| position.x == x);
        if occupied {
            self.rejected += 1;
            trace!("column {} busy, skipping spawn", column);
            return None;
        }

        self.spawned += 1;
        Some(spawn_raindrop(world, x, 0.0, &self.drop))
    }
}

impl<S: SpawnSource> Processor for SpawnProcessor<S> {
    fn run(&mut self, world: &mut World, _frame: &mut Frame<'_>) {
        self.try_spawn(world);
    }

    fn name(&self) -> &str {
        "SpawnProcessor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_xs(world: &World) -> Vec<f64> {
        world
            .query::<(Raindrop, Position)>()
            .map(|(_, (_, p))| p.x)
            .collect()
    }

    #[test]
    fn test_total_columns() {
        let processor = SpawnProcessor::new(&RainConfig::default(), FixedSpawnSource::never());
        assert_eq!(processor.total_columns(), 256);
    }

    #[test]
    fn test_spawn_in_column_three() {
        let mut world = World::new();
        let mut processor = SpawnProcessor::new(&RainConfig::default(), FixedSpawnSource::always(3));

        let entity = processor.try_spawn(&mut world).unwrap();

        assert_eq!(world.get::<Position>(entity), Some(&Position::new(15.0, 0.0)));
        assert_eq!(world.get::<Velocity>(entity), Some(&Velocity::new(0.0, 700.0)));
        assert_eq!(
            world.get::<Raindrop>(entity).map(|r| r.color),
            Some(crate::ecs::components::Rgb::new(128, 0, 128))
        );
    }

    #[test]
    fn test_duplicate_column_is_dropped() {
        let mut world = World::new();
        let mut processor = SpawnProcessor::new(&RainConfig::default(), FixedSpawnSource::always(3));

        assert!(processor.try_spawn(&mut world).is_some());
        assert!(processor.try_spawn(&mut world).is_none());

        assert_eq!(drop_xs(&world), vec![15.0]);
        assert_eq!(processor.spawned(), 1);
        assert_eq!(processor.rejected(), 1);
    }

    #[test]
    fn test_column_frees_once_drop_moves() {
        let mut world = World::new();
        let mut processor = SpawnProcessor::new(&RainConfig::default(), FixedSpawnSource::always(3));

        let first = processor.try_spawn(&mut world).unwrap();
        world.get_mut::<Position>(first).unwrap().x = 15.5;

        assert!(processor.try_spawn(&mut world).is_some());
    }

    #[test]
    fn test_column_zero_lands_in_first_column() {
        let mut world = World::new();
        let mut processor = SpawnProcessor::new(&RainConfig::default(), FixedSpawnSource::always(0));

        let entity = processor.try_spawn(&mut world).unwrap();
        assert_eq!(world.get::<Position>(entity), Some(&Position::new(5.0, 0.0)));
    }

    #[test]
    fn test_scripted_columns_stay_in_range() {
        let mut world = World::new();
        let source = ScriptedSpawnSource::new([Some(0), Some(999)]);
        let mut processor = SpawnProcessor::new(&RainConfig::default(), source);

        processor.try_spawn(&mut world);
        processor.try_spawn(&mut world);

        let mut xs = drop_xs(&world);
        xs.sort_by(f64::total_cmp);
        assert_eq!(xs, vec![5.0, 1280.0]);
    }

    #[test]
    fn test_never_spawns() {
        let mut world = World::new();
        let mut processor = SpawnProcessor::new(&RainConfig::default(), FixedSpawnSource::never());
        for _ in 0..10 {
            assert!(processor.try_spawn(&mut world).is_none());
        }
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_scripted_source() {
        let mut world = World::new();
        let source = ScriptedSpawnSource::new([Some(1), None, Some(2), Some(1)]);
        let mut processor = SpawnProcessor::new(&RainConfig::default(), source);

        for _ in 0..6 {
            processor.try_spawn(&mut world);
        }

        let mut xs = drop_xs(&world);
        xs.sort_by(f64::total_cmp);
        assert_eq!(xs, vec![5.0, 10.0]);
        assert_eq!(processor.rejected(), 1);
    }

    #[test]
    fn test_random_columns_stay_in_range() {
        let config = RainConfig::default();
        let mut source = RandomSpawnSource::seeded(42);
        for _ in 0..10_000 {
            let column = source.pick_column(config.total_columns());
            assert!((1..=256).contains(&column));
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RandomSpawnSource::seeded(9);
        let mut b = RandomSpawnSource::seeded(9);
        for _ in 0..100 {
            assert_eq!(a.should_spawn(0.5), b.should_spawn(0.5));
            assert_eq!(a.pick_column(256), b.pick_column(256));
        }
    }

    #[test]
    fn test_probability_bounds() {
        let mut source = RandomSpawnSource::seeded(1);
        for _ in 0..100 {
            assert!(!source.should_spawn(0.0));
            assert!(source.should_spawn(1.0));
        }
    }

    #[test]
    fn test_random_spawns_keep_columns_unique() {
        let mut world = World::new();
        let mut processor =
            SpawnProcessor::new(&RainConfig::default(), RandomSpawnSource::seeded(1234));

        for _ in 0..2000 {
            processor.try_spawn(&mut world);
            let mut xs = drop_xs(&world);
            xs.sort_by(f64::total_cmp);
            xs.dedup();
            assert_eq!(xs.len(), world.storage::<Raindrop>().len());
        }
        assert!(processor.spawned() <= 256);
    }
}
