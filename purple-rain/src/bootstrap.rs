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
//! Scene setup
//!
//! Builds the starting world (one background entity, no drops) and registers
//! the four processors in their stages.

use crate::config::RainConfig;
use crate::ecs::components::{Background, Rgb};
use crate::ecs::scheduler::{stages, Scheduler};
use crate::ecs::{Entity, World};
use crate::game_loop::GameLoop;
use crate::platform::Platform;
use crate::processors::{
    DestroyProcessor, MovementProcessor, RandomSpawnSource, RenderProcessor, SpawnProcessor,
    SpawnSource,
};
use log::info;

/// Create the background entity
pub fn init_background(world: &mut World, color: Rgb) -> Entity {
    let entity = world.create_entity();
    world.add(entity, Background::new(color));
    entity
}

/// Register the rain pipeline in its fixed order
pub fn build_scheduler<S: SpawnSource + 'static>(config: &RainConfig, source: S) -> Scheduler {
    let mut scheduler = Scheduler::new();
    scheduler.add_processor(MovementProcessor::new(), stages::MOVEMENT);
    scheduler.add_processor(SpawnProcessor::new(config, source), stages::SPAWN);
    scheduler.add_processor(DestroyProcessor::new(config.viewport), stages::DESTROY);
    scheduler.add_processor(RenderProcessor::new(&config.drop), stages::RENDER);
    scheduler
}

/// Random spawn source honouring the configured seed
pub fn spawn_source(config: &RainConfig) -> RandomSpawnSource {
    match config.seed {
        Some(seed) => {
            info!("spawning with seed {}", seed);
            RandomSpawnSource::seeded(seed)
        }
        None => RandomSpawnSource::from_entropy(),
    }
}

/// Build a ready-to-run loop on `platform`
pub fn build_game<P, S>(config: &RainConfig, platform: P, source: S) -> GameLoop<P>
where
    P: Platform,
    S: SpawnSource + 'static,
{
    let mut world = World::new();
    let background = init_background(&mut world, config.background_color);
    let scheduler = build_scheduler(config, source);

    GameLoop::new(platform, world, scheduler, config).with_background(background)
}
