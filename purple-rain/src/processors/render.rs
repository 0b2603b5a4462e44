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
//! Frame output
//!
//! Reads: [`Background`], [`Raindrop`] and [`Position`]. Writes nothing.

use crate::config::DropConfig;
use crate::ecs::components::{Background, Position, Raindrop};
use crate::ecs::{Frame, Processor, World};
use log::warn;

/// Turns the current world state into backend draw calls
#[derive(Debug, Clone)]
pub struct RenderProcessor {
    drop_width: f64,
    drop_height: f64,
    warned_missing_background: bool,
}

impl RenderProcessor {
    /// Build the processor for a drop shape
    pub fn new(drop: &DropConfig) -> Self {
        RenderProcessor {
            drop_width: drop.width,
            drop_height: drop.height,
            warned_missing_background: false,
        }
    }
}

impl Processor for RenderProcessor {
    fn run(&mut self, world: &mut World, frame: &mut Frame<'_>) {
        let renderer = frame.renderer();

        match world.single::<Background>() {
            Some((_, background)) => renderer.clear(background.color),
            None if !self.warned_missing_background => {
                warn!("no background entity, frames will not be cleared");
                self.warned_missing_background = true;
            }
            None => {}
        }

        for (_, (drop, position)) in world.query::<(Raindrop, Position)>() {
            renderer.fill_rect(
                position.x,
                position.y,
                self.drop_width,
                self.drop_height,
                drop.color,
            );
        }

        renderer.present();
    }

    fn name(&self) -> &str {
        "RenderProcessor"
    }
}
