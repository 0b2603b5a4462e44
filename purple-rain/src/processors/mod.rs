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
//! The four processors of the rain pipeline
//!
//! Each processor owns one concern and declares in its module docs which
//! components it writes. Per frame they run as movement, spawn, destroy,
//! then render.

mod destroy;
mod movement;
mod render;
mod spawn;

pub use destroy::DestroyProcessor;
pub use movement::{integrate, MovementProcessor};
pub use render::RenderProcessor;
pub use spawn::{
    spawn_raindrop, FixedSpawnSource, RandomSpawnSource, ScriptedSpawnSource, SpawnProcessor,
    SpawnSource,
};
