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
//! # Purple Rain
//!
//! A falling-rain simulation built on a small ECS (Entity Component System).
//!
//! ## Features
//!
//! - **ECS Architecture**: generational entities, dense component stores and
//!   typed queries over a closed set of components
//! - **Processor Pipeline**: movement, spawn, destroy and render stages run in
//!   a fixed order every frame
//! - **Pluggable Backend**: drawing, input and timing go through the
//!   [`platform::Platform`] trait; a headless backend is included
//! - **Deterministic Runs**: spawn decisions come from an injectable source
//! - **Parallelization**: optional Rayon integration for bulk integration
//!
//! ## Example
//!
//! ```rust
//! use purple_rain::bootstrap;
//! use purple_rain::config::RainConfig;
//! use purple_rain::platform::HeadlessPlatform;
//! use purple_rain::processors::FixedSpawnSource;
//!
//! let config = RainConfig::default();
//! let platform = HeadlessPlatform::new(1280, 480)
//!     .unwrap()
//!     .with_frame_limit(10);
//! let mut game = bootstrap::build_game(&config, platform, FixedSpawnSource::always(3));
//!
//! let summary = game.run();
//! assert_eq!(summary.frames, 10);
//! assert_eq!(summary.live_raindrops, 1);
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

/// The rain processors
pub mod processors;

/// Rendering and input backend interface
pub mod platform;

/// Startup configuration
pub mod config;

/// Scene construction
pub mod bootstrap;

/// Frame loop state machine
pub mod game_loop;

/// Top-level error type
pub mod error;

pub use config::RainConfig;
pub use ecs::{Entity, World};
pub use error::RainError;
pub use game_loop::{GameLoop, LoopState, RunSummary};
