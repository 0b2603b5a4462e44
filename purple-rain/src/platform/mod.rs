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
//! Platform and rendering backend interface
//!
//! The simulation never talks to a window system directly. It draws through
//! [`Renderer`] and takes its clock and input from [`Platform`]. Any backend
//! that can fill rectangles and report elapsed time can host the rain.
//!
//! [`HeadlessPlatform`] is the backend shipped with the crate. It keeps the
//! draw commands of the last frame in memory, which is what the tests and the
//! command-line runner use.

mod headless;

pub use headless::{FrameClock, HeadlessPlatform};

use crate::ecs::components::Rgb;
use thiserror::Error;

/// Keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// The escape key, which stops the simulation
    Escape,
    /// Space bar
    Space,
    /// Any other key, by backend-specific code
    Other(u32),
}

/// Input reported by the platform since the previous poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The window was closed or the host asked the program to exit
    Quit,
    /// A key was pressed
    KeyDown(Key),
}

impl PlatformEvent {
    /// Whether this event should stop the game loop
    pub fn is_exit_request(&self) -> bool {
        matches!(self, PlatformEvent::Quit | PlatformEvent::KeyDown(Key::Escape))
    }
}

/// One drawing operation, as recorded by backends that keep a display list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole frame with a color
    Clear(Rgb),
    /// Fill an axis-aligned rectangle
    FillRect {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width in pixels
        width: f64,
        /// Height in pixels
        height: f64,
        /// Fill color
        color: Rgb,
    },
    /// Publish the frame
    Present,
}

/// Errors raised by a platform backend
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The backend could not open its display
    #[error("platform initialization failed: {0}")]
    Init(String),
}

/// Drawing half of the backend
pub trait Renderer {
    /// Fill the frame buffer with `color`
    fn clear(&mut self, color: Rgb);

    /// Draw one opaque rectangle
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);

    /// Publish the frame buffer to the display
    fn present(&mut self);
}

/// Full backend: drawing, input and frame pacing
pub trait Platform: Renderer {
    /// Pending input since the previous call; never blocks
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Block until the next frame boundary and return elapsed seconds
    fn tick(&mut self, target_fps: u32) -> f64;

    /// Release backend resources; called once when the loop stops
    fn shutdown(&mut self) {}
}
