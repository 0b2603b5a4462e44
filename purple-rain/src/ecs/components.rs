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
//! Rain simulation components
//!
//! Four component types make up the whole simulation: [`Position`] and
//! [`Velocity`] for motion, [`Raindrop`] to tag a falling drop with its
//! color, and [`Background`] for the frame clear color. Coordinates are
//! screen pixels with the origin in the top-left corner and `y` growing
//! downwards.

use crate::ecs::{Component, ComponentStores, DenseStorage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Pure black
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// The purple used for raindrops by default
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// 2D position in pixels
///
/// # Examples
///
/// ```
/// use purple_rain::ecs::components::Position;
///
/// let pos = Position::new(15.0, 0.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate, growing downwards
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Check if both coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Component for Position {
    fn storage(stores: &ComponentStores) -> &DenseStorage<Self> {
        &stores.positions
    }

    fn storage_mut(stores: &mut ComponentStores) -> &mut DenseStorage<Self> {
        &mut stores.positions
    }
}

/// 2D velocity in pixels per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// Horizontal speed
    pub dx: f64,
    /// Vertical speed
    pub dy: f64,
}

impl Velocity {
    /// Create a new velocity
    pub fn new(dx: f64, dy: f64) -> Self {
        Velocity { dx, dy }
    }

    /// Straight down at `speed` pixels per second
    pub fn falling(speed: f64) -> Self {
        Velocity::new(0.0, speed)
    }
}

impl Component for Velocity {
    fn storage(stores: &ComponentStores) -> &DenseStorage<Self> {
        &stores.velocities
    }

    fn storage_mut(stores: &mut ComponentStores) -> &mut DenseStorage<Self> {
        &mut stores.velocities
    }
}

/// Marks an entity as a falling drop and carries its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raindrop {
    /// Fill color of the drop
    pub color: Rgb,
}

impl Raindrop {
    /// Create a drop tag with the given color
    pub fn new(color: Rgb) -> Self {
        Raindrop { color }
    }
}

impl Component for Raindrop {
    fn storage(stores: &ComponentStores) -> &DenseStorage<Self> {
        &stores.raindrops
    }

    fn storage_mut(stores: &mut ComponentStores) -> &mut DenseStorage<Self> {
        &mut stores.raindrops
    }
}

/// Clear color of every frame; only one entity holds it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    /// Color the frame buffer is cleared with
    pub color: Rgb,
}

impl Background {
    /// Create a background with the given color
    pub fn new(color: Rgb) -> Self {
        Background { color }
    }
}

impl Component for Background {
    const SINGLETON: bool = true;

    fn storage(stores: &ComponentStores) -> &DenseStorage<Self> {
        &stores.backgrounds
    }

    fn storage_mut(stores: &mut ComponentStores) -> &mut DenseStorage<Self> {
        &mut stores.backgrounds
    }
}
