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
//! Simulation configuration
//!
//! Every value has a default matching the classic purple rain scene, so an
//! empty config file is valid. The configuration is read once at startup and
//! never changes afterwards.
//!
//! ```toml
//! target_fps = 30
//! seed = 7
//!
//! [viewport]
//! width = 640
//! height = 480
//!
//! [drop]
//! speed = 350.0
//! color = { r = 0, g = 128, b = 255 }
//! ```

use crate::ecs::components::Rgb;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The file extension is not a supported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Size of the visible area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 1280,
            height: 480,
        }
    }
}

/// Shape, speed and color of every raindrop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropConfig {
    /// Drop width, which is also the column width
    pub width: f64,
    /// Drop height
    pub height: f64,
    /// Fall speed in pixels per second
    pub speed: f64,
    /// Fill color
    pub color: Rgb,
}

impl Default for DropConfig {
    fn default() -> Self {
        DropConfig {
            width: 5.0,
            height: 15.0,
            speed: 700.0,
            color: Rgb::PURPLE,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Visible area
    pub viewport: Viewport,
    /// Raindrop settings
    pub drop: DropConfig,
    /// Frame clear color
    pub background_color: Rgb,
    /// Frame rate the platform clock is asked to hold
    pub target_fps: u32,
    /// Upper bound for a single frame's `dt`, in seconds
    pub max_frame_time: f64,
    /// Chance of a spawn attempt on each frame
    pub spawn_probability: f64,
    /// Seed for the spawn random source; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for RainConfig {
    fn default() -> Self {
        RainConfig {
            viewport: Viewport::default(),
            drop: DropConfig::default(),
            background_color: Rgb::BLACK,
            target_fps: 60,
            max_frame_time: 0.25,
            spawn_probability: 0.5,
            seed: None,
        }
    }
}

impl RainConfig {
    /// Load and validate a configuration file
    ///
    /// Only `.toml` files are supported.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RainConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(self.drop.width.is_finite() && self.drop.width > 0.0)
            || !(self.drop.height.is_finite() && self.drop.height > 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "drop size must be positive, got {}x{}",
                self.drop.width, self.drop.height
            )));
        }
        if self.drop.width > f64::from(self.viewport.width) {
            return Err(ConfigError::Invalid(format!(
                "drop width {} exceeds viewport width {}",
                self.drop.width, self.viewport.width
            )));
        }
        if !self.drop.speed.is_finite() {
            return Err(ConfigError::Invalid("drop speed must be finite".to_string()));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".to_string()));
        }
        if !(self.max_frame_time.is_finite() && self.max_frame_time > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_frame_time must be positive, got {}",
                self.max_frame_time
            )));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::Invalid(format!(
                "spawn_probability must be within [0, 1], got {}",
                self.spawn_probability
            )));
        }
        Ok(())
    }

    /// Number of drop-wide columns that fit across the viewport
    pub fn total_columns(&self) -> u32 {
        (f64::from(self.viewport.width) / self.drop.width).floor() as u32
    }
}
