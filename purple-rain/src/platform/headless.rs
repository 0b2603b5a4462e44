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
//! Off-screen backend that records draw commands

use super::{DrawCommand, Platform, PlatformError, PlatformEvent, Renderer};
use crate::ecs::components::Rgb;
use log::{debug, info};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How [`HeadlessPlatform::tick`] measures time
#[derive(Debug, Clone, Copy)]
pub enum FrameClock {
    /// Every tick reports exactly `1 / target_fps` seconds without sleeping
    Fixed,
    /// Every tick reports this many seconds without sleeping
    Scripted(f64),
    /// Sleep to the frame boundary and report wall-clock time
    RealTime,
}

/// Platform backend without a window
///
/// Draw calls are collected into a display list. When a frame is presented
/// the list becomes [`HeadlessPlatform::last_frame`] and a new one starts.
pub struct HeadlessPlatform {
    width: u32,
    height: u32,
    clock: FrameClock,
    last_tick: Option<Instant>,
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    events: VecDeque<PlatformEvent>,
    frame_limit: Option<u64>,
    ticks: u64,
    frames_presented: u64,
    rects_drawn: u64,
    shut_down: bool,
}

impl HeadlessPlatform {
    /// Open a headless display of the given size
    ///
    /// Fails if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, PlatformError> {
        if width == 0 || height == 0 {
            return Err(PlatformError::Init(format!(
                "cannot open a {}x{} display",
                width, height
            )));
        }

        info!("opened headless display {}x{}", width, height);
        Ok(HeadlessPlatform {
            width,
            height,
            clock: FrameClock::Fixed,
            last_tick: None,
            pending: Vec::new(),
            last_frame: Vec::new(),
            events: VecDeque::new(),
            frame_limit: None,
            ticks: 0,
            frames_presented: 0,
            rects_drawn: 0,
            shut_down: false,
        })
    }

    /// Use a different clock
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Report [`PlatformEvent::Quit`] on the tick after the first `frames`
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Queue an input event for the next poll
    pub fn push_event(&mut self, event: PlatformEvent) {
        self.events.push_back(event);
    }

    /// Display size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Commands issued since the last present
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Number of rectangles drawn over the whole run
    pub fn rects_drawn(&self) -> u64 {
        self.rects_drawn
    }

    /// Whether [`Platform::shutdown`] has been called
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl Renderer for HeadlessPlatform {
    fn clear(&mut self, color: Rgb) {
        self.pending.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.rects_drawn += 1;
        self.pending.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn present(&mut self) {
        self.pending.push(DrawCommand::Present);
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        let mut events: Vec<PlatformEvent> = self.events.drain(..).collect();
        if let Some(limit) = self.frame_limit {
            if self.ticks > limit {
                events.push(PlatformEvent::Quit);
            }
        }
        events
    }

    fn tick(&mut self, target_fps: u32) -> f64 {
        self.ticks += 1;
        let frame = 1.0 / f64::from(target_fps.max(1));

        match self.clock {
            FrameClock::Fixed => frame,
            FrameClock::Scripted(dt) => dt,
            FrameClock::RealTime => {
                let now = Instant::now();
                let Some(last) = self.last_tick else {
                    self.last_tick = Some(now);
                    return 0.0;
                };

                let budget = Duration::from_secs_f64(frame);
                let spent = now.duration_since(last);
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }

                let now = Instant::now();
                self.last_tick = Some(now);
                now.duration_since(last).as_secs_f64()
            }
        }
    }

    fn shutdown(&mut self) {
        debug!(
            "headless display closing after {} frames",
            self.frames_presented
        );
        self.pending.clear();
        self.shut_down = true;
    }
}
