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
//! Frame loop
//!
//! The loop has two states. It starts `Running` and ends `Stopped`, which is
//! terminal. Every iteration asks the platform for elapsed time, checks for
//! an exit request, and then runs the whole processor pipeline once. An
//! exit request stops the loop before any processor runs for that frame.

use crate::config::RainConfig;
use crate::ecs::components::Raindrop;
use crate::ecs::scheduler::Scheduler;
use crate::ecs::{Entity, Frame, World};
use crate::platform::Platform;
use log::{debug, info};

/// Whether the loop still runs frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Frames are being processed
    Running,
    /// The loop has shut down; terminal
    Stopped,
}

/// Totals reported when the loop stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames whose pipeline ran
    pub frames: u64,
    /// Entities created, background included
    pub entities_created: u64,
    /// Entities destroyed, background included
    pub entities_destroyed: u64,
    /// Raindrops alive when the loop stopped
    pub live_raindrops: usize,
}

/// Clamp a raw frame interval into `[0, max_frame_time]`
///
/// Non-finite or negative intervals become zero.
pub fn clamp_dt(raw: f64, max_frame_time: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(max_frame_time)
    } else {
        0.0
    }
}

/// Drives a world and its scheduler from a platform clock
pub struct GameLoop<P: Platform> {
    platform: P,
    world: World,
    scheduler: Scheduler,
    background: Option<Entity>,
    target_fps: u32,
    max_frame_time: f64,
    state: LoopState,
    frames: u64,
}

impl<P: Platform> GameLoop<P> {
    /// Assemble a loop; it starts in [`LoopState::Running`]
    pub fn new(platform: P, world: World, scheduler: Scheduler, config: &RainConfig) -> Self {
        GameLoop {
            platform,
            world,
            scheduler,
            background: None,
            target_fps: config.target_fps,
            max_frame_time: config.max_frame_time,
            state: LoopState::Running,
            frames: 0,
        }
    }

    /// Entity destroyed at teardown
    pub fn with_background(mut self, background: Entity) -> Self {
        self.background = Some(background);
        self
    }

    /// Current state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames processed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The simulated world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for seeding scenarios
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The backend
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the backend, e.g. to queue input
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Run a single iteration
    pub fn step(&mut self) -> LoopState {
        if self.state == LoopState::Stopped {
            return LoopState::Stopped;
        }

        let dt = clamp_dt(self.platform.tick(self.target_fps), self.max_frame_time);

        let events = self.platform.poll_events();
        if let Some(event) = events.iter().find(|event| event.is_exit_request()) {
            info!("exit requested by {:?} after {} frames", event, self.frames);
            self.stop();
            return LoopState::Stopped;
        }

        let mut frame = Frame::new(dt, self.frames, &mut self.platform);
        self.scheduler.run(&mut self.world, &mut frame);
        self.frames += 1;
        LoopState::Running
    }

    /// Run until the platform asks to exit
    pub fn run(&mut self) -> RunSummary {
        info!(
            "running {} processors at {} fps",
            self.scheduler.processor_count(),
            self.target_fps
        );
        while self.step() == LoopState::Running {}
        self.summary()
    }

    /// Move to [`LoopState::Stopped`] and tear the backend down
    ///
    /// Calling it again has no effect.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;

        if let Some(background) = self.background.take() {
            self.world.destroy_entity(background);
        }
        self.platform.shutdown();
        debug!("game loop stopped");
    }

    /// Totals so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            entities_created: self.world.created_total(),
            entities_destroyed: self.world.destroyed_total(),
            live_raindrops: self.world.storage::<Raindrop>().len(),
        }
    }

    /// Take the backend back, e.g. to inspect recorded frames
    pub fn into_platform(self) -> P {
        self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap;
    use crate::ecs::components::Background;
    use crate::platform::{FrameClock, HeadlessPlatform, Key, PlatformEvent};
    use crate::processors::FixedSpawnSource;

    fn headless_loop(clock: FrameClock) -> GameLoop<HeadlessPlatform> {
        let config = RainConfig::default();
        let platform = HeadlessPlatform::new(1280, 480).unwrap().with_clock(clock);
        bootstrap::build_game(&config, platform, FixedSpawnSource::never())
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(1.0 / 60.0, 0.25), 1.0 / 60.0);
        assert_eq!(clamp_dt(3.0, 0.25), 0.25);
        assert_eq!(clamp_dt(-1.0, 0.25), 0.0);
        assert_eq!(clamp_dt(f64::NAN, 0.25), 0.0);
        assert_eq!(clamp_dt(f64::INFINITY, 0.25), 0.0);
    }

    #[test]
    fn test_starts_running() {
        let game = headless_loop(FrameClock::Fixed);
        assert_eq!(game.state(), LoopState::Running);
        assert_eq!(game.frames(), 0);
    }

    #[test]
    fn test_step_presents_a_frame() {
        let mut game = headless_loop(FrameClock::Fixed);
        assert_eq!(game.step(), LoopState::Running);
        assert_eq!(game.frames(), 1);
        assert_eq!(game.platform().frames_presented(), 1);
    }

    #[test]
    fn test_quit_stops_without_processing() {
        let mut game = headless_loop(FrameClock::Fixed);
        game.step();
        game.platform_mut().push_event(PlatformEvent::Quit);

        assert_eq!(game.step(), LoopState::Stopped);
        assert_eq!(game.frames(), 1);
        assert_eq!(game.platform().frames_presented(), 1);
        assert!(game.platform().is_shut_down());
    }

    #[test]
    fn test_escape_stops() {
        let mut game = headless_loop(FrameClock::Fixed);
        game.platform_mut().push_event(PlatformEvent::KeyDown(Key::Space));
        assert_eq!(game.step(), LoopState::Running);

        game.platform_mut().push_event(PlatformEvent::KeyDown(Key::Escape));
        assert_eq!(game.step(), LoopState::Stopped);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut game = headless_loop(FrameClock::Fixed);
        game.stop();
        assert_eq!(game.step(), LoopState::Stopped);
        assert_eq!(game.step(), LoopState::Stopped);
        assert_eq!(game.frames(), 0);
    }

    #[test]
    fn test_teardown_destroys_background() {
        let mut game = headless_loop(FrameClock::Fixed);
        assert!(game.world().single::<Background>().is_some());

        game.stop();
        assert!(game.world().single::<Background>().is_none());
        assert_eq!(game.world().entity_count(), 0);
    }

    #[test]
    fn test_run_honours_frame_limit() {
        let config = RainConfig::default();
        let platform = HeadlessPlatform::new(1280, 480).unwrap().with_frame_limit(5);
        let mut game = bootstrap::build_game(&config, platform, FixedSpawnSource::always(3));

        let summary = game.run();

        assert_eq!(summary.frames, 5);
        assert_eq!(summary.live_raindrops, 1);
        assert_eq!(summary.entities_created, 2);
        assert_eq!(summary.entities_destroyed, 1);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut game = headless_loop(FrameClock::Scripted(10.0));
        let drop = crate::processors::spawn_raindrop(
            game.world_mut(),
            15.0,
            0.0,
            &RainConfig::default().drop,
        );

        game.step();

        let y = game
            .world()
            .get::<crate::ecs::components::Position>(drop)
            .unwrap()
            .y;
        assert_eq!(y, 700.0 * 0.25);
    }
}
