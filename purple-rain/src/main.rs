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
//! Command-line runner for the rain simulation on the headless backend

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use purple_rain::bootstrap;
use purple_rain::platform::{FrameClock, HeadlessPlatform};
use purple_rain::{RainConfig, RainError, RunSummary};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "purple-rain", about = "Falling purple rain, headless")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frames to simulate before quitting; 0 runs until interrupted and
    /// requires --realtime
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Seed for the spawn random source, overriding the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pace frames against the wall clock instead of a fixed step
    #[arg(long)]
    realtime: bool,
}

impl Args {
    /// Reject combinations that would spin a core with no way to stop
    fn validate(&self) -> Result<(), clap::Error> {
        if self.frames == 0 && !self.realtime {
            return Err(Args::command().error(
                ErrorKind::ArgumentConflict,
                "--frames 0 runs forever and needs --realtime to pace the frames",
            ));
        }
        Ok(())
    }
}

fn run(args: &Args) -> Result<RunSummary, RainError> {
    let mut config = match &args.config {
        Some(path) => RainConfig::load_from_file(path)?,
        None => RainConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let clock = if args.realtime {
        FrameClock::RealTime
    } else {
        FrameClock::Fixed
    };
    let mut platform =
        HeadlessPlatform::new(config.viewport.width, config.viewport.height)?.with_clock(clock);
    if args.frames > 0 {
        platform = platform.with_frame_limit(args.frames);
    }

    let source = bootstrap::spawn_source(&config);
    let mut game = bootstrap::build_game(&config, platform, source);
    Ok(game.run())
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    if let Err(e) = args.validate() {
        e.exit();
    }
    log::info!("Starting Purple Rain");

    match panic::catch_unwind(AssertUnwindSafe(|| run(&args))) {
        Ok(Ok(summary)) => {
            log::info!(
                "finished: {} frames, {} entities created, {} destroyed, {} drops left",
                summary.frames,
                summary.entities_created,
                summary.entities_destroyed,
                summary.live_raindrops
            );
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::error!("simulation panicked: {}", message);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["purple-rain"]).unwrap();
        assert_eq!(args.frames, 600);
        assert!(!args.realtime);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_unlimited_frames_need_realtime() {
        let args = Args::try_parse_from(["purple-rain", "--frames", "0"]).unwrap();
        let err = args.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let args = Args::try_parse_from(["purple-rain", "--frames", "0", "--realtime"]).unwrap();
        assert!(args.validate().is_ok());
    }
}
