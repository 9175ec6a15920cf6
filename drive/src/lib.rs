//! Drive a gym simulator with random actions and watch the rendered frames.
//!
//! This crate puts [`drive_core`] and [`drive_py_gym_env`] together:
//!
//! * [`viewer`] - shows frames, resized, in the terminal or in an image file.
//! * [`DriveConfig`] - everything a run needs, loadable from YAML.
//! * [`run`] - builds the environment, drives it and closes it.
//!
//! ```no_run
//! use drive::{run, DriveConfig};
//!
//! let config = DriveConfig::default();
//! let summary = run(&config).unwrap();
//! println!("{} steps", summary.steps);
//! ```
mod config;
pub mod viewer;
pub use config::DriveConfig;

use anyhow::Result;
use drive_core::{record::LogRecorder, DriveSummary, Driver, Env as _, RandomPolicy};
use drive_py_gym_env::{
    ArrayObsFilter, ArrayObsFilterConfig, GymAct, GymActRawFilter, GymActRawFilterConfig, GymEnv,
    GymEnvConfig, GymObs,
};
use log::{info, warn};

type ObsFilter = ArrayObsFilter<GymObs>;
type ActFilter = GymActRawFilter<GymAct>;

/// The environment driven by [`run`].
pub type DriveEnv = GymEnv<GymObs, GymAct, ObsFilter, ActFilter>;

/// Configuration of [`DriveEnv`].
pub type DriveEnvConfig = GymEnvConfig<ArrayObsFilterConfig, GymActRawFilterConfig>;

/// Builds the environment, drives it with a random policy and closes it.
///
/// The environment is closed exactly once, also when driving fails.
pub fn run(config: &DriveConfig) -> Result<DriveSummary> {
    let mut env = DriveEnv::build(&config.env_config(), config.seed)?;
    let mut policy = RandomPolicy::new(env.act_space());
    let mut sink = viewer::build_sink(&config.display)?;
    let mut recorder = LogRecorder::default();

    let driver = Driver::new(config.driver.clone());
    let result = driver.run(&mut env, &mut policy, &mut sink, &mut recorder);
    let closed = env.close();
    if let (Err(_), Err(e)) = (&result, &closed) {
        warn!("Failed to close the environment: {}", e);
    }

    let summary = result?;
    closed?;
    info!(
        "Finished {} episode(s) in {} steps",
        summary.episodes, summary.steps
    );
    if summary.episodes == 0 {
        warn!("No episode finished");
    }
    Ok(summary)
}
