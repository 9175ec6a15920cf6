//! The drive loop.
//!
//! [`Driver::run`] is the whole program in one function: reset the environment,
//! then repeatedly sample an action, step, render, show the frame, and reset
//! when the episode is over.
mod config;
use crate::{
    record::{Record, RecordValue, Recorder},
    Env, FrameSink, Policy, Render,
};
use anyhow::Result;
use chrono::Local;
pub use config::DriverConfig;
use log::{debug, info};
use std::{thread, time::Duration};

/// What happened during [`Driver::run`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriveSummary {
    /// Number of finished episodes.
    pub episodes: usize,

    /// Number of environment steps over all episodes.
    pub steps: usize,

    /// Sum of rewards of each finished episode.
    pub returns: Vec<f32>,
}

/// Runs a policy on an environment and shows every rendered frame.
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    /// Creates a driver.
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Drives `env` with `policy` until a stop condition of [`DriverConfig`] holds.
    ///
    /// Each iteration samples an action, steps the environment, renders it and
    /// hands the frame to `sink`. A step record (the environment's record plus
    /// `episode`, `step` and `reward`) goes to `recorder`, and so does an episode
    /// record (`episode`, `steps`, `return`, `time`) when an episode ends.
    ///
    /// The environment is not closed here.
    pub fn run<E, P, S, R>(
        &self,
        env: &mut E,
        policy: &mut P,
        sink: &mut S,
        recorder: &mut R,
    ) -> Result<DriveSummary>
    where
        E: Env + Render,
        P: Policy<E>,
        S: FrameSink + ?Sized,
        R: Recorder + ?Sized,
    {
        let wait = Duration::from_millis(self.config.wait_in_millis);
        let mut summary = DriveSummary::default();
        let mut obs = env.reset()?;
        let mut episode_steps = 0;
        let mut episode_return = 0f32;

        info!("Start driving");

        loop {
            if self.step_limit_reached(summary.steps) {
                info!("Reached the step limit ({} steps)", summary.steps);
                break;
            }
            if self.episode_limit_reached(summary.episodes) {
                info!("Reached the episode limit ({} episodes)", summary.episodes);
                break;
            }

            let act = policy.sample(&obs)?;
            let (step, mut record) = env.step(&act)?;
            summary.steps += 1;
            episode_steps += 1;
            episode_return += step.reward;

            let frame = env.render()?;
            sink.clear()?;
            sink.show(&frame)?;

            record.insert("episode", RecordValue::Scalar(summary.episodes as _));
            record.insert("step", RecordValue::Scalar(episode_steps as _));
            record.insert("reward", RecordValue::Scalar(step.reward));
            recorder.write(record);

            if !step.is_done() {
                obs = step.obs;
            } else {
                info!(
                    "Episode {}: {} steps, return = {}",
                    summary.episodes, episode_steps, episode_return
                );
                recorder.write(Record::from_slice(&[
                    ("episode", RecordValue::Scalar(summary.episodes as _)),
                    ("steps", RecordValue::Scalar(episode_steps as _)),
                    ("return", RecordValue::Scalar(episode_return)),
                    ("time", RecordValue::DateTime(Local::now())),
                ]));
                summary.episodes += 1;
                summary.returns.push(episode_return);
                episode_steps = 0;
                episode_return = 0.0;

                if !self.config.reset_on_done {
                    break;
                }
                debug!("Reset the environment");
                obs = env.reset()?;
            }

            if !wait.is_zero() {
                thread::sleep(wait);
            }
        }

        recorder.flush();
        Ok(summary)
    }

    fn step_limit_reached(&self, steps: usize) -> bool {
        matches!(self.config.max_steps, Some(max) if steps >= max)
    }

    fn episode_limit_reached(&self, episodes: usize) -> bool {
        matches!(self.config.max_episodes, Some(max) if episodes >= max)
    }
}
