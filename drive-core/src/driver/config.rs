//! Configuration of [`Driver`](super::Driver).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Driver`](super::Driver).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct DriverConfig {
    /// Stop after this many finished episodes; `None` runs until `max_steps`.
    pub max_episodes: Option<usize>,

    /// Stop after this many environment steps in total.
    pub max_steps: Option<usize>,

    /// Reset the environment when an episode ends. When `false`, the run stops
    /// at the end of the first episode without resetting.
    pub reset_on_done: bool,

    /// Pause after every step, in milliseconds.
    pub wait_in_millis: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_episodes: Some(1),
            max_steps: None,
            reset_on_done: true,
            wait_in_millis: 0,
        }
    }
}

impl DriverConfig {
    /// Sets the number of episodes.
    pub fn max_episodes(mut self, v: Option<usize>) -> Self {
        self.max_episodes = v;
        self
    }

    /// Sets the maximum number of steps.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Sets whether the environment is reset at the end of an episode.
    pub fn reset_on_done(mut self, v: bool) -> Self {
        self.reset_on_done = v;
        self
    }

    /// Sets the pause after every step.
    pub fn wait_in_millis(mut self, v: u64) -> Self {
        self.wait_in_millis = v;
        self
    }

    /// Constructs [`DriverConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DriverConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
