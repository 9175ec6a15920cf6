//! Configuration of a run.
use crate::{viewer::DisplayConfig, DriveEnvConfig};
use anyhow::Result;
use drive_core::DriverConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`run`](crate::run).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DriveConfig {
    /// Environment id given to `gym.make()`.
    pub env_name: String,

    /// Python modules imported before the environment is created.
    pub module_imports: Vec<String>,

    /// Seed of the environment and of the action space.
    pub seed: i64,

    /// Episodes are truncated after this number of steps.
    pub max_episode_steps: Option<usize>,

    /// Where frames are shown.
    pub display: DisplayConfig,

    /// When to stop.
    pub driver: DriverConfig,
}

impl Default for DriveConfig {
    fn default() -> Self {
        let env_config = DriveEnvConfig::default();
        Self {
            env_name: env_config.name,
            module_imports: env_config.module_imports,
            seed: 0,
            max_episode_steps: None,
            display: DisplayConfig::default(),
            driver: DriverConfig::default(),
        }
    }
}

impl DriveConfig {
    /// Configuration of the environment.
    pub fn env_config(&self) -> DriveEnvConfig {
        DriveEnvConfig::default()
            .name(self.env_name.clone())
            .module_imports(self.module_imports.clone())
            .max_steps(self.max_episode_steps)
    }

    /// Constructs [`DriveConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DriveConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
