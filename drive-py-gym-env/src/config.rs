//! Configuration of [`GymEnv`](crate::GymEnv).
use serde::{Deserialize, Serialize};

/// Configuration of [`GymEnv`](crate::GymEnv).
///
/// `OC` and `AC` are the configurations of the observation and action filters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(
    default,
    bound(deserialize = "OC: Deserialize<'de> + Default, AC: Deserialize<'de> + Default")
)]
pub struct GymEnvConfig<OC, AC> {
    /// Environment id given to `gym.make()`.
    pub name: String,

    /// Python modules imported before `gym.make()`.
    ///
    /// Simulators usually register their environments with gym on import.
    pub module_imports: Vec<String>,

    /// Render mode given to `gym.make()`.
    ///
    /// With old versions of gym, `make()` rejects this argument; the environment
    /// is then created without it and rendered with `render(mode=...)`.
    pub render_mode: Option<String>,

    /// The episode is truncated after this number of steps.
    pub max_steps: Option<usize>,

    /// Configuration of the observation filter.
    pub obs_filter_config: OC,

    /// Configuration of the action filter.
    pub act_filter_config: AC,
}

impl<OC: Default, AC: Default> Default for GymEnvConfig<OC, AC> {
    fn default() -> Self {
        Self {
            name: "Duckietown-loop_obstacles-v0".to_string(),
            module_imports: vec!["gym_duckietown".to_string()],
            render_mode: Some("rgb_array".to_string()),
            max_steps: None,
            obs_filter_config: OC::default(),
            act_filter_config: AC::default(),
        }
    }
}

impl<OC, AC> GymEnvConfig<OC, AC> {
    /// Set the name of the environment.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the Python modules imported before creating the environment.
    pub fn module_imports(mut self, v: Vec<String>) -> Self {
        self.module_imports = v;
        self
    }

    /// Set the render mode.
    pub fn render_mode(mut self, render_mode: Option<String>) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Set the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Set the observation filter config.
    pub fn obs_filter_config(mut self, obs_filter_config: OC) -> Self {
        self.obs_filter_config = obs_filter_config;
        self
    }

    /// Set the action filter config.
    pub fn act_filter_config(mut self, act_filter_config: AC) -> Self {
        self.act_filter_config = act_filter_config;
        self
    }
}
