//! A wrapper of [gym](https://github.com/openai/gym) environments on Python.
//!
//! [`GymEnv`] embeds a Python interpreter with [`PyO3`](https://github.com/PyO3/pyo3)
//! and forwards reset/step/render/close to an environment created by `gym.make()`.
//! Simulation, physics and rendering stay in Python; this crate only moves
//! observations, actions and frames across the language boundary.
//!
//! It was written for [Duckietown](https://github.com/duckietown/gym-duckietown)
//! environments such as `Duckietown-loop_obstacles-v0`, which register themselves
//! with gym when `gym_duckietown` is imported (see [`GymEnvConfig::module_imports`]),
//! but any gym environment with an `rgb_array` renderer works.
//!
//! ## Observation
//!
//! Observations are converted with a [`GymObsFilter`]. The built-in
//! [`ArrayObsFilter`] turns a numpy array into [`ndarray::ArrayD`]`<f32>` and then
//! into the observation type with `into()`.
//!
//! ## Action
//!
//! Actions are converted with a [`GymActFilter`]. The built-in [`GymActRawFilter`]
//! passes a [`GymAct`] to Python unchanged: a Python `int` for discrete actions,
//! a numpy array for continuous ones.
//!
//! ## Action space
//!
//! [`GymActSpace`] is read from `env.action_space` when the environment is built.
//! It implements [`ActionSpace`](drive_core::ActionSpace), so
//! [`RandomPolicy`](drive_core::RandomPolicy) can drive the environment with it.
//!
//! ## Gym versions
//!
//! Both the old API (`reset()` returning the observation, 4-tuple `step()`,
//! `render(mode=...)`) and the new one (`reset()` returning `(obs, info)`,
//! 5-tuple `step()`, `render_mode` given to `make()`) are supported.
mod act;
mod base;
mod config;
mod obs;
mod space;
pub mod util;
pub use act::{GymAct, GymActRawFilter, GymActRawFilterConfig};
pub use base::{GymActFilter, GymEnv, GymInfo, GymObsFilter};
pub use config::GymEnvConfig;
pub use obs::{ArrayObsFilter, ArrayObsFilterConfig, GymObs};
pub use space::{GymActSpace, SpaceKind};
