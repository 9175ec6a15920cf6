//! Wrapper of gym environments implemented in Python.
use crate::{util::pyobj_to_frame, GymActSpace, GymEnvConfig};
use anyhow::{bail, Result};
use drive_core::{error::DriveError, record::Record, Act, Env, Frame, Info, Obs, Render, Step};
use log::{debug, info, trace, warn};
use pyo3::{
    exceptions::PyTypeError,
    types::{IntoPyDict, PyDict, PyTuple},
    PyAny, PyErr, PyObject, Python, ToPyObject,
};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// Information given at every step of the interaction with the environment.
///
/// Currently, it is empty and used to match the type signature.
pub struct GymInfo {}

impl Info for GymInfo {}

/// Convert [`PyObject`] to [`GymEnv`]`::Obs` with a preprocessing.
pub trait GymObsFilter<O: Obs> {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Build filter.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Convert PyObject into observation with filtering.
    fn filt(&mut self, obs: PyObject) -> Result<(O, Record)>;

    /// Called when resetting the environment.
    ///
    /// This method is useful for stateful filters.
    fn reset(&mut self, obs: PyObject) -> Result<O> {
        let (obs, _) = self.filt(obs)?;
        Ok(obs)
    }
}

/// Convert [`GymEnv`]`::Act` to [`PyObject`] with a preprocessing.
pub trait GymActFilter<A: Act> {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Build filter.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Filter action and convert it to PyObject.
    fn filt(&mut self, act: A) -> Result<(PyObject, Record)>;

    /// Called when resetting the environment.
    ///
    /// This method is useful for stateful filters.
    fn reset(&mut self) {}
}

/// An environment in [OpenAI gym](https://github.com/openai/gym).
pub struct GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    env: PyObject,

    act_space: GymActSpace,

    count_steps: usize,

    max_steps: Option<usize>,

    obs_filter: OF,

    act_filter: AF,

    /// `render(mode='rgb_array')` instead of `render()`.
    legacy_render: bool,

    /// Seed used at the next call of the reset method.
    initial_seed: Option<i64>,

    closed: bool,

    phantom: PhantomData<(O, A)>,
}

impl<O, A, OF, AF> GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    /// The action space of the environment.
    ///
    /// The returned space is seeded with the seed given to [`Env::build`].
    pub fn act_space(&self) -> GymActSpace {
        self.act_space.clone()
    }

    /// Returns `true` after [`Env::close`].
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_open(&self) -> Result<()> {
        match self.closed {
            true => Err(DriveError::EnvClosed.into()),
            false => Ok(()),
        }
    }
}

/// Calls `make(name, render_mode=render_mode)`.
///
/// Old versions of gym reject `render_mode` with a `TypeError`; the environment
/// is then made without it. The returned flag is `true` when frames must be
/// requested with `render(mode='rgb_array')`.
fn make_env<'py>(
    py: Python<'py>,
    make: &'py PyAny,
    name: &str,
    render_mode: Option<&str>,
) -> Result<(&'py PyAny, bool)> {
    match render_mode {
        None => Ok((make.call1((name,))?, true)),
        Some(mode) => {
            let kwargs = vec![("render_mode", mode)].into_py_dict(py);
            match make.call((name,), Some(kwargs)) {
                Ok(env) => Ok((env, false)),
                Err(e) if e.is_instance::<PyTypeError>(py) => {
                    info!("gym.make() does not accept render_mode, using render(mode=...)");
                    Ok((make.call1((name,))?, true))
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

/// Calls `reset(seed=seed)`, or `seed(seed)` then `reset()` for old versions of gym.
fn reset_with_seed(py: Python, env: &PyAny, seed: i64) -> Result<PyObject> {
    let kwargs = vec![("seed", seed)].into_py_dict(py);
    match env.call_method("reset", (), Some(kwargs)) {
        Ok(ret) => Ok(ret.to_object(py)),
        Err(e) if e.is_instance::<PyTypeError>(py) => {
            debug!("reset() does not accept seed, calling seed() instead");
            env.call_method1("seed", (seed,))?;
            Ok(env.call_method0("reset")?.to_object(py))
        }
        Err(e) => Err(e.into()),
    }
}

/// Takes the observation from the return value of `reset()`,
/// which is `(obs, info)` with a dict `info` in new versions of gym.
fn obs_of_reset(py: Python, ret: &PyAny) -> PyObject {
    match ret.downcast::<PyTuple>() {
        Ok(t) if t.len() == 2 && t.get_item(1).downcast::<PyDict>().is_ok() => {
            t.get_item(0).to_object(py)
        }
        _ => ret.to_object(py),
    }
}

/// Splits the return value of `step()` into `(obs, reward, terminated, truncated)`.
///
/// Old versions of gym return `(obs, reward, done, info)`; an episode cut by
/// the `TimeLimit` wrapper is reported in `info["TimeLimit.truncated"]`.
fn split_step(py: Python, ret: &PyAny) -> Result<(PyObject, f32, bool, bool)> {
    let ret: &PyTuple = ret.downcast().map_err(PyErr::from)?;
    match ret.len() {
        5 => {
            let obs = ret.get_item(0).to_object(py);
            let reward: f64 = ret.get_item(1).extract()?;
            let terminated = ret.get_item(2).is_true()?;
            let truncated = ret.get_item(3).is_true()?;
            Ok((obs, reward as f32, terminated, truncated))
        }
        4 => {
            let obs = ret.get_item(0).to_object(py);
            let reward: f64 = ret.get_item(1).extract()?;
            let done = ret.get_item(2).is_true()?;
            let time_limit = match ret.get_item(3).downcast::<PyDict>() {
                Ok(info) => match info.get_item("TimeLimit.truncated") {
                    Some(v) => v.is_true()?,
                    None => false,
                },
                Err(_) => false,
            };
            Ok((obs, reward as f32, done && !time_limit, done && time_limit))
        }
        n => bail!("step() returned {} values, expected 4 or 5", n),
    }
}

impl<O, A, OF, AF> Env for GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    type Obs = O;
    type Act = A;
    type Info = GymInfo;
    type Config = GymEnvConfig<OF::Config, AF::Config>;

    /// Constructs [`GymEnv`].
    ///
    /// * `seed` - The seed value of the random number generator.
    ///   This value will be used at the first call of the reset method and
    ///   for sampling the action space.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Python::with_gil(|py| -> Result<Self> {
            // sys.argv is used by pyglet library, which is responsible for rendering.
            // Depending on the python interpreter, however, sys.argv can be empty.
            py.run(
                "import sys\nif len(sys.argv) == 0:\n    sys.argv.append('drive')\n",
                None,
                None,
            )?;
            let sys = py.import("sys")?;
            info!("Initialize GymEnv");
            info!("{}", sys.getattr("path")?);
            info!("Python version = {}", sys.getattr("version")?);

            let gym = py.import("gym")?;
            for module in config.module_imports.iter() {
                py.import(module.as_str())?;
                debug!("Imported {}", module);
            }

            let name = config.name.as_str();
            let make = gym.getattr("make")?;
            let (env, legacy_render) =
                make_env(py, make, name, config.render_mode.as_deref())?;
            info!("Created {}", name);
            info!("Observation space = {}", env.getattr("observation_space")?.str()?);

            let act_space = GymActSpace::from_py(py, env.getattr("action_space")?, seed as u64)?;

            Ok(GymEnv {
                env: env.into(),
                act_space,
                count_steps: 0,
                max_steps: config.max_steps,
                obs_filter: OF::build(&config.obs_filter_config)?,
                act_filter: AF::build(&config.act_filter_config)?,
                legacy_render,
                initial_seed: Some(seed),
                closed: false,
                phantom: PhantomData,
            })
        })
    }

    /// Resets the environment and returns an observation.
    ///
    /// This method also resets the [`GymObsFilter`] and [`GymActFilter`].
    fn reset(&mut self) -> Result<O> {
        trace!("GymEnv::reset()");
        self.check_open()?;
        self.act_filter.reset();
        self.count_steps = 0;

        let seed = self.initial_seed.take();
        let obs = Python::with_gil(|py| -> Result<PyObject> {
            let ret = match seed {
                Some(seed) => reset_with_seed(py, self.env.as_ref(py), seed)?,
                None => self.env.call_method0(py, "reset")?,
            };
            Ok(obs_of_reset(py, ret.as_ref(py)))
        })?;

        self.obs_filter.reset(obs)
    }

    /// Resets the environment with the given index.
    ///
    /// Specifically, `env.reset(seed=ix)` is called in the Python interpreter.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.initial_seed = Some(ix as _);
        self.reset()
    }

    /// Runs a step of the environment's dynamics.
    ///
    /// The returned [`Record`] is composed of the records of the
    /// [`GymObsFilter`] and [`GymActFilter`].
    fn step(&mut self, a: &A) -> Result<(Step<Self>, Record)> {
        trace!("GymEnv::step()");
        self.check_open()?;

        let (a_py, record_a) = self.act_filter.filt(a.clone())?;
        let (obs, reward, is_terminated, mut is_truncated) =
            Python::with_gil(|py| -> Result<(PyObject, f32, bool, bool)> {
                let ret = self.env.call_method1(py, "step", (a_py,))?;
                split_step(py, ret.as_ref(py))
            })?;
        let (obs, record_o) = self.obs_filter.filt(obs)?;

        self.count_steps += 1;
        if let Some(max_steps) = self.max_steps {
            if self.count_steps >= max_steps {
                is_truncated = true;
            }
        }

        Ok((
            Step::new(obs, a.clone(), reward, is_terminated, is_truncated, GymInfo {}),
            record_o.merge(record_a),
        ))
    }

    /// Calls `close()` of the Python environment. Later calls do nothing.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        Python::with_gil(|py| self.env.call_method0(py, "close"))?;
        info!("Closed GymEnv");
        Ok(())
    }
}

impl<O, A, OF, AF> Render for GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    /// Renders the current state as an RGB array.
    fn render(&mut self) -> Result<Frame> {
        self.check_open()?;
        Python::with_gil(|py| -> Result<Frame> {
            let frame = match self.legacy_render {
                true => {
                    let kwargs = vec![("mode", "rgb_array")].into_py_dict(py);
                    self.env.call_method(py, "render", (), Some(kwargs))?
                }
                false => self.env.call_method0(py, "render")?,
            };
            pyobj_to_frame(py, frame.as_ref(py))
        })
    }
}

impl<O, A, OF, AF> Drop for GymEnv<O, A, OF, AF>
where
    O: Obs,
    A: Act,
    OF: GymObsFilter<O>,
    AF: GymActFilter<A>,
{
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            if let Err(e) = Python::with_gil(|py| self.env.call_method0(py, "close")) {
                warn!("Failed to close the environment: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal stand-ins for the environments and `make` functions of old and new gym.
    const GYM_STUBS: &str = r#"
class OldEnv:
    def __init__(self):
        self.seeded = None
    def seed(self, seed):
        self.seeded = seed
    def reset(self):
        return [0.0, 1.0]

class NewEnv:
    def __init__(self, render_mode=None):
        self.render_mode = render_mode
        self.seeded = None
    def reset(self, seed=None):
        self.seeded = seed
        return ([0.0, 1.0], {})

def old_make(name):
    return OldEnv()

def new_make(name, render_mode=None):
    return NewEnv(render_mode)

def broken_make(name, render_mode=None):
    raise ValueError(name)
"#;

    fn stubs(py: Python<'_>) -> Result<&PyDict> {
        let globals = PyDict::new(py);
        py.run(GYM_STUBS, Some(globals), None)?;
        Ok(globals)
    }

    fn stub<'py>(globals: &'py PyDict, name: &str) -> Result<&'py PyAny> {
        match globals.get_item(name) {
            Some(obj) => Ok(obj),
            None => bail!("{} is not defined", name),
        }
    }

    #[test]
    fn make_env_passes_render_mode() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let globals = stubs(py)?;
            let make = stub(globals, "new_make")?;
            let (env, legacy) = make_env(py, make, "Loop-v0", Some("rgb_array"))?;
            assert!(!legacy);
            assert_eq!(env.getattr("render_mode")?.extract::<String>()?, "rgb_array");
            Ok(())
        })
    }

    #[test]
    fn make_env_falls_back_when_render_mode_is_rejected() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let globals = stubs(py)?;
            let make = stub(globals, "old_make")?;
            let (env, legacy) = make_env(py, make, "Loop-v0", Some("rgb_array"))?;
            assert!(legacy);
            assert!(env.hasattr("seed")?);

            let (_, legacy) = make_env(py, stub(globals, "new_make")?, "Loop-v0", None)?;
            assert!(legacy);
            Ok(())
        })
    }

    #[test]
    fn make_env_keeps_other_errors() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let globals = stubs(py)?;
            let res = make_env(py, stub(globals, "broken_make")?, "Loop-v0", Some("rgb_array"));
            assert!(res.is_err());
            Ok(())
        })
    }

    #[test]
    fn reset_with_seed_uses_the_seed_keyword() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let globals = stubs(py)?;
            let env = stub(globals, "NewEnv")?.call0()?;
            let ret = reset_with_seed(py, env, 7)?;
            assert_eq!(env.getattr("seeded")?.extract::<i64>()?, 7);

            let obs = obs_of_reset(py, ret.as_ref(py));
            assert_eq!(obs.as_ref(py).extract::<Vec<f64>>()?, vec![0.0, 1.0]);
            Ok(())
        })
    }

    #[test]
    fn reset_with_seed_falls_back_to_seed_method() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let globals = stubs(py)?;
            let env = stub(globals, "OldEnv")?.call0()?;
            let ret = reset_with_seed(py, env, 3)?;
            assert_eq!(env.getattr("seeded")?.extract::<i64>()?, 3);

            let obs = obs_of_reset(py, ret.as_ref(py));
            assert_eq!(obs.as_ref(py).extract::<Vec<f64>>()?, vec![0.0, 1.0]);
            Ok(())
        })
    }

    #[test]
    fn obs_of_reset_needs_an_info_dict() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let ret = py.eval("((4, 5), {'x': 1})", None, None)?;
            let obs = obs_of_reset(py, ret);
            assert_eq!(obs.as_ref(py).extract::<Vec<i64>>()?, vec![4, 5]);

            // A pair observation without info is returned as is
            let ret = py.eval("(4, 5)", None, None)?;
            let obs = obs_of_reset(py, ret);
            assert_eq!(obs.as_ref(py).extract::<Vec<i64>>()?, vec![4, 5]);

            let ret = py.eval("[4, 5, 6]", None, None)?;
            let obs = obs_of_reset(py, ret);
            assert_eq!(obs.as_ref(py).extract::<Vec<i64>>()?, vec![4, 5, 6]);
            Ok(())
        })
    }

    #[test]
    fn split_step_reads_five_values() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let ret = py.eval("([0.5], 1.5, False, True, {})", None, None)?;
            let (obs, reward, terminated, truncated) = split_step(py, ret)?;
            assert_eq!(obs.as_ref(py).extract::<Vec<f64>>()?, vec![0.5]);
            assert_eq!(reward, 1.5);
            assert!(!terminated);
            assert!(truncated);
            Ok(())
        })
    }

    #[test]
    fn split_step_reads_four_values() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let ret = py.eval("([0.5], -1.0, True, {})", None, None)?;
            let (_, reward, terminated, truncated) = split_step(py, ret)?;
            assert_eq!(reward, -1.0);
            assert!(terminated);
            assert!(!truncated);

            let ret = py.eval("([0.5], 0.0, False, None)", None, None)?;
            let (_, _, terminated, truncated) = split_step(py, ret)?;
            assert!(!terminated);
            assert!(!truncated);
            Ok(())
        })
    }

    #[test]
    fn split_step_reads_time_limit_truncation() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let ret = py.eval("([0.5], 0.0, True, {'TimeLimit.truncated': True})", None, None)?;
            let (_, _, terminated, truncated) = split_step(py, ret)?;
            assert!(!terminated);
            assert!(truncated);
            Ok(())
        })
    }

    #[test]
    fn split_step_rejects_other_shapes() -> Result<()> {
        Python::with_gil(|py| -> Result<()> {
            let rets = [
                "()",
                "(1, 2, 3)",
                "([0.5], 0.0, False, False, {}, 1)",
                "[[0.5], 0.0, False, {}]",
            ];
            for code in rets.iter() {
                let ret = py.eval(code, None, None)?;
                assert!(split_step(py, ret).is_err(), "{}", code);
            }
            Ok(())
        })
    }
}
