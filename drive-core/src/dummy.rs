//! A scripted environment, used for tests.
//!
//! [`DummyEnv`] ends every episode after a fixed number of steps, pays a reward
//! of 1 per step and renders a solid frame whose intensity is the step count.
//! It counts calls to its methods so that tests can check how it was driven.
use crate::{
    error::DriveError,
    record::{Record, RecordValue},
    Act, ActionSpace, Env, Frame, Obs, Render, Step,
};
use anyhow::Result;

/// Observation of [`DummyEnv`]: the step index within the episode.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyObs(pub usize);

impl Obs for DummyObs {}

/// Action of [`DummyEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct DummyAct(pub i64);

impl Act for DummyAct {}

/// Discrete action space `{0, .., n - 1}`.
pub struct DummySpace {
    n: i64,
    rng: fastrand::Rng,
}

impl DummySpace {
    /// Creates the space with a seeded generator.
    pub fn new(n: i64, seed: u64) -> Self {
        Self {
            n,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl ActionSpace<DummyAct> for DummySpace {
    fn sample(&mut self) -> Result<DummyAct> {
        Ok(DummyAct(self.rng.i64(0..self.n)))
    }
}

/// Configuration of [`DummyEnv`].
#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    /// Steps until an episode terminates.
    pub episode_len: usize,

    /// Width of rendered frames.
    pub width: u32,

    /// Height of rendered frames.
    pub height: u32,

    /// When set, episodes are truncated instead of terminated.
    pub truncate: bool,
}

impl Default for DummyEnvConfig {
    fn default() -> Self {
        Self {
            episode_len: 5,
            width: 4,
            height: 3,
            truncate: false,
        }
    }
}

/// See the [module documentation](self).
pub struct DummyEnv {
    config: DummyEnvConfig,
    t: usize,
    closed: bool,

    /// Number of calls to `reset`.
    pub n_resets: usize,

    /// Number of calls to `step`.
    pub n_steps: usize,

    /// Number of calls to `render`.
    pub n_renders: usize,

    /// Number of calls to `close`.
    pub n_closes: usize,

    /// Actions received, in order.
    pub acts: Vec<DummyAct>,
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Obs = DummyObs;
    type Act = DummyAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            t: 0,
            closed: false,
            n_resets: 0,
            n_steps: 0,
            n_renders: 0,
            n_closes: 0,
            acts: vec![],
        })
    }

    fn step(&mut self, a: &DummyAct) -> Result<(Step<Self>, Record)> {
        if self.closed {
            return Err(DriveError::EnvClosed.into());
        }
        self.n_steps += 1;
        self.t += 1;
        self.acts.push(a.clone());
        let done = self.t >= self.config.episode_len;
        let (is_terminated, is_truncated) = match self.config.truncate {
            false => (done, false),
            true => (false, done),
        };
        let step = Step::new(DummyObs(self.t), a.clone(), 1.0, is_terminated, is_truncated, ());
        let record = Record::from_slice(&[("act", RecordValue::Array1(vec![a.0 as f32]))]);
        Ok((step, record))
    }

    fn reset(&mut self) -> Result<DummyObs> {
        if self.closed {
            return Err(DriveError::EnvClosed.into());
        }
        self.n_resets += 1;
        self.t = 0;
        Ok(DummyObs(0))
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<DummyObs> {
        self.reset()
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.n_closes += 1;
        }
        Ok(())
    }
}

impl Render for DummyEnv {
    fn render(&mut self) -> Result<Frame> {
        self.n_renders += 1;
        let (w, h) = (self.config.width, self.config.height);
        let data = vec![self.t as u8; (w * h * 3) as usize];
        Ok(Frame::new(w, h, data)?)
    }
}
