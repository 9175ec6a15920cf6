//! Action spaces read from Python.
use crate::{util::pyobj_to_arrayd, GymAct};
use anyhow::Result;
use drive_core::{error::DriveError, ActionSpace};
use log::{debug, info};
use ndarray::ArrayD;
use pyo3::{PyAny, PyObject, Python, ToPyObject};

/// Kinds of action spaces.
#[derive(Clone, Debug)]
pub enum SpaceKind {
    /// `Discrete(n)`, actions `0..n`.
    Discrete {
        /// Number of actions.
        n: i64,
    },

    /// `Box(low, high)` with finite bounds.
    Box {
        /// Lower bounds.
        low: ArrayD<f32>,

        /// Upper bounds, same shape as `low`.
        high: ArrayD<f32>,
    },

    /// Any other space. Sampling is delegated to the Python `sample()` method.
    Opaque(PyObject),
}

/// The action space of a [`GymEnv`](crate::GymEnv).
///
/// `Discrete` and `Box` spaces are sampled in Rust with a seeded generator;
/// other spaces (and boxes with unbounded dimensions) are sampled in Python.
#[derive(Clone, Debug)]
pub struct GymActSpace {
    kind: SpaceKind,
    rng: fastrand::Rng,
}

impl GymActSpace {
    /// A discrete space with `n` actions.
    pub fn discrete(n: i64, seed: u64) -> Result<Self> {
        if n <= 0 {
            return Err(DriveError::UnsupportedSpace(format!("Discrete({})", n)).into());
        }
        Ok(Self {
            kind: SpaceKind::Discrete { n },
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    /// A box space with finite bounds `low <= high` of the same shape.
    pub fn boxed(low: ArrayD<f32>, high: ArrayD<f32>, seed: u64) -> Result<Self> {
        if low.shape() != high.shape() {
            return Err(DriveError::UnsupportedSpace(format!(
                "Box bounds of different shapes {:?} and {:?}",
                low.shape(),
                high.shape()
            ))
            .into());
        }
        let valid = low
            .iter()
            .zip(high.iter())
            .all(|(l, h)| l.is_finite() && h.is_finite() && l <= h);
        if !valid {
            return Err(DriveError::UnsupportedSpace(
                "Box bounds must be finite with low <= high".to_string(),
            )
            .into());
        }
        Ok(Self {
            kind: SpaceKind::Box { low, high },
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    /// Reads the space from a Python `gym.spaces` object.
    pub fn from_py(py: Python, space: &PyAny, seed: u64) -> Result<Self> {
        let name = space.get_type().name()?.to_string();
        info!("Action space = {}", space.str()?);

        match name.as_str() {
            "Discrete" => Self::discrete(space.getattr("n")?.extract()?, seed),
            "Box" => {
                let low = pyobj_to_arrayd(py, space.getattr("low")?)?;
                let high = pyobj_to_arrayd(py, space.getattr("high")?)?;
                match Self::boxed(low, high, seed) {
                    Ok(space) => Ok(space),
                    Err(e) => {
                        debug!("Sample Box space in Python: {}", e);
                        Ok(Self::opaque(py, space, seed))
                    }
                }
            }
            _ => Ok(Self::opaque(py, space, seed)),
        }
    }

    fn opaque(py: Python, space: &PyAny, seed: u64) -> Self {
        if let Err(e) = space.call_method1("seed", (seed,)) {
            debug!("Failed to seed the action space: {}", e);
        }
        Self {
            kind: SpaceKind::Opaque(space.to_object(py)),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// The kind of the space.
    pub fn kind(&self) -> &SpaceKind {
        &self.kind
    }
}

impl ActionSpace<GymAct> for GymActSpace {
    fn sample(&mut self) -> Result<GymAct> {
        match &self.kind {
            SpaceKind::Discrete { n } => Ok(GymAct::Discrete(self.rng.i64(0..*n))),
            SpaceKind::Box { low, high } => {
                let rng = &self.rng;
                let v = low
                    .iter()
                    .zip(high.iter())
                    .map(|(l, h)| {
                        let u = rng.f32();
                        l * (1.0 - u) + h * u
                    })
                    .collect::<Vec<_>>();
                Ok(GymAct::Continuous(ArrayD::from_shape_vec(low.raw_dim(), v)?))
            }
            SpaceKind::Opaque(space) => Python::with_gil(|py| -> Result<GymAct> {
                let act = space.call_method0(py, "sample")?;
                GymAct::from_py(py, act.as_ref(py))
            }),
        }
    }
}
