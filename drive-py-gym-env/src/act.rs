//! Action for [`GymEnv`](crate::GymEnv).
use crate::{
    util::{arrayd_to_pyobj, pyobj_to_arrayd},
    GymActFilter,
};
use anyhow::Result;
use drive_core::{
    record::{Record, RecordValue},
    Act,
};
use ndarray::ArrayD;
use pyo3::{IntoPy, PyAny, PyObject, Python};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// An action of a gym environment.
///
/// Duckietown takes continuous actions, `[velocity, steering]` in `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub enum GymAct {
    /// An element of a `Discrete(n)` space.
    Discrete(i64),

    /// An element of a `Box` space.
    Continuous(ArrayD<f32>),
}

impl Act for GymAct {}

impl GymAct {
    /// Converts a value produced by Python, e.g. by `action_space.sample()`.
    ///
    /// Integers become [`GymAct::Discrete`], anything else is read as an array.
    pub fn from_py(py: Python, obj: &PyAny) -> Result<Self> {
        if obj.get_type().name()? != "ndarray" {
            if let Ok(v) = obj.extract::<i64>() {
                return Ok(Self::Discrete(v));
            }
        }
        Ok(Self::Continuous(pyobj_to_arrayd(py, obj)?))
    }

    /// Converts the action into a Python object accepted by `env.step()`.
    pub fn to_pyobj(&self, py: Python) -> PyObject {
        match self {
            Self::Discrete(v) => v.into_py(py),
            Self::Continuous(a) => arrayd_to_pyobj(py, a),
        }
    }

    /// Flattened values, for records.
    pub fn to_vec(&self) -> Vec<f32> {
        match self {
            Self::Discrete(v) => vec![*v as f32],
            Self::Continuous(a) => a.iter().copied().collect(),
        }
    }
}

/// Configuration of [`GymActRawFilter`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GymActRawFilterConfig {}

/// Passes actions to Python without processing.
///
/// Type `A` must be able to be converted into [`GymAct`]. The action is put
/// into the step record under `act`.
pub struct GymActRawFilter<A> {
    phantom: PhantomData<A>,
}

impl<A> GymActFilter<A> for GymActRawFilter<A>
where
    A: Act + Into<GymAct>,
{
    type Config = GymActRawFilterConfig;

    fn build(_config: &Self::Config) -> Result<Self> {
        Ok(Self {
            phantom: PhantomData,
        })
    }

    fn filt(&mut self, act: A) -> Result<(PyObject, Record)> {
        let act = act.into();
        let record = Record::from_slice(&[("act", RecordValue::Array1(act.to_vec()))]);
        let act = Python::with_gil(|py| act.to_pyobj(py));
        Ok((act, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn flattened_values() {
        assert_eq!(GymAct::Discrete(3).to_vec(), vec![3.0]);
        let a = arr1(&[0.5f32, -1.0]).into_dyn();
        assert_eq!(GymAct::Continuous(a).to_vec(), vec![0.5, -1.0]);
    }
}
