//! Observation for [`GymEnv`](crate::GymEnv).
use crate::{util::pyobj_to_arrayd, GymObsFilter};
use anyhow::Result;
use drive_core::{
    record::{Record, RecordValue},
    Obs,
};
use ndarray::ArrayD;
use pyo3::PyObject;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Observation represented by an [`ArrayD<f32>`].
///
/// For Duckietown this is the camera image, `120 x 160 x 3`.
#[derive(Clone, Debug, PartialEq)]
pub struct GymObs(pub ArrayD<f32>);

impl Obs for GymObs {}

impl From<ArrayD<f32>> for GymObs {
    fn from(obs: ArrayD<f32>) -> Self {
        Self(obs)
    }
}

/// Configuration of [`ArrayObsFilter`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArrayObsFilterConfig {
    /// Put the flattened observation into the step record under `obs`.
    ///
    /// Off by default; camera images are large.
    pub record_obs: bool,
}

/// An observation filter that converts a numpy array.
///
/// Type parameter `O` must implement [`From`]`<ArrayD<f32>>` and [`Obs`].
pub struct ArrayObsFilter<O> {
    record_obs: bool,
    phantom: PhantomData<O>,
}

impl<O> GymObsFilter<O> for ArrayObsFilter<O>
where
    O: Obs + From<ArrayD<f32>>,
{
    type Config = ArrayObsFilterConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self {
            record_obs: config.record_obs,
            phantom: PhantomData,
        })
    }

    fn filt(&mut self, obs: PyObject) -> Result<(O, Record)> {
        let obs = pyo3::Python::with_gil(|py| pyobj_to_arrayd(py, obs.as_ref(py)))?;
        let record = match self.record_obs {
            true => {
                let vec = obs.iter().copied().collect();
                Record::from_slice(&[("obs", RecordValue::Array1(vec))])
            }
            false => Record::empty(),
        };
        Ok((obs.into(), record))
    }
}
