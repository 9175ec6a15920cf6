//! Conversions between numpy arrays and Rust values.
use anyhow::Result;
use drive_core::{error::DriveError, Frame};
use ndarray::ArrayD;
use numpy::PyArrayDyn;
use pyo3::{types::IntoPyDict, IntoPy, PyAny, PyObject, Python};

/// Converts a numpy array (or anything `numpy.asarray` accepts) into [`ArrayD<f32>`].
///
/// The dtype of arrays coming from gym varies between environments, so the
/// conversion to `float32` is done on the Python side.
pub fn pyobj_to_arrayd(py: Python, obj: &PyAny) -> Result<ArrayD<f32>> {
    let np = py.import("numpy")?;
    let kwargs = vec![("dtype", "float32")].into_py_dict(py);
    let arr = np.getattr("asarray")?.call((obj,), Some(kwargs))?;
    let arr: &PyArrayDyn<f32> = arr.extract()?;
    Ok(arr.readonly().as_array().to_owned())
}

/// Convert [`ArrayD<f32>`] to [`PyObject`].
///
/// This function does not support batch action.
pub fn arrayd_to_pyobj(py: Python, a: &ArrayD<f32>) -> PyObject {
    PyArrayDyn::<f32>::from_array(py, a).into_py(py)
}

/// Converts the return value of `env.render()` into a [`Frame`].
///
/// The value must be an `H x W x 3` (or `H x W x 4`) array of 8-bit pixels.
pub fn pyobj_to_frame(py: Python, obj: &PyAny) -> Result<Frame> {
    if obj.is_none() {
        return Err(DriveError::InvalidFrame(
            "render() returned None, is the render mode rgb_array?".to_string(),
        )
        .into());
    }

    let np = py.import("numpy")?;
    let kwargs = vec![("dtype", "uint8")].into_py_dict(py);
    let arr = np.getattr("ascontiguousarray")?.call((obj,), Some(kwargs))?;
    let arr: &PyArrayDyn<u8> = arr.extract()?;
    let arr = arr.readonly();
    let view = arr.as_array();
    let shape = view.shape().to_vec();
    let data = view.iter().copied().collect::<Vec<_>>();

    Ok(Frame::from_hwc(&shape, data)?)
}
