use numpy::{PyArray1, PyReadonlyArrayDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{compress, decompress};

/// Python module `lzss`. The name of this function must match the
/// `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn lzss(m: &Bound<'_, PyModule>) -> PyResult<()> {
    #[pyfn(m)]
    #[pyo3(name = "encode")]
    fn encode_py<'py>(
        py: Python<'py>,
        xs: PyReadonlyArrayDyn<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray1<u8>>> {
        let result = compress(xs.as_slice()?);
        Ok(PyArray1::from_vec_bound(py, result))
    }

    #[pyfn(m)]
    #[pyo3(name = "decode")]
    fn decode_py<'py>(
        py: Python<'py>,
        xs: PyReadonlyArrayDyn<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray1<u8>>> {
        let result = decompress(xs.as_slice()?).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyArray1::from_vec_bound(py, result))
    }

    Ok(())
}
