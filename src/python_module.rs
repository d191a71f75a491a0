//! Python bindings for phi-bloom using PyO3

use crate::sizing::suggest_parameters;
use crate::BloomFilter;
use numpy::{IntoPyArray, PyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// A key passed from Python, either `bytes` or `str`
#[derive(FromPyObject)]
enum PyKey<'a> {
    Bytes(&'a [u8]),
    Str(&'a str),
}

impl AsRef<[u8]> for PyKey<'_> {
    fn as_ref(&self) -> &[u8] {
        match self {
            PyKey::Bytes(bytes) => bytes,
            PyKey::Str(s) => s.as_bytes(),
        }
    }
}

fn value_error(e: crate::BloomError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python wrapper for BloomFilter
#[pyclass(name = "BloomFilter")]
struct PyBloomFilter {
    inner: BloomFilter,
}

#[pymethods]
impl PyBloomFilter {
    #[new]
    fn new(expected_keys: usize, num_hashes: usize, target_fpr: f64) -> PyResult<Self> {
        let filter =
            BloomFilter::new(expected_keys, num_hashes, target_fpr).map_err(value_error)?;
        Ok(PyBloomFilter { inner: filter })
    }

    fn insert(&mut self, key: PyKey) {
        self.inner.insert(&key);
    }

    fn find(&self, key: PyKey) -> bool {
        self.inner.find(&key)
    }

    fn find_many<'py>(&self, py: Python<'py>, keys: &'py PyAny) -> PyResult<&'py PyArray1<bool>> {
        let mut found = Vec::new();
        for item in keys.iter()? {
            let key: PyKey = item?.extract()?;
            found.push(self.inner.find(&key));
        }
        Ok(found.into_pyarray(py))
    }

    fn false_positive_rate(&self) -> f64 {
        self.inner.false_positive_rate()
    }

    fn num_bits_set(&self) -> usize {
        self.inner.num_bits_set()
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn num_hashes(&self) -> usize {
        self.inner.num_hashes()
    }

    fn fill_ratio(&self) -> f64 {
        self.inner.fill_ratio()
    }

    fn stats(&self) -> String {
        self.inner.stats().to_string()
    }

    fn __contains__(&self, key: PyKey) -> bool {
        self.inner.find(&key)
    }

    fn __len__(&self) -> usize {
        self.inner.capacity()
    }

    fn __str__(&self) -> String {
        format!(
            "BloomFilter(capacity={}, bits_set={}, fpr={:.6})",
            self.inner.capacity(),
            self.inner.num_bits_set(),
            self.inner.false_positive_rate()
        )
    }

    fn __repr__(&self) -> String {
        format!(
            "BloomFilter(expected_keys={}, num_hashes={}, target_fpr={})",
            self.inner.expected_keys(),
            self.inner.num_hashes(),
            self.inner.target_fpr()
        )
    }
}

/// Suggested `(num_bits, num_hashes, expected_fpr)` for a key count and target rate
#[pyfunction]
fn suggest(expected_keys: usize, target_fpr: f64) -> PyResult<(usize, usize, f64)> {
    let params = suggest_parameters(expected_keys, target_fpr).map_err(value_error)?;
    Ok((params.num_bits, params.num_hashes, params.expected_fpr))
}

/// Python module definition
#[pymodule]
fn phi_bloom(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyBloomFilter>()?;
    m.add_function(wrap_pyfunction!(suggest, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
