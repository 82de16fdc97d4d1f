//! Python bindings, built with the `python` feature.

use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::decode::ParsedField;
use crate::error::Error;
use crate::properties::AttributeValue;
use crate::region::{Entry, Region as RustRegion};

#[pyclass(get_all)]
#[derive(Debug, Clone)]
pub struct Field {
    /// `coordinate`, `length`, `angle` or `position`.
    kind: String,
    values: Vec<f64>,
    units: Vec<String>,
    frame: Option<String>,
}

impl From<&ParsedField> for Field {
    fn from(field: &ParsedField) -> Self {
        let (kind, quantity) = match field {
            ParsedField::Coordinate(q) => ("coordinate", q),
            ParsedField::Length(q) => ("length", q),
            ParsedField::Angle(q) => ("angle", q),
            ParsedField::Position(p) => {
                return Field {
                    kind: "position".to_string(),
                    values: vec![p.lon.value, p.lat.value],
                    units: vec![p.lon.unit.symbol().to_string(), p.lat.unit.symbol().to_string()],
                    frame: Some(p.frame.name().to_string()),
                }
            }
        };
        Field {
            kind: kind.to_string(),
            values: vec![quantity.value],
            units: vec![quantity.unit.symbol().to_string()],
            frame: None,
        }
    }
}

#[pymethods]
impl Field {
    fn __repr__(&self) -> String {
        format!("Field(kind={:?}, values={:?}, units={:?}, frame={:?})", self.kind, self.values, self.units, self.frame)
    }
}

#[pyclass]
#[derive(Debug, Clone)]
pub struct Region {
    #[pyo3(get)]
    region_type: String,
    #[pyo3(get)]
    coord_system: String,
    #[pyo3(get)]
    fields: Vec<Field>,
    #[pyo3(get)]
    exclude: bool,
    #[pyo3(get)]
    tags: Vec<String>,
    properties_internal: Vec<(String, AttributeValue)>,
}

impl From<&RustRegion> for Region {
    fn from(region: &RustRegion) -> Self {
        Region {
            region_type: region.region_type.to_string(),
            coord_system: region.system.name(),
            fields: region.fields.iter().map(Field::from).collect(),
            exclude: region.exclude,
            tags: region.properties.tags.clone(),
            properties_internal: region
                .properties
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

#[pymethods]
impl Region {
    #[getter]
    fn properties(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let dict = PyDict::new_bound(py);
        for (k, v_enum) in &self.properties_internal {
            let py_val = match v_enum {
                AttributeValue::String(s) => s.to_object(py),
                AttributeValue::Number(n) => n.to_object(py),
                AttributeValue::NumberList(nl) => nl.to_object(py),
                AttributeValue::Flag(b) => b.to_object(py),
            };
            dict.set_item(k, py_val)?;
        }
        Ok(dict.into())
    }

    fn __repr__(&self) -> String {
        format!("Region({}, {} fields, {})", self.region_type, self.fields.len(), self.coord_system)
    }
}

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::Parse { .. } => PyValueError::new_err(err.to_string()),
        Error::Read { .. } | Error::Io(_) => PyOSError::new_err(err.to_string()),
    }
}

/// Plain regions become `Region` objects, composites lists of them.
fn entries_to_py(py: Python<'_>, entries: &[Entry]) -> PyResult<PyObject> {
    let list = PyList::empty_bound(py);
    for entry in entries {
        match entry {
            Entry::Region(region) => list.append(Py::new(py, Region::from(region))?)?,
            Entry::Composite(composite) => {
                let members = PyList::empty_bound(py);
                for region in &composite.members {
                    members.append(Py::new(py, Region::from(region))?)?;
                }
                list.append(members)?;
            }
        }
    }
    Ok(list.into_py(py))
}

#[pyfunction]
fn parse_regions(py: Python<'_>, text: &str) -> PyResult<PyObject> {
    let entries = crate::parse_regions(text).map_err(to_py_err)?;
    entries_to_py(py, &entries)
}

#[pyfunction]
fn parse_region_file(py: Python<'_>, path: &str) -> PyResult<PyObject> {
    let entries = crate::parse_region_file(path).map_err(to_py_err)?;
    entries_to_py(py, &entries)
}

// --- Python Module Definition ---
#[pymodule]
fn ds9_regions(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_regions, m)?)?;
    m.add_function(wrap_pyfunction!(parse_region_file, m)?)?;
    m.add_class::<Region>()?;
    m.add_class::<Field>()?;
    Ok(())
}
