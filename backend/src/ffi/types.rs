//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict).

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::orchestrator::{Knobs, RunOutcome, SimulationError};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a field with a default value if missing.
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Map a setup error onto `ValueError`.
pub fn to_py_err(err: SimulationError) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert Python dict to Knobs. Missing keys take the Rust defaults.
pub fn parse_knobs(py_knobs: &Bound<'_, PyDict>) -> PyResult<Knobs> {
    let defaults = Knobs::default();
    Ok(Knobs {
        watchful: extract_with_default(py_knobs, "watchful", defaults.watchful)?,
        persuasive: extract_with_default(py_knobs, "persuasive", defaults.persuasive)?,
        dangerous: extract_with_default(py_knobs, "dangerous", defaults.dangerous)?,
        gear_diff: extract_with_default(py_knobs, "gear_diff", defaults.gear_diff)?,
        rare_chance: extract_with_default(py_knobs, "rare_chance", defaults.rare_chance)?,
        num_trials: extract_with_default(py_knobs, "num_trials", defaults.num_trials)?,
    })
}

/// Optional strategy name from the knob dict.
pub fn parse_choice(py_knobs: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<String>> {
    match py_knobs.get_item(key)? {
        Some(value) => Ok(Some(value.extract()?)),
        None => Ok(None),
    }
}

// ========================================================================
// Result Conversion
// ========================================================================

/// Convert RunOutcome to Python dict
pub fn outcome_to_py(py: Python<'_>, outcome: &RunOutcome) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    let state = &outcome.state;

    dict.set_item("watchful", state.watchful)?;
    dict.set_item("persuasive", state.persuasive)?;
    dict.set_item("dangerous", state.dangerous)?;
    dict.set_item("pennies", state.pennies)?;
    dict.set_item("attar", state.attar)?;
    dict.set_item("permission", state.permission)?;
    dict.set_item("energy", state.energy)?;
    dict.set_item("num_trips", state.num_trips)?;
    dict.set_item("actions", outcome.actions)?;
    dict.set_item("seed", outcome.seed)?;

    Ok(dict.unbind())
}
