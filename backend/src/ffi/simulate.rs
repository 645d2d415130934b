//! PyO3 entry point for a single run.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{outcome_to_py, parse_choice, parse_knobs, to_py_err};
use crate::orchestrator::{self, ModeConfig, RunConfig};
use crate::strategy::{FarChoice, NearChoice};

/// Run one simulation.
///
/// # Example (from Python)
///
/// ```python
/// from arbor_trip_core import simulate
///
/// knobs = {"watchful": 230, "rare_chance": 10, "num_trials": 10000,
///          "near_choice": "explore", "far_choice": "witness"}
/// result = simulate("gift", knobs, 15)
/// print(result["pennies"] / result["actions"])
/// ```
///
/// # Errors
///
/// Raises ValueError for an unknown mode or strategy choice.
#[pyfunction]
#[pyo3(signature = (mode, knobs, attar_limit=None, seed=None))]
pub fn simulate(
    py: Python<'_>,
    mode: &str,
    knobs: &Bound<'_, PyDict>,
    attar_limit: Option<i64>,
    seed: Option<u64>,
) -> PyResult<Py<PyDict>> {
    let near = parse_choice(knobs, "near_choice")?
        .map(|name| name.parse::<NearChoice>())
        .transpose()
        .map_err(to_py_err)?;
    let far = parse_choice(knobs, "far_choice")?
        .map(|name| name.parse::<FarChoice>())
        .transpose()
        .map_err(to_py_err)?;

    let mut mode = ModeConfig::from_selector(mode)
        .map_err(to_py_err)?
        .with_strategy(near, far);
    if let Some(limit) = attar_limit {
        mode = mode.with_attar_limit(limit);
    }

    let mut config = RunConfig::new(mode, parse_knobs(knobs)?);
    config.rng_seed = seed;

    // Runs are CPU-bound and touch no Python objects.
    let outcome = py.allow_threads(|| orchestrator::simulate(&config));
    outcome_to_py(py, &outcome)
}
