//! Python bindings (feature `pyo3`)
//!
//! Exposes a single `simulate` call mirroring the worker message of the web
//! host: a mode selector, a knob dict and an optional attar limit in, the
//! final state and action count out.

pub mod simulate;
pub mod types;
