//! Run report generation.
//!
//! Turns a run's totals into per-action and per-trip rates for display.
//! A run with zero actions gets a warning instead of rates; the engine
//! itself never treats that as an error.

use crate::orchestrator::RunOutcome;
use serde::Serialize;
use std::fmt;

/// Warning shown when a run counted no actions.
pub const NO_ACTIONS_MESSAGE: &str = "0 actions; is the number of trials 0?";

/// Round to three decimal places, halves rounding up.
pub fn to_thousandths(value: f64) -> f64 {
    (1000.0 * value + 0.5).floor() / 1000.0
}

/// One displayed rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rate {
    pub label: &'static str,
    pub value: f64,
    /// Trailing unit, e.g. change points
    pub unit: Option<&'static str>,
}

impl Rate {
    fn new(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value: to_thousandths(value),
            unit: None,
        }
    }

    fn change_points(label: &'static str, value: f64) -> Self {
        Self {
            unit: Some("cp"),
            ..Self::new(label, value)
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{} {} {}", self.label, self.value, unit),
            None => write!(f, "{} {}", self.label, self.value),
        }
    }
}

/// Presentation of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rates", rename_all = "snake_case")]
pub enum RunReport {
    NoActions,
    Rates(Vec<Rate>),
}

impl RunReport {
    /// Build the report. Skill rates only appear when the skill moved.
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        if outcome.actions == 0 {
            return RunReport::NoActions;
        }
        let state = &outcome.state;
        let actions = outcome.actions as f64;
        let trips = state.num_trips as f64;

        let mut rates = vec![Rate::new("Echoes/Action", state.pennies as f64 * 0.01 / actions)];
        if state.watchful != 0 {
            rates.push(Rate::change_points("Watchful/Action", state.watchful as f64 / actions));
        }
        if state.persuasive != 0 {
            rates.push(Rate::change_points(
                "Persuasive/Action",
                state.persuasive as f64 / actions,
            ));
        }
        if state.dangerous != 0 {
            rates.push(Rate::change_points("Dangerous/Action", state.dangerous as f64 / actions));
        }
        if state.energy != 0 {
            rates.push(Rate::new("Energy/Trip", state.energy as f64 / trips));
        }
        rates.push(Rate::new("Actions/Trip", actions / trips));
        RunReport::Rates(rates)
    }

    /// Look up a rate by label.
    pub fn rate(&self, label: &str) -> Option<f64> {
        match self {
            RunReport::NoActions => None,
            RunReport::Rates(rates) => rates.iter().find(|r| r.label == label).map(|r| r.value),
        }
    }

    /// One line per rate.
    pub fn to_text(&self) -> String {
        match self {
            RunReport::NoActions => NO_ACTIONS_MESSAGE.to_string(),
            RunReport::Rates(rates) => rates
                .iter()
                .map(Rate::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
