pub mod coefficients;
mod dop853;
mod trajectory;
pub mod output;

pub use self::dop853::Dop853;
pub use self::trajectory::*;

use serde::{Serialize, Deserialize};
use thiserror::Error;
use super::constants::{RELATIVE_TOLERANCE, ABSOLUTE_TOLERANCE, SAFETY_FACTOR, MIN_STEP_FACTOR, MAX_STEP_FACTOR, STEP_STABILIZATION_BETA, MAX_STEPS};

/// First order system `dy/dt = f(t, y)` with a fixed number of components.
pub trait OdeSystem {
    fn dimension(&self) -> usize;
    /// Write `f(t, state)` into `derivatives` (same length as `state`).
    fn derivatives(&self, t: f64, state: &[f64], derivatives: &mut [f64]);
    /// Error reported when `derivatives` produced NaN or infinite values at `(t, state)`.
    fn non_finite_error(&self, t: f64, _state: &[f64]) -> IntegrationError {
        IntegrationError::NonFiniteDerivative { time: t }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("bodies #{first} and #{second} share the same position at t = {time}, gravitational acceleration is singular")]
    SingularGeometry { time: f64, first: usize, second: usize },
    #[error("non-finite derivative at t = {time}")]
    NonFiniteDerivative { time: f64 },
    #[error("step size underflow ({step:e}) at t = {time} while integrating from {from} to {to}")]
    StepSizeUnderflow { from: f64, to: f64, time: f64, step: f64 },
    #[error("more than {max_steps} steps required to integrate from {from} to {to}")]
    TooManySteps { from: f64, to: f64, max_steps: usize },
    #[error("invalid time span from {t0} to {t1}")]
    InvalidTimeSpan { t0: f64, t1: f64 },
    #[error("at least one output sample is required (requested {0})")]
    InvalidSampleCount(usize),
    #[error("invalid output time step {0}")]
    InvalidStep(f64),
    #[error("invalid integrator settings: {0}")]
    InvalidSettings(String),
    #[error("state vector has {found} components, {expected} expected")]
    MalformedState { expected: usize, found: usize },
}

/// Error control and step size parameters of the adaptive integrator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntegratorSettings {
    pub relative_tolerance: f64,
    pub absolute_tolerance: f64,
    pub safety_factor: f64,
    // Bounds of the ratio new_step/old_step
    pub min_step_factor: f64,
    pub max_step_factor: f64,
    pub beta: f64,
    /// Maximum number of steps between two consecutive output times
    pub max_steps: usize,
    pub max_step: Option<f64>,
    /// Skip the automatic initial step selection
    pub initial_step: Option<f64>,
}

impl Default for IntegratorSettings {
    fn default() -> IntegratorSettings {
        IntegratorSettings {
            relative_tolerance: RELATIVE_TOLERANCE,
            absolute_tolerance: ABSOLUTE_TOLERANCE,
            safety_factor: SAFETY_FACTOR,
            min_step_factor: MIN_STEP_FACTOR,
            max_step_factor: MAX_STEP_FACTOR,
            beta: STEP_STABILIZATION_BETA,
            max_steps: MAX_STEPS,
            max_step: None,
            initial_step: None,
        }
    }
}

impl IntegratorSettings {
    pub fn with_tolerances(relative_tolerance: f64, absolute_tolerance: f64) -> IntegratorSettings {
        IntegratorSettings {
            relative_tolerance: relative_tolerance,
            absolute_tolerance: absolute_tolerance,
            ..IntegratorSettings::default()
        }
    }

    pub fn validate(&self) -> Result<(), IntegrationError> {
        let invalid = |message: String| Err(IntegrationError::InvalidSettings(message));
        if !(self.relative_tolerance >= 0.) || !(self.absolute_tolerance >= 0.) {
            return invalid(format!("tolerances must be non-negative (rtol = {}, atol = {})", self.relative_tolerance, self.absolute_tolerance));
        }
        if self.relative_tolerance == 0. && self.absolute_tolerance == 0. {
            return invalid("relative and absolute tolerances cannot both be zero".to_string());
        }
        if !(self.safety_factor > 0. && self.safety_factor < 1.) {
            return invalid(format!("safety factor must be in (0, 1), got {}", self.safety_factor));
        }
        if !(self.min_step_factor > 0. && self.min_step_factor < 1.) {
            return invalid(format!("minimum step factor must be in (0, 1), got {}", self.min_step_factor));
        }
        if !(self.max_step_factor > 1.) {
            return invalid(format!("maximum step factor must be greater than 1, got {}", self.max_step_factor));
        }
        if !(self.beta >= 0. && self.beta <= 0.2) {
            return invalid(format!("step stabilization beta must be in [0, 0.2], got {}", self.beta));
        }
        if self.max_steps == 0 {
            return invalid("maximum number of steps must be positive".to_string());
        }
        for (label, value) in [("maximum step", self.max_step), ("initial step", self.initial_step)] {
            if let Some(step) = value {
                if !(step > 0.) || !step.is_finite() {
                    return invalid(format!("{} must be a positive number, got {}", label, step));
                }
            }
        }
        Ok(())
    }
}

/// Work counters accumulated over a whole integration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub n_evaluations: usize,
    pub n_accepted_steps: usize,
    pub n_rejected_steps: usize,
}
