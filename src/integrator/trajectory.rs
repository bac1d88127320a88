use serde::{Serialize, Deserialize};
use super::{Dop853, IntegratorSettings, IntegrationError, Stats};
use super::super::bodies::Body;
use super::super::bodies::state::{initial_state, unpack, check_length, x_index, vx_index, y_index, vy_index};
use super::super::constants::MAX_SAMPLES;
use super::super::gravity::GravityField;

/// Times at which the state is recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum OutputGrid {
    /// Evenly spaced times from t0 to t1, both included
    Samples(usize),
    /// Approximate spacing between times, adjusted so that the grid ends exactly on t1
    Step(f64),
}

impl OutputGrid {
    pub fn times(&self, t0: f64, t1: f64) -> Result<Vec<f64>, IntegrationError> {
        if !t0.is_finite() || !t1.is_finite() {
            return Err(IntegrationError::InvalidTimeSpan { t0: t0, t1: t1 });
        }
        let n_samples = match *self {
            OutputGrid::Samples(n_samples) => n_samples,
            OutputGrid::Step(time_step) => {
                if !(time_step > 0.) || !time_step.is_finite() {
                    return Err(IntegrationError::InvalidStep(time_step));
                }
                if t1 == t0 {
                    1
                } else {
                    // At least one interval
                    let n_intervals = ((t1 - t0).abs()/time_step).round().max(1.);
                    if !n_intervals.is_finite() || n_intervals >= MAX_SAMPLES as f64 {
                        return Err(IntegrationError::InvalidStep(time_step));
                    }
                    n_intervals as usize + 1
                }
            },
        };
        if n_samples == 0 || n_samples > MAX_SAMPLES {
            return Err(IntegrationError::InvalidSampleCount(n_samples));
        }
        if n_samples == 1 {
            return Ok(vec![t0]);
        }
        let last = n_samples - 1;
        let times = (0..n_samples)
            .map(|i| if i == last { t1 } else { t0 + (t1 - t0)*(i as f64)/(last as f64) })
            .collect();
        Ok(times)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub state: Vec<f64>,
}

/// States of all the bodies at the requested output times, the first sample
/// being the initial conditions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "TrajectoryRecord")]
pub struct Trajectory {
    n_bodies: usize,
    samples: Vec<Sample>,
    stats: Stats,
}

// Deserialized form, checked against the state vector layout before becoming a Trajectory
#[derive(Deserialize)]
struct TrajectoryRecord {
    n_bodies: usize,
    samples: Vec<Sample>,
    stats: Stats,
}

impl TryFrom<TrajectoryRecord> for Trajectory {
    type Error = IntegrationError;

    fn try_from(record: TrajectoryRecord) -> Result<Trajectory, IntegrationError> {
        for sample in record.samples.iter() {
            check_length(record.n_bodies, &sample.state)?;
        }
        Ok(Trajectory {
            n_bodies: record.n_bodies,
            samples: record.samples,
            stats: record.stats,
        })
    }
}

impl Trajectory {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn n_bodies(&self) -> usize {
        self.n_bodies
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.time).collect()
    }

    pub fn initial(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Panics if `sample` or `body` are out of range.
    pub fn position(&self, sample: usize, body: usize) -> (f64, f64) {
        let state = &self.samples[sample].state;
        (state[x_index(body)], state[y_index(body)])
    }

    /// Panics if `sample` or `body` are out of range.
    pub fn velocity(&self, sample: usize, body: usize) -> (f64, f64) {
        let state = &self.samples[sample].state;
        (state[vx_index(body)], state[vy_index(body)])
    }

    /// (x, y) positions of one body over the whole trajectory.
    pub fn path(&self, body: usize) -> Vec<(f64, f64)> {
        (0..self.samples.len()).map(|sample| self.position(sample, body)).collect()
    }

    /// Bodies (names and masses taken from `bodies`) as they are at the given sample.
    pub fn bodies_at(&self, bodies: &[Body], sample: usize) -> Result<Vec<Body>, IntegrationError> {
        unpack(bodies, &self.samples[sample].state)
    }
}

/// Integrate the gravitational motion of `bodies` from `t0` to `t1`, recording
/// `samples` evenly spaced states (both ends included) with the default settings.
pub fn integrate(bodies: &[Body], t0: f64, t1: f64, samples: usize) -> Result<Trajectory, IntegrationError> {
    integrate_with(bodies, t0, t1, OutputGrid::Samples(samples), &IntegratorSettings::default())
}

pub fn integrate_with(bodies: &[Body], t0: f64, t1: f64, grid: OutputGrid, settings: &IntegratorSettings) -> Result<Trajectory, IntegrationError> {
    let times = grid.times(t0, t1)?;
    let gravity_field = GravityField::new(bodies);
    let initial_conditions = initial_state(bodies);

    // Derivatives at t0 are evaluated here, a singular start fails even without steps
    let mut integrator = Dop853::new(&gravity_field, *settings, t0, &initial_conditions)?;

    let mut samples = Vec::with_capacity(times.len());
    samples.push(Sample { time: t0, state: initial_conditions });
    for &time in times.iter().skip(1) {
        let state = integrator.advance_to(time)?;
        samples.push(Sample { time: time, state: state.to_vec() });
    }

    Ok(Trajectory {
        n_bodies: bodies.len(),
        samples: samples,
        stats: integrator.stats(),
    })
}
