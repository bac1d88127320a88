use std::array;
use std::mem;
use super::{OdeSystem, IntegratorSettings, IntegrationError, Stats};
use super::coefficients::{STAGES, A, B, C, E3, E5};
use super::super::constants::{MIN_ACCEPTED_ERROR, ROUNDING_UNIT};

/// Explicit Runge-Kutta method of order 8 with embedded 5th and 3rd order
/// error estimators (Dormand & Prince).
///
/// E. Hairer, S.P. Norsett and G. Wanner, Solving Ordinary Differential
/// Equations I. Nonstiff Problems. 2nd edition. Springer Series in
/// Computational Mathematics, Springer-Verlag (1993)
///
/// The integrator keeps its current time, state and proposed step size so
/// that it can be advanced through consecutive output times without
/// restarting the step size control. Every call to `advance_to` lands exactly
/// on the requested time (the last step of each interval is shortened).
pub struct Dop853<'a, S: OdeSystem> {
    system: &'a S,
    settings: IntegratorSettings,
    time: f64,
    state: Vec<f64>,
    // k[0] always holds f(time, state) so that it can be reused by the next step
    k: [Vec<f64>; STAGES],
    stage_state: Vec<f64>,
    new_state: Vec<f64>,
    step: Option<f64>,
    accepted_error: f64,
    stats: Stats,
}

impl<'a, S: OdeSystem> Dop853<'a, S> {
    pub fn new(system: &'a S, settings: IntegratorSettings, t0: f64, y0: &[f64]) -> Result<Dop853<'a, S>, IntegrationError> {
        settings.validate()?;
        let n = system.dimension();
        if y0.len() != n {
            return Err(IntegrationError::MalformedState { expected: n, found: y0.len() });
        }
        if !t0.is_finite() {
            return Err(IntegrationError::InvalidTimeSpan { t0: t0, t1: t0 });
        }
        let mut integrator = Dop853 {
            system: system,
            settings: settings,
            time: t0,
            state: y0.to_vec(),
            k: array::from_fn(|_| vec![0.; n]),
            stage_state: vec![0.; n],
            new_state: vec![0.; n],
            step: None,
            accepted_error: MIN_ACCEPTED_ERROR,
            stats: Stats::default(),
        };
        evaluate(integrator.system, t0, &integrator.state, &mut integrator.k[0], &mut integrator.stats)?;
        Ok(integrator)
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Step size (absolute value) that will be tried first by the next call to `advance_to`.
    pub fn proposed_step(&self) -> Option<f64> {
        self.step
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Integrate from the current time up to `t_end` (which can be earlier than the current time).
    pub fn advance_to(&mut self, t_end: f64) -> Result<&[f64], IntegrationError> {
        if !t_end.is_finite() {
            return Err(IntegrationError::InvalidTimeSpan { t0: self.time, t1: t_end });
        }
        if t_end == self.time {
            return Ok(&self.state);
        }
        let from = self.time;
        let direction = (t_end - from).signum();
        let max_step = match self.settings.max_step {
            Some(max_step) => max_step.min((t_end - from).abs()),
            None => (t_end - from).abs(),
        };

        let mut h = match self.step {
            Some(step) => step,
            None => self.initial_step(direction, max_step)?,
        };
        h = h.min(max_step);

        let expo1 = 1./8. - self.settings.beta*0.2;
        let max_shrink = 1./self.settings.min_step_factor;
        let max_growth = 1./self.settings.max_step_factor;
        let mut rejected = false;
        let mut n_steps = 0;

        loop {
            if n_steps >= self.settings.max_steps {
                return Err(IntegrationError::TooManySteps { from: from, to: t_end, max_steps: self.settings.max_steps });
            }
            if 0.1*h <= self.time.abs()*ROUNDING_UNIT || h == 0. {
                return Err(IntegrationError::StepSizeUnderflow { from: from, to: t_end, time: self.time, step: direction*h });
            }
            let untruncated_step = h;
            let mut last = false;
            if (self.time + 1.01*direction*h - t_end)*direction > 0. {
                h =(t_end - self.time).abs();
                last = true;
            }
            n_steps += 1;

            let signed_step = direction*h;
            self.compute_stages(signed_step)?;
            let mut error = self.error_norm(signed_step);
            if error.is_nan() {
                error = f64::INFINITY;
            }

            let fac11 = error.powf(expo1);
            let fac = (fac11/self.accepted_error.powf(self.settings.beta)/self.settings.safety_factor)
                .min(max_shrink)
                .max(max_growth);
            let mut h_new = h/fac;

            if error <= 1. {
                self.accepted_error = error.max(MIN_ACCEPTED_ERROR);
                self.stats.n_accepted_steps += 1;
                self.time = if last { t_end } else { self.time + signed_step };
                mem::swap(&mut self.state, &mut self.new_state);
                evaluate(self.system, self.time, &self.state, &mut self.k[0], &mut self.stats)?;

                h_new = h_new.min(max_step);
                if rejected {
                    h_new = h_new.min(h);
                }
                rejected = false;
                if last {
                    self.step = Some(h_new.max(untruncated_step));
                    return Ok(&self.state);
                }
                h = h_new;
            } else {
                self.stats.n_rejected_steps += 1;
                rejected = true;
                h /= (fac11/self.settings.safety_factor).min(max_shrink);
            }
        }
    }

    fn compute_stages(&mut self, h: f64) -> Result<(), IntegrationError> {
        let n = self.state.len();
        for s in 1..STAGES {
            let (computed, pending) = self.k.split_at_mut(s);
            for i in 0..n {
                let mut increment = 0.;
                for (j, k_j) in computed.iter().enumerate() {
                    let a = A[s][j];
                    if a != 0. {
                        increment += a*k_j[i];
                    }
                }
                self.stage_state[i] = self.state[i] + h*increment;
            }
            evaluate(self.system, self.time + C[s]*h, &self.stage_state, &mut pending[0], &mut self.stats)?;
        }
        for i in 0..n {
            let mut increment = 0.;
            for s in 0..STAGES {
                if B[s] != 0. {
                    increment += B[s]*self.k[s][i];
                }
            }
            self.new_state[i] = self.state[i] + h*increment;
        }
        Ok(())
    }

    /// Scaled error of the last computed step, values <= 1 mean the step is accepted.
    fn error_norm(&self, h: f64) -> f64 {
        let n = self.state.len();
        if n == 0 {
            return 0.;
        }
        let mut err5 = 0.;
        let mut err3 = 0.;
        for i in 0..n {
            let scale = self.settings.absolute_tolerance
                + self.settings.relative_tolerance*self.state[i].abs().max(self.new_state[i].abs());
            let mut e5 = 0.;
            let mut e3 = 0.;
            for s in 0..STAGES {
                e5 += E5[s]*self.k[s][i];
                e3 += E3[s]*self.k[s][i];
            }
            err5 += (e5/scale).powi(2);
            err3 += (e3/scale).powi(2);
        }
        let mut denominator = err5 + 0.01*err3;
        if denominator <= 0. {
            denominator = 1.;
        }
        h.abs()*err5*(1./(n as f64*denominator)).sqrt()
    }

    /// Starting step size estimated from the derivatives at the current time (Hairer's HINIT).
    fn initial_step(&mut self, direction: f64, max_step: f64) -> Result<f64, IntegrationError> {
        if let Some(initial_step) = self.settings.initial_step {
            return Ok(initial_step.min(max_step));
        }
        let n = self.state.len();
        let scales: Vec<f64> = self.state.iter()
            .map(|y| self.settings.absolute_tolerance + self.settings.relative_tolerance*y.abs())
            .collect();

        let mut dnf = 0.;
        let mut dny = 0.;
        for i in 0..n {
            dnf += (self.k[0][i]/scales[i]).powi(2);
            dny += (self.state[i]/scales[i]).powi(2);
        }
        let mut h = if dnf <= 1e-10 || dny <= 1e-10 { 1e-6 } else { (dny/dnf).sqrt()*0.01 };
        h = h.min(max_step);

        // Explicit Euler step to estimate the second derivative
        for i in 0..n {
            self.stage_state[i] = self.state[i] + direction*h*self.k[0][i];
        }
        let (first, rest) = self.k.split_at_mut(1);
        evaluate(self.system, self.time + direction*h, &self.stage_state, &mut rest[0], &mut self.stats)?;
        let mut der2 = 0.;
        for i in 0..n {
            der2 += ((rest[0][i] - first[0][i])/scales[i]).powi(2);
        }
        let der2 = der2.sqrt()/h;

        let der12 = der2.abs().max(dnf.sqrt());
        let h1 = if der12 <= 1e-15 {
            (1e-6_f64).max(h*1e-3)
        } else {
            (0.01/der12).powf(1./8.)
        };
        Ok((100.*h).min(h1).min(max_step))
    }
}

fn evaluate<S: OdeSystem>(system: &S, t: f64, state: &[f64], derivatives: &mut [f64], stats: &mut Stats) -> Result<(), IntegrationError> {
    system.derivatives(t, state, derivatives);
    stats.n_evaluations += 1;
    if derivatives.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(system.non_finite_error(t, state))
    }
}
